use thiserror::Error;

#[derive(Error, Debug)]
pub enum StainError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not an image: content type '{content_type}'")]
    NotAnImage { content_type: String },

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Session not ready: a calculation is already in progress")]
    NotReady,

    #[error("Value {value} out of range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("Failed to persist history: {0}")]
    PersistenceWriteFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StainError>;
