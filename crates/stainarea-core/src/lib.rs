pub mod classify;
pub mod config;
pub mod consts;
pub mod error;
pub mod estimate;
pub mod history;
pub mod io;
pub mod point;
pub mod result;
pub mod sampler;
pub mod session;
