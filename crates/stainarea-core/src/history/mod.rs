mod sink;
mod store;
mod summary;

pub use sink::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{parse_snapshot, HistoryStore};
pub use summary::HistorySummary;
