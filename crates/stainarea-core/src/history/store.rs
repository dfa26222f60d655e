use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::consts::HISTORY_SLOT_KEY;
use crate::error::{Result, StainError};
use crate::result::{CalculationResult, StoredResult};

use super::sink::{KeyValueStore, MemoryStore};
use super::summary::HistorySummary;

#[derive(Default)]
struct Entries {
    /// Most recent first.
    results: Vec<CalculationResult>,
    /// Bumped on every mutation.
    revision: u64,
}

/// Ordered log of past estimations, persisted to a [`KeyValueStore`] slot.
///
/// Mutations are applied to the in-memory list first, under a write lock,
/// so readers always see a whole list. The reduced snapshot is written
/// afterwards; a failed write is logged and otherwise ignored.
pub struct HistoryStore {
    entries: RwLock<Entries>,
    sink: Arc<dyn KeyValueStore>,
    key: String,
    /// Revision of the last snapshot handed to the sink.
    written: Mutex<u64>,
}

impl HistoryStore {
    /// Open the history kept in `key` on `sink`.
    ///
    /// A missing or unreadable snapshot yields an empty history.
    pub fn load(sink: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let results = match sink.load(&key) {
            Ok(Some(raw)) => match parse_snapshot(&raw) {
                Ok(results) => {
                    info!(key = %key, count = results.len(), "History loaded");
                    results
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding unreadable history snapshot");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No history snapshot yet");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read history snapshot");
                Vec::new()
            }
        };

        Self {
            entries: RwLock::new(Entries {
                results,
                revision: 0,
            }),
            sink,
            key,
            written: Mutex::new(0),
        }
    }

    /// A history backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStore::new()), HISTORY_SLOT_KEY)
    }

    /// Copy of the current list, most recent first.
    pub fn list(&self) -> Vec<CalculationResult> {
        self.read(|results| results.to_vec())
    }

    pub fn get(&self, id: &Uuid) -> Option<CalculationResult> {
        self.read(|results| results.iter().find(|r| &r.id == id).cloned())
    }

    pub fn len(&self) -> usize {
        self.read(|results| results.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> HistorySummary {
        self.read(HistorySummary::from_results)
    }

    /// Prepend `result`. An older entry with the same id is dropped.
    pub fn add(&self, result: CalculationResult) {
        let id = result.id;
        self.mutate(move |results| {
            results.retain(|r| r.id != result.id);
            results.insert(0, result);
        });
        debug!(%id, "Result added to history");
    }

    /// Remove the entry with `id`. Returns whether one was found.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.mutate(|results| {
            let before = results.len();
            results.retain(|r| &r.id != id);
            results.len() != before
        });
        debug!(%id, removed, "Result removed from history");
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.mutate(|results| results.clear());
        debug!("History cleared");
    }

    fn read<T>(&self, f: impl FnOnce(&[CalculationResult]) -> T) -> T {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f(&entries.results)
    }

    /// Apply `f` under the write lock, then persist the resulting snapshot.
    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<CalculationResult>) -> T) -> T {
        let (out, revision, snapshot) = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            let out = f(&mut entries.results);
            entries.revision += 1;
            let snapshot: Vec<StoredResult> =
                entries.results.iter().map(CalculationResult::to_stored).collect();
            (out, entries.revision, snapshot)
        };
        self.persist(revision, &snapshot);
        out
    }

    /// Write `snapshot` unless a newer revision already reached the sink.
    fn persist(&self, revision: u64, snapshot: &[StoredResult]) {
        let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
        if revision <= *written {
            debug!(revision, written = *written, "Skipping stale history snapshot");
            return;
        }

        let outcome = serde_json::to_string_pretty(snapshot)
            .map_err(StainError::from)
            .and_then(|json| self.sink.save(&self.key, &json));
        match outcome {
            Ok(()) => {
                *written = revision;
                debug!(key = %self.key, count = snapshot.len(), revision, "History persisted");
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "History kept in memory only");
            }
        }
    }
}

/// Parse a persisted snapshot. Repeated ids keep their first (most recent) entry.
pub fn parse_snapshot(raw: &str) -> Result<Vec<CalculationResult>> {
    let stored: Vec<StoredResult> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    Ok(stored
        .into_iter()
        .filter(|s| seen.insert(s.id))
        .map(CalculationResult::from)
        .collect())
}
