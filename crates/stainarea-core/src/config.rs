use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SAMPLE_COUNT, HISTORY_SLOT_KEY, MAX_SAMPLE_COUNT, MIN_SAMPLE_COUNT};
use crate::error::{Result, StainError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Random points per calculation, within [`MIN_SAMPLE_COUNT`]..=[`MAX_SAMPLE_COUNT`].
    #[serde(default = "default_sample_count")]
    pub sample_count: u32,
    /// Fixed generator seed. Absent means a fresh seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_sample_count() -> u32 {
    DEFAULT_SAMPLE_COUNT
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            seed: None,
            history: HistoryConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        validate_sample_count(self.sample_count)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Directory holding the snapshot file. `None` keeps history in memory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Slot name of the snapshot.
    #[serde(default = "default_history_key")]
    pub key: String,
}

fn default_history_key() -> String {
    HISTORY_SLOT_KEY.to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_history_key(),
        }
    }
}

/// Reject sample counts outside [`MIN_SAMPLE_COUNT`]..=[`MAX_SAMPLE_COUNT`].
pub fn validate_sample_count(n: u32) -> Result<()> {
    if (MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&n) {
        Ok(())
    } else {
        Err(StainError::OutOfRange {
            value: n as i64,
            min: MIN_SAMPLE_COUNT as i64,
            max: MAX_SAMPLE_COUNT as i64,
        })
    }
}
