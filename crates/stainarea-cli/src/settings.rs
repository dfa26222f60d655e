use std::path::PathBuf;

use anyhow::{Context, Result};
use stainarea_core::config::SessionConfig;
use tracing::{debug, warn};

/// Options shared by every subcommand.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub history_dir: Option<PathBuf>,
}

/// Platform data directory for the history, e.g. `~/.local/share/stainarea`.
fn default_history_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("stainarea"))
}

/// Resolve the session configuration: file (if given), then command-line
/// overrides, then the platform default history directory.
pub fn load_config(global: &GlobalArgs) -> Result<SessionConfig> {
    let mut config = match &global.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    if let Some(dir) = &global.history_dir {
        config.history.dir = Some(dir.clone());
    }
    if config.history.dir.is_none() {
        config.history.dir = default_history_dir();
        if config.history.dir.is_none() {
            warn!("No data directory available, history will not be saved");
        }
    }
    debug!(?config, "Configuration resolved");
    Ok(config)
}
