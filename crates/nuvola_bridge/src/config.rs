use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::path::{Path, PathBuf};

/// Settings read from `bridge.json` in the configuration directory.
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default, rename_all = "kebab-case")]
pub struct BridgeConfig {
    /// Tray tooltip shown while no song is known.
    #[default("Nuvola Player".to_string())]
    pub app_name: String,

    /// Icon name sent along with every song notification.
    #[default("nuvolaplayer".to_string())]
    pub notification_icon: String,

    /// Socket the host listens on. Overridden by `--socket`.
    pub socket_path: Option<PathBuf>,
}

impl BridgeConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse bridge configuration")
    }
}

/// Read the configuration file, falling back to the defaults if it does not exist.
pub fn read_from_file(path: &Path) -> Result<BridgeConfig> {
    if !path.exists() {
        log::info!("No configuration found at {}, using defaults", path.display());
        return Ok(BridgeConfig::default());
    }
    let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    BridgeConfig::from_json(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
}
