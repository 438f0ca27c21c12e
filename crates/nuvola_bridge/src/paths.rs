use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Stores references to all the paths relevant to the bridge
#[derive(Debug, Clone)]
pub struct BridgePaths {
    pub config_dir: PathBuf,
    pub runtime_dir: PathBuf,
}

impl BridgePaths {
    pub fn from_config_dir<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.is_file() {
            bail!("Please provide the path to the config directory, not a file within it")
        }

        // the directory is optional, everything has a default
        let config_dir = if config_dir.exists() { config_dir.canonicalize()? } else { config_dir.to_path_buf() };

        let runtime_dir = std::env::var("XDG_RUNTIME_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("/tmp"));

        Ok(BridgePaths { config_dir, runtime_dir })
    }

    pub fn default() -> Result<Self> {
        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from(std::env::var("HOME").context("Neither XDG_CONFIG_HOME nor HOME is set")?).join(".config"),
        }
        .join("nuvola-bridge");

        Self::from_config_dir(config_dir)
    }

    pub fn get_config_file(&self) -> PathBuf {
        self.config_dir.join("bridge.json")
    }

    /// Socket used when neither the command line nor the configuration names one.
    pub fn get_default_socket_file(&self) -> PathBuf {
        self.runtime_dir.join("nuvola-bridge.sock")
    }
}

impl std::fmt::Display for BridgePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config-dir: {}, runtime-dir: {}", self.config_dir.display(), self.runtime_dir.display())
    }
}
