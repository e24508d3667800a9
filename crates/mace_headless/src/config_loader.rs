//! Tuning file loading.
//!
//! The core only parses RON from strings; reading files from disk happens
//! here.

use std::fs;
use std::path::Path;

use mace_core::config::MaceConfig;
use mace_core::error::MaceError;
use thiserror::Error;

/// Error type for config loading.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// Failed to read file.
    #[error("Failed to read config {0}: {1}")]
    IoError(String, String),
    /// The file parsed but was rejected.
    #[error("Config {0}: {1}")]
    Rejected(String, MaceError),
}

/// Load and validate a tuning file.
pub fn load_config(path: &Path) -> Result<MaceConfig, ConfigLoadError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigLoadError::IoError(path.display().to_string(), e.to_string()))?;

    let config = MaceConfig::from_ron_str(&content)
        .map_err(|e| ConfigLoadError::Rejected(path.display().to_string(), e))?;

    tracing::debug!("Loaded tuning from {:?}", path);
    Ok(config)
}
