//! Client configuration: where the client talks to and where the durable
//! session token lives.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub token_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            token_path: default_token_path(),
        }
    }
}

/// Token file under the platform config dir.
pub fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("corkboard")
        .join("token")
}

/// Will always return a config, falling back to the default when the file is
/// missing or unreadable.
pub fn load_config_from_file(config_path: &PathBuf) -> ClientConfig {
    match std::fs::read_to_string(config_path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid config file, using defaults");
            ClientConfig::default()
        }),
        Err(_) => {
            tracing::info!("No config file found, using defaults");
            ClientConfig::default()
        }
    }
}

/// Saves the config to the given path as pretty JSON, creating parent
/// directories as needed.
pub fn save_config_to_file(config: &ClientConfig, config_path: &PathBuf) -> Result<(), ConfigError> {
    let raw = serde_json::to_string_pretty(config)?;
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, raw)?;
    Ok(())
}
