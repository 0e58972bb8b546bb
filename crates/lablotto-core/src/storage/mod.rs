mod config;
pub mod database;
pub mod safe;

pub use config::{AgentConfig, Config, RewardsConfig, StorageConfig};
pub use database::{Database, MemoryBackend};
pub use safe::SafeStorage;

use std::path::PathBuf;

use crate::error::{ConfigError, StorageError};

/// Primary key/value persistence used underneath [`SafeStorage`].
///
/// Implementations may fail on any call; `SafeStorage` absorbs the errors.
pub trait KvBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/lablotto[-dev]/` based on LABLOTTO_ENV.
///
/// Set LABLOTTO_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LABLOTTO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lablotto-dev")
    } else {
        base_dir.join("lablotto")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
