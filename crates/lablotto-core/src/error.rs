//! Core error types for lablotto-core.
//!
//! Storage failures never reach callers of the rewards store (they are
//! absorbed by [`SafeStorage`](crate::storage::SafeStorage)); the errors
//! below cover opening backends, configuration and the agent endpoint.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lablotto-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Agent endpoint errors
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),
}

/// Errors raised by a [`KvBackend`](crate::storage::KvBackend).
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open storage at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Backend refused the write (quota exceeded, access denied)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Database is locked
    #[error("Storage is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors talking to the chat/analysis endpoint.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Transport failure or timeout
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Agent endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// Body did not match either accepted response shape
    #[error("Malformed agent response: {0}")]
    MalformedResponse(String),

    /// Endpoint URL could not be parsed
    #[error("Invalid agent endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => match e.code {
                rusqlite::ErrorCode::DatabaseLocked | rusqlite::ErrorCode::DatabaseBusy => {
                    StorageError::Locked
                }
                rusqlite::ErrorCode::DiskFull | rusqlite::ErrorCode::ReadOnly => {
                    StorageError::Unavailable(err.to_string())
                }
                _ => StorageError::QueryFailed(err.to_string()),
            },
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
