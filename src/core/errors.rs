use std::result::Result as StdResult;

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::services::ExchangeError;
use crate::storage::StorageError;

/// Unified error type for the domain, storage and exchange layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Import failed: {0}")]
    ImportError(String),
    #[error("Export failed: {0}")]
    ExportError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, TrackerError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<StorageError> for TrackerError {
    fn from(err: StorageError) -> Self {
        TrackerError::StorageError(err.to_string())
    }
}

impl From<ExchangeError> for TrackerError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::EmptyLedger | ExchangeError::Encode(_) | ExchangeError::Write(_) => {
                TrackerError::ExportError(err.to_string())
            }
            ExchangeError::Read(_) | ExchangeError::Parse(_) => {
                TrackerError::ImportError(err.to_string())
            }
        }
    }
}

impl From<ConfigError> for TrackerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => TrackerError::StorageError(io.to_string()),
            ConfigError::Serde(message) | ConfigError::InvalidValue(message) => {
                TrackerError::ConfigError(message)
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(TrackerError::from(err))
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        CliError::from(TrackerError::from(err))
    }
}
