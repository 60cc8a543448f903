//! Error types for DhruvaRecovery

use thiserror::Error;

/// DhruvaRecovery error type
#[derive(Error, Debug)]
pub enum RecoveryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Planner parameter error: {0}")]
    Planner(String),
}

impl From<toml::de::Error> for RecoveryError {
    fn from(e: toml::de::Error) -> Self {
        RecoveryError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecoveryError>;
