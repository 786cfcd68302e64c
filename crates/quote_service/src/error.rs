//! Service error handling

use thiserror::Error;

/// Errors raised while wiring up or running the quote service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl ServiceError {
    /// Creates an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ServiceError::InvalidConfig(message.into())
    }
}
