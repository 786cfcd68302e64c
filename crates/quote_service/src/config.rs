//! Application configuration
//!
//! Loaded from the environment after an optional `.env` file. Variables use
//! the `FIRE_QUOTE_` prefix and `__` between nested keys:
//!
//! ```text
//! FIRE_QUOTE_LOG_LEVEL=debug
//! FIRE_QUOTE_LOG_FORMAT=json
//! FIRE_QUOTE_DATABASE__URL=postgres://rates@db/fire_rating
//! FIRE_QUOTE_DATABASE__MAX_CONNECTIONS=20
//! FIRE_QUOTE_RATING__MINIMUM_PREMIUM=50
//! FIRE_QUOTE_RATING__STAMP_DUTY=1.0
//! ```

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use domain_rating::RatingConfig;
use infra_db::DatabaseConfig;

use crate::error::ServiceError;
use crate::telemetry::LogFormat;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FIRE_QUOTE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
    pub log_format: LogFormat,
    /// Persist computed quotes to the quote log
    pub save_quotes: bool,
    pub database: DatabaseConfig,
    pub rating: RatingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            save_quotes: true,
            database: DatabaseConfig::default(),
            rating: RatingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then the process environment
    pub fn from_env() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok();
        Self::from_environment(Self::environment())
    }

    /// The environment source with this application's naming rules
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Builds and validates configuration from an environment source
    pub fn from_environment(environment: Environment) -> Result<Self, ServiceError> {
        let config: AppConfig = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks every nested section
    pub fn validate(&self) -> Result<(), ServiceError> {
        self.rating
            .validate()
            .map_err(|e| ServiceError::invalid_config(format!("rating: {}", e)))?;
        self.database
            .validate()
            .map_err(|e| ServiceError::invalid_config(format!("database: {}", e)))?;
        Ok(())
    }
}
