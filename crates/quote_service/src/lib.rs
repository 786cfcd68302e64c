//! Fire Quote Service
//!
//! The application layer around the rating engine:
//!
//! - **QuoteService**: computes a premium and saves the quote, best effort
//! - **AppConfig**: configuration from `.env` and `FIRE_QUOTE_*` variables
//! - **Telemetry**: tracing subscriber setup (pretty or JSON)
//!
//! The `fire-quote` binary wires these to the PostgreSQL adapters.
//!
//! # Example
//!
//! ```rust,ignore
//! use quote_service::{AppConfig, QuoteService};
//!
//! let config = AppConfig::from_env()?;
//! let pool = infra_db::create_pool(&config.database).await?;
//! let store = Arc::new(PostgresRateStore::new(pool.clone()));
//! let composer = PremiumComposer::new(store, config.rating);
//! let service = QuoteService::new(composer, Arc::new(PostgresQuoteSink::new(pool)));
//!
//! let outcome = service.quote(&request).await?;
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::AppConfig;
pub use error::ServiceError;
pub use service::{quote_record, QuoteOutcome, QuoteService};
pub use telemetry::{init_tracing, LogFormat};
