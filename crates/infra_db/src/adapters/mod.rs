//! Domain Adapters
//!
//! PostgreSQL implementations of the rating domain ports. Each adapter:
//! - Implements a port trait from `domain_rating`
//! - Translates between repository rows and domain types
//! - Converts `DatabaseError` into `PortError`
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresQuoteSink, PostgresRateStore};
//!
//! let store: Arc<dyn RateStore> = Arc::new(PostgresRateStore::new(pool.clone()));
//! let sink: Arc<dyn QuoteSink> = Arc::new(PostgresQuoteSink::new(pool));
//! ```

pub mod rate_store;
pub mod quote_sink;

pub use rate_store::PostgresRateStore;
pub use quote_sink::PostgresQuoteSink;
