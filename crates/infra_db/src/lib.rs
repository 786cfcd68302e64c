//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the fire rating engine using SQLx:
//!
//! - **Rate tables**: `product_basic_rates`, `occupancies`, `terrorism_slabs`,
//!   `add_on_rates` and `add_on_master`, read through [`PostgresRateStore`]
//! - **Quote log**: `irisk_quotes`, written through [`PostgresQuoteSink`]
//!
//! The schema lives in `migrations/` at the workspace root.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresRateStore};
//!
//! let pool = create_pool(&DatabaseConfig::new("postgres://localhost/fire_rating")).await?;
//! let store = PostgresRateStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use adapters::{PostgresQuoteSink, PostgresRateStore};
