//! Repository implementations for the rating tables
//!
//! Repositories own the SQL and return plain row types. Turning rows into
//! domain values (parsing rules, rate kinds and occupancy types) is the
//! adapters' job.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate compiles
//! without a live database.

pub mod rates;
pub mod quotes;

pub use rates::{AddOnRateDbRow, RateRepository, TerrorismSlabRow};
pub use quotes::{NewQuote, QuoteRepository, QuoteRow};
