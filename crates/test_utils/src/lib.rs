//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the fire rating workspace.
//!
//! # Modules
//!
//! - `store`: In-memory rate store
//! - `sinks`: Recording and failing quote sinks
//! - `fixtures`: Standard rate tables and requests with hand-checked premiums
//! - `builders`: Premium request builder
//! - `database`: PostgreSQL test container with schema and standard rates
//! - `assertions`: Breakdown consistency assertions
//! - `generators`: Property-based test data generators

pub mod store;
pub mod sinks;
pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use store::*;
pub use sinks::*;
pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
