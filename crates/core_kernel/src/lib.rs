//! Core Kernel - Foundational types for fire rating
//!
//! This crate provides the building blocks shared by the rating domain,
//! its adapters and the quote service:
//! - Money, per-mille and percentage types with round-half-up arithmetic
//! - Typed catalogue codes and quote identifiers
//! - Port error type and marker trait for hexagonal adapters

pub mod money;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, MoneyError, PerMille, Percentage, CURRENCY_CODE, CURRENCY_DP};
pub use identifiers::{QuoteId, ProductCode, OccupancyCode, AddOnCode};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
