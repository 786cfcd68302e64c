//! Rating domain errors
//!
//! Every way a premium calculation can fail. `AddOnRateNotFound` exists so
//! lookups can report a missing add-on precisely, but the composer never
//! lets it fail a quote.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{CoreError, MoneyError, PortError};

use crate::rates::OccupancyType;

/// Errors that can occur while rating a fire quote
#[derive(Debug, Error)]
pub enum RatingError {
    /// Product code is not in the variant table
    #[error("Invalid product code: {0}")]
    InvalidProductCode(String),

    /// No basic rate configured for the product and occupancy
    #[error("Basic rate not configured for {product}/{occupancy}")]
    RateNotFound {
        product: String,
        occupancy: String,
    },

    /// No terrorism slab covers the total sum insured
    #[error(
        "Terrorism rate not configured for {product}/{occupancy_type} at sum insured {sum_insured}"
    )]
    TerrorismRateNotConfigured {
        product: String,
        occupancy_type: String,
        sum_insured: Decimal,
    },

    /// No add-on rate row matched; never fatal to a quote
    #[error("Add-on rate not found for {product}/{add_on} (occupancy {occupancy})")]
    AddOnRateNotFound {
        product: String,
        add_on: String,
        occupancy: String,
    },

    /// The store has no occupancy type for this occupancy code
    #[error("Unknown occupancy code: {0}")]
    UnknownOccupancy(String),

    /// Occupancy is outside the product's restricted set
    #[error("Occupancy {occupancy} is not permitted for product {product}")]
    OccupancyNotPermitted {
        product: String,
        occupancy: String,
    },

    /// Request values are out of range
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The rate store failed
    #[error("Rate store error: {0}")]
    Store(#[from] PortError),
}

impl RatingError {
    /// Creates a basic-rate-not-found error
    pub fn rate_not_found(product: impl ToString, occupancy: impl ToString) -> Self {
        RatingError::RateNotFound {
            product: product.to_string(),
            occupancy: occupancy.to_string(),
        }
    }

    /// Creates a terrorism-rate-not-configured error
    pub fn terrorism_not_configured(
        product: impl ToString,
        occupancy_type: OccupancyType,
        sum_insured: Decimal,
    ) -> Self {
        RatingError::TerrorismRateNotConfigured {
            product: product.to_string(),
            occupancy_type: occupancy_type.to_string(),
            sum_insured,
        }
    }

    /// Creates an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        RatingError::InvalidRequest(message.into())
    }

    /// Returns true if the caller supplied a bad request rather than the
    /// rate data or store being at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RatingError::InvalidProductCode(_)
                | RatingError::OccupancyNotPermitted { .. }
                | RatingError::InvalidRequest(_)
                | RatingError::UnknownOccupancy(_)
        )
    }
}

/// Amounts too large to rate are the caller's problem
impl From<MoneyError> for RatingError {
    fn from(error: MoneyError) -> Self {
        RatingError::InvalidRequest(error.to_string())
    }
}

impl From<CoreError> for RatingError {
    fn from(error: CoreError) -> Self {
        RatingError::InvalidRequest(error.to_string())
    }
}
