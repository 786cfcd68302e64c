//! Rating Domain Ports
//!
//! The rating engine reads rates through [`RateStore`] and hands finished
//! quotes to a [`QuoteSink`]. Both are injected, never global:
//!
//! - **Internal Adapter**: PostgreSQL (`infra_db::adapters`)
//! - **In-memory Adapter**: for tests (`test_utils`)
//!
//! ```rust,ignore
//! let store: Arc<dyn RateStore> = Arc::new(PostgresRateStore::new(pool));
//! let composer = PremiumComposer::new(store, RatingConfig::default());
//! ```
//!
//! Reads are not transactional across calls. Rates may change between the
//! basic-rate read and the terrorism read of one calculation; the engine
//! accepts that staleness window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{AddOnCode, DomainPort, OccupancyCode, PortError, ProductCode, QuoteId};

use crate::rates::{AddOnRateRow, OccupancyType, TerrorismSlab};

/// Read-only rate lookups
#[async_trait]
pub trait RateStore: DomainPort {
    /// Basic per-mille rate for an exact (product, occupancy) match
    async fn basic_rate(
        &self,
        product: &ProductCode,
        occupancy: &OccupancyCode,
    ) -> Result<Option<Decimal>, PortError>;

    /// Occupancy type of an occupancy code
    async fn occupancy_type(
        &self,
        occupancy: &OccupancyCode,
    ) -> Result<Option<OccupancyType>, PortError>;

    /// Free-text description of an occupancy code
    async fn occupancy_description(
        &self,
        occupancy: &OccupancyCode,
    ) -> Result<Option<String>, PortError>;

    /// All terrorism slabs of a product for one occupancy type
    async fn terrorism_slabs(
        &self,
        product: &ProductCode,
        occupancy_type: OccupancyType,
    ) -> Result<Vec<TerrorismSlab>, PortError>;

    /// Add-on rate rows for (product, add-on), in lookup order
    async fn add_on_rates(
        &self,
        product: &ProductCode,
        add_on: &AddOnCode,
    ) -> Result<Vec<AddOnRateRow>, PortError>;
}

/// A computed quote as handed to persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: QuoteId,
    pub product_code: ProductCode,
    pub request_data: Value,
    pub response_data: Value,
    pub created_at: DateTime<Utc>,
}

/// Best-effort persistence of computed quotes
#[async_trait]
pub trait QuoteSink: DomainPort {
    async fn save_quote(&self, record: &QuoteRecord) -> Result<(), PortError>;
}
