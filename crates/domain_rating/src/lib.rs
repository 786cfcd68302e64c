//! Fire Rating Domain
//!
//! Computes itemised fire insurance premiums for residential, value-home and
//! commercial/industrial products. The domain layer is infrastructure-agnostic:
//! rates come in through the [`RateStore`] port and finished quotes leave
//! through the [`QuoteSink`] port.
//!
//! # Components
//!
//! - **ProductVariantPolicy**: per-family switches (terrorism, occupancy
//!   restrictions, basic-rate fallback)
//! - **RateResolver**: basic, terrorism and add-on rate lookups
//! - **AddOnAggregator**: prices add-on selections and PA covers
//! - **PremiumComposer**: runs the premium pipeline end to end
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_rating::{PremiumComposer, PremiumRequest, RatingConfig};
//!
//! let composer = PremiumComposer::new(store, RatingConfig::default());
//!
//! let mut request = PremiumRequest::new("UBGR", "1001");
//! request.building_sum_insured = dec!(1000000);
//! request.contents_sum_insured = dec!(200000);
//! request.discount_percent = dec!(5);
//! request.loading_percent = dec!(10);
//!
//! let breakdown = composer.compute_premium(&request).await?;
//! assert_eq!(breakdown.gross_premium.amount(), dec!(322.08));
//! ```

pub mod addons;
pub mod breakdown;
pub mod composer;
pub mod config;
pub mod error;
pub mod ports;
pub mod product;
pub mod rates;
pub mod request;
pub mod resolver;

pub use addons::{
    AddOnAggregator, AddOnLine, AddOnSelection, AddOnTotal, PaSelection, PA_PROPOSER, PA_SPOUSE,
};
pub use breakdown::PremiumBreakdown;
pub use composer::PremiumComposer;
pub use config::RatingConfig;
pub use error::RatingError;
pub use ports::{QuoteRecord, QuoteSink, RateStore};
pub use product::{
    BasicRatePolicy, FallbackRates, ProductFamily, ProductVariant, ProductVariantPolicy,
    TerrorismMode,
};
pub use rates::{
    AddOnRateRow, OccupancyRule, OccupancyType, RateKind, RateParseError, RateQuery, ResolvedRate,
    TerrorismSlab,
};
pub use request::{PremiumRequest, SumInsuredComponent};
pub use resolver::RateResolver;
