//! Product variant policy
//!
//! A static, code-defined table of the switches that differ between fire
//! product families: whether terrorism cover is carried and how it is
//! rated, which occupancies a product may be written for, and what happens
//! when the rate store has no basic rate.
//!
//! | Family     | Products                    | Terrorism        | Occupancies  | No basic rate |
//! |------------|-----------------------------|------------------|--------------|---------------|
//! | Home       | BGRP, UBGR                  | fixed 0.07‰      | 1001, 1001_2 | error         |
//! | Value home | UVGR, UVGS                  | not carried      | 1001, 1001_2 | error         |
//! | Industrial | SFSP, IAR                   | slab by total SI | open         | keyword table |
//! | Business   | VUSP, BSUSP, BLUSP, aliases | slab by total SI | open         | keyword table |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{OccupancyCode, PerMille, ProductCode};

use crate::error::RatingError;

/// Occupancy codes residential products may be written for:
/// dwellings (1001) and co-operative housing societies (1001_2).
pub const RESIDENTIAL_OCCUPANCIES: &[&str] = &["1001", "1001_2"];

/// Mandatory terrorism rate for residential home products
pub const RESIDENTIAL_TERRORISM_RATE: Decimal = dec!(0.07);

/// Basic rate used for commercial products when no fallback keyword matches
pub const COMMERCIAL_FALLBACK_BASIC_RATE: Decimal = dec!(0.15);

/// Fallback basic rates for SFSP and IAR, by occupancy description keyword
pub const INDUSTRIAL_FALLBACK_RATES: &[(&str, Decimal)] = &[
    ("Factory", dec!(0.60)),
    ("Plant", dec!(0.75)),
    ("Warehouse", dec!(0.40)),
];

/// Fallback basic rates for the udyam and bharat sookshma/laghu products
pub const BUSINESS_FALLBACK_RATES: &[(&str, Decimal)] = &[
    ("Office", dec!(0.20)),
    ("Residential", dec!(0.16)),
    ("Hospital", dec!(0.22)),
    ("Shop", dec!(0.25)),
];

/// Product family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFamily {
    ResidentialHome,
    ValueHome,
    Commercial,
}

/// How terrorism cover is rated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrorismMode {
    /// Looked up from the product's slabs by occupancy type and total SI
    SlabBySumInsured,
    /// A fixed rate tied to the product
    FixedMandatory(PerMille),
}

/// Basic rates to use when the store has none, chosen by occupancy description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRates {
    /// `(keyword, rate)` pairs tried in order. A keyword matches when the
    /// occupancy description contains it, ignoring case.
    pub by_description: Vec<(String, PerMille)>,
    /// Rate when no keyword matches or the description is unknown
    pub default: PerMille,
}

impl FallbackRates {
    /// Builds a table from keyword pairs with the commercial default
    pub fn from_table(table: &[(&str, Decimal)]) -> Self {
        Self {
            by_description: table
                .iter()
                .map(|(keyword, rate)| (keyword.to_string(), PerMille::new(*rate)))
                .collect(),
            default: PerMille::new(COMMERCIAL_FALLBACK_BASIC_RATE),
        }
    }

    /// Rate for an occupancy description; the first matching keyword wins
    pub fn rate_for(&self, description: Option<&str>) -> PerMille {
        let Some(description) = description.map(str::to_lowercase) else {
            return self.default;
        };
        self.by_description
            .iter()
            .find(|(keyword, _)| description.contains(&keyword.to_lowercase()))
            .map(|(_, rate)| *rate)
            .unwrap_or(self.default)
    }
}

/// What to do when no basic rate is configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicRatePolicy {
    /// A missing basic rate fails the quote
    Required,
    /// A missing basic rate is taken from a fallback table
    FallbackTo(FallbackRates),
}

/// Static switches for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub product_code: ProductCode,
    pub family: ProductFamily,
    /// `None` when terrorism cover is not carried
    pub terrorism: Option<TerrorismMode>,
    /// `None` when any occupancy is accepted
    pub restricted_occupancies: Option<Vec<OccupancyCode>>,
    pub basic_rate_policy: BasicRatePolicy,
}

impl ProductVariant {
    fn for_family(product_code: ProductCode, family: ProductFamily) -> Self {
        let restricted = || {
            RESIDENTIAL_OCCUPANCIES
                .iter()
                .filter_map(|code| OccupancyCode::parse(code).ok())
                .collect::<Vec<_>>()
        };

        match family {
            ProductFamily::ResidentialHome => Self {
                product_code,
                family,
                terrorism: Some(TerrorismMode::FixedMandatory(PerMille::new(
                    RESIDENTIAL_TERRORISM_RATE,
                ))),
                restricted_occupancies: Some(restricted()),
                basic_rate_policy: BasicRatePolicy::Required,
            },
            ProductFamily::ValueHome => Self {
                product_code,
                family,
                terrorism: None,
                restricted_occupancies: Some(restricted()),
                basic_rate_policy: BasicRatePolicy::Required,
            },
            ProductFamily::Commercial => {
                let fallback = FallbackRates::from_table(fallback_table(&product_code));
                Self {
                    product_code,
                    family,
                    terrorism: Some(TerrorismMode::SlabBySumInsured),
                    restricted_occupancies: None,
                    basic_rate_policy: BasicRatePolicy::FallbackTo(fallback),
                }
            }
        }
    }

    /// Returns true if this product carries terrorism cover
    pub fn carries_terrorism(&self) -> bool {
        self.terrorism.is_some()
    }

    /// Returns true if the product may be written for this occupancy
    pub fn permits_occupancy(&self, occupancy: &OccupancyCode) -> bool {
        match &self.restricted_occupancies {
            Some(allowed) => allowed.contains(occupancy),
            None => true,
        }
    }
}

/// Fallback keyword table for a commercial product
fn fallback_table(product_code: &ProductCode) -> &'static [(&'static str, Decimal)] {
    match product_code.as_str() {
        "SFSP" | "IAR" => INDUSTRIAL_FALLBACK_RATES,
        _ => BUSINESS_FALLBACK_RATES,
    }
}

/// Lookup of product variants by product code
pub struct ProductVariantPolicy;

impl ProductVariantPolicy {
    /// Product codes the engine can rate
    pub const PRODUCT_CODES: &'static [&'static str] = &[
        "BGRP", "UBGR", "UVGR", "UVGS", "SFSP", "IAR", "BSUSP", "BLUSP", "VUSP", "BSUS", "BLUS",
        "UVUS",
    ];

    /// Returns the family for a product code, if known
    pub fn family_of(product_code: &ProductCode) -> Option<ProductFamily> {
        match product_code.as_str() {
            "BGRP" | "UBGR" => Some(ProductFamily::ResidentialHome),
            "UVGR" | "UVGS" => Some(ProductFamily::ValueHome),
            "SFSP" | "IAR" | "BSUSP" | "BLUSP" | "VUSP" | "BSUS" | "BLUS" | "UVUS" => {
                Some(ProductFamily::Commercial)
            }
            _ => None,
        }
    }

    /// Looks up the variant for a product code
    ///
    /// # Errors
    ///
    /// Returns `RatingError::InvalidProductCode` for codes outside the table
    pub fn lookup(product_code: &ProductCode) -> Result<ProductVariant, RatingError> {
        Self::family_of(product_code)
            .map(|family| ProductVariant::for_family(product_code.clone(), family))
            .ok_or_else(|| RatingError::InvalidProductCode(product_code.to_string()))
    }

    /// Parses a raw product code and looks up its variant
    pub fn lookup_str(raw: &str) -> Result<ProductVariant, RatingError> {
        let code = ProductCode::parse(raw)
            .map_err(|_| RatingError::InvalidProductCode(raw.to_string()))?;
        Self::lookup(&code)
    }
}
