//! Premium request
//!
//! What a caller asks to be rated. Codes arrive as raw strings so that an
//! unknown or empty product code is reported as `InvalidProductCode` by the
//! composer rather than failing deserialisation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, MoneyError};

use crate::addons::{AddOnSelection, PaSelection};

/// A named sum-insured component beyond building and contents
/// (stock, plant and machinery, and so on)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumInsuredComponent {
    pub label: String,
    pub amount: Decimal,
}

/// Input to a premium calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumRequest {
    pub product_code: String,
    pub occupancy_code: String,
    #[serde(default)]
    pub building_sum_insured: Decimal,
    #[serde(default)]
    pub contents_sum_insured: Decimal,
    #[serde(default)]
    pub additional_sums_insured: Vec<SumInsuredComponent>,
    #[serde(default)]
    pub add_ons: Vec<AddOnSelection>,
    #[serde(default)]
    pub personal_accident: PaSelection,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub loading_percent: Decimal,
}

impl PremiumRequest {
    /// A request with no cover amounts, add-ons or adjustments
    pub fn new(product_code: impl Into<String>, occupancy_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            occupancy_code: occupancy_code.into(),
            building_sum_insured: Decimal::ZERO,
            contents_sum_insured: Decimal::ZERO,
            additional_sums_insured: Vec::new(),
            add_ons: Vec::new(),
            personal_accident: PaSelection::default(),
            discount_percent: Decimal::ZERO,
            loading_percent: Decimal::ZERO,
        }
    }

    /// Building + contents + every additional component
    ///
    /// # Errors
    ///
    /// `MoneyError::Overflow` if the total does not fit a decimal
    pub fn total_sum_insured(&self) -> Result<Money, MoneyError> {
        let base = Money::new(self.building_sum_insured)
            .checked_add(Money::new(self.contents_sum_insured))?;
        self.additional_sums_insured
            .iter()
            .try_fold(base, |total, component| total.checked_add(Money::new(component.amount)))
    }

    /// Every sum insured in the request with a label, for validation
    pub(crate) fn labelled_sums_insured(&self) -> impl Iterator<Item = (String, Decimal)> + '_ {
        [
            ("building_sum_insured".to_string(), self.building_sum_insured),
            ("contents_sum_insured".to_string(), self.contents_sum_insured),
        ]
        .into_iter()
        .chain(
            self.additional_sums_insured
                .iter()
                .map(|c| (format!("additional sum insured '{}'", c.label), c.amount)),
        )
        .chain(
            self.add_ons
                .iter()
                .map(|a| (format!("add-on {} sum insured", a.code), a.sum_insured)),
        )
    }
}
