//! Rating configuration
//!
//! Constants of the tax regime and tariff that sit outside the rate tables.
//! Defaults are the values the products are filed with.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, Money, Percentage};

/// Tariff constants applied after the rated premium is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Net premium is raised to this amount when below it
    pub minimum_premium: Decimal,
    /// Flat stamp duty added to the gross premium
    pub stamp_duty: Decimal,
    /// Central GST rate in percent
    pub cgst_percent: Decimal,
    /// State GST rate in percent
    pub sgst_percent: Decimal,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            minimum_premium: dec!(50),
            stamp_duty: dec!(1.0),
            cgst_percent: dec!(9),
            sgst_percent: dec!(9),
        }
    }
}

impl RatingConfig {
    /// Checks that every constant is usable
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.minimum_premium.is_sign_negative() {
            return Err(CoreError::configuration("minimum_premium must not be negative"));
        }
        if self.stamp_duty.is_sign_negative() {
            return Err(CoreError::configuration("stamp_duty must not be negative"));
        }
        Percentage::bounded(self.cgst_percent)?;
        Percentage::bounded(self.sgst_percent)?;
        Ok(())
    }

    pub fn minimum_premium(&self) -> Money {
        Money::new(self.minimum_premium)
    }

    pub fn stamp_duty(&self) -> Money {
        Money::new(self.stamp_duty)
    }

    pub fn cgst(&self) -> Percentage {
        Percentage::new(self.cgst_percent)
    }

    pub fn sgst(&self) -> Percentage {
        Percentage::new(self.sgst_percent)
    }
}
