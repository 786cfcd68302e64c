//! Premium breakdown
//!
//! The result of one calculation: every intermediate amount, the rates that
//! produced them, and the inputs they were computed from. Serialised as-is
//! into quote records, so field names are part of the stored format.

use serde::{Deserialize, Serialize};

use core_kernel::{Money, OccupancyCode, PerMille, Percentage, ProductCode};

use crate::addons::AddOnLine;

/// Itemised premium for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub product_code: ProductCode,
    pub occupancy_code: OccupancyCode,
    pub total_sum_insured: Money,

    pub basic_rate: PerMille,
    pub basic_premium: Money,

    pub add_on_premium: Money,
    pub add_on_lines: Vec<AddOnLine>,

    pub discount_percent: Percentage,
    pub discount_amount: Money,
    pub subtotal: Money,

    pub loading_percent: Percentage,
    pub loading_amount: Money,

    /// Zero when the product does not carry terrorism cover
    pub terrorism_rate: PerMille,
    /// Always present; zero when the product does not carry terrorism cover
    pub terrorism_premium: Money,

    pub net_premium: Money,
    /// True when `net_premium` was raised to the minimum premium
    pub minimum_premium_applied: bool,

    pub cgst: Money,
    pub sgst: Money,
    pub stamp_duty: Money,
    pub gross_premium: Money,
}

impl PremiumBreakdown {
    /// CGST + SGST
    pub fn total_tax(&self) -> Money {
        self.cgst + self.sgst
    }

    /// Premium before taxes and the minimum floor
    pub fn rated_premium(&self) -> Money {
        self.subtotal + self.loading_amount + self.terrorism_premium
    }
}
