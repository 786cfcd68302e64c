//! Money and rate types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of premium amounts and
//! the two rate conventions used in fire rating (per mille and percentage),
//! using rust_decimal so no calculation ever passes through floating point.
//!
//! All quoting happens in a single currency (INR). Rounding is always
//! round-half-up (midpoint away from zero) to two decimal places, which is
//! what the rating tables and historical quotes were produced with.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use thiserror::Error;

/// ISO 4217 code of the quoting currency
pub const CURRENCY_CODE: &str = "INR";

/// Number of decimal places premiums are rounded to
pub const CURRENCY_DP: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Amount out of range: {0}")]
    Overflow(String),
}

/// A monetary amount in the quoting currency
///
/// Amounts are kept exact on construction. Rounding only happens where the
/// caller asks for it through [`Money::round_half_up`], so a pipeline can
/// decide precisely which intermediates get rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Creates a non-negative amount, rejecting negative input
    pub fn non_negative(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::InvalidAmount(format!(
                "{} must not be negative",
                amount
            )));
        }
        Ok(Self::new(amount))
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Adds two amounts, failing instead of overflowing
    pub fn checked_add(&self, other: Money) -> Result<Self, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(Self::new)
            .ok_or_else(|| MoneyError::Overflow(format!("{} + {}", self.amount, other.amount)))
    }

    /// Rounds to two decimal places, midpoints away from zero
    ///
    /// `12.345` becomes `12.35` and `-0.005` becomes `-0.01`. This differs from
    /// `Decimal::round_dp`, which rounds midpoints to even.
    pub fn round_half_up(&self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹ {:.2}", self.amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount + other.amount)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.amount - other.amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// A rate expressed per thousand units of sum insured (‰)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerMille {
    value: Decimal,
}

impl PerMille {
    /// Creates a per-mille rate (e.g. 0.15 for 0.15‰)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Zero rate
    pub fn zero() -> Self {
        Self { value: dec!(0) }
    }

    /// Returns the rate value
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the rate is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.value > dec!(0)
    }

    /// Applies this rate to an amount: `amount × rate / 1000`, unrounded
    pub fn apply(&self, amount: &Money) -> Result<Money, MoneyError> {
        scale(amount, self.value, dec!(1000))
    }
}

impl fmt::Display for PerMille {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}‰", self.value)
    }
}

/// A percentage (e.g. 5 for 5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage {
    value: Decimal,
}

impl Percentage {
    /// Creates a percentage from its value in percent
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Zero percent
    pub fn zero() -> Self {
        Self { value: dec!(0) }
    }

    /// Creates a percentage constrained to `0..=100`
    pub fn bounded(value: Decimal) -> Result<Self, MoneyError> {
        if value < dec!(0) || value > dec!(100) {
            return Err(MoneyError::InvalidRate(format!(
                "{}% is outside 0..=100",
                value
            )));
        }
        Ok(Self::new(value))
    }

    /// Returns the value in percent
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Applies this percentage to an amount: `amount × pct / 100`, unrounded
    pub fn apply(&self, amount: &Money) -> Result<Money, MoneyError> {
        scale(amount, self.value, dec!(100))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value)
    }
}

fn scale(amount: &Money, rate: Decimal, per: Decimal) -> Result<Money, MoneyError> {
    amount
        .amount()
        .checked_mul(rate)
        .map(|product| Money::new(product / per))
        .ok_or_else(|| MoneyError::Overflow(format!("{} × {}/{}", amount.amount(), rate, per)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_midpoints() {
        assert_eq!(Money::new(dec!(12.345)).round_half_up().amount(), dec!(12.35));
        assert_eq!(Money::new(dec!(7.005)).round_half_up().amount(), dec!(7.01));
        assert_eq!(Money::new(dec!(24.489)).round_half_up().amount(), dec!(24.49));
        assert_eq!(Money::new(dec!(0.125)).round_half_up().amount(), dec!(0.13));
    }

    #[test]
    fn test_round_half_up_differs_from_bankers() {
        let amount = dec!(0.125);
        assert_eq!(amount.round_dp(2), dec!(0.12));
        assert_eq!(Money::new(amount).round_half_up().amount(), dec!(0.13));
    }

    #[test]
    fn test_non_negative() {
        assert!(Money::non_negative(dec!(0)).is_ok());
        assert!(Money::non_negative(dec!(100)).is_ok());
        assert!(matches!(
            Money::non_negative(dec!(-1)),
            Err(MoneyError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_money_sum() {
        let items = vec![Money::new(dec!(1.10)), Money::new(dec!(2.20)), Money::new(dec!(3.30))];
        let total: Money = items.iter().sum();
        assert_eq!(total.amount(), dec!(6.60));
    }

    #[test]
    fn test_per_mille_application() {
        let si = Money::new(dec!(1200000));
        let premium = PerMille::new(dec!(0.15)).apply(&si).unwrap();
        assert_eq!(premium.amount(), dec!(180));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = Money::new(Decimal::MAX);
        assert!(matches!(huge.checked_add(Money::new(dec!(1))), Err(MoneyError::Overflow(_))));
        assert!(matches!(PerMille::new(dec!(2000)).apply(&huge), Err(MoneyError::Overflow(_))));
        assert!(matches!(Percentage::new(dec!(200)).apply(&huge), Err(MoneyError::Overflow(_))));
        assert_eq!(
            Money::new(dec!(1.10)).checked_add(Money::new(dec!(2.20))).unwrap().amount(),
            dec!(3.30)
        );
    }

    #[test]
    fn test_percentage_application() {
        let base = Money::new(dec!(180));
        assert_eq!(Percentage::new(dec!(5)).apply(&base).unwrap().amount(), dec!(9));
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(Percentage::bounded(dec!(0)).is_ok());
        assert!(Percentage::bounded(dec!(100)).is_ok());
        assert!(Percentage::bounded(dec!(100.01)).is_err());
        assert!(Percentage::bounded(dec!(-0.5)).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(322.08)).to_string(), "₹ 322.08");
        assert_eq!(PerMille::new(dec!(0.07)).to_string(), "0.07‰");
    }
}
