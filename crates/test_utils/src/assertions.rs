//! Custom Test Assertions
//!
//! Assertion helpers for premium breakdowns that report which identity
//! failed instead of a bare `left != right`.

use rust_decimal::Decimal;

use core_kernel::{Money, CURRENCY_DP};
use domain_rating::PremiumBreakdown;

/// Asserts that a Money value equals a decimal amount
pub fn assert_money_eq(actual: &Money, expected: Decimal, label: &str) {
    assert_eq!(
        actual.amount(),
        expected,
        "{}: expected {}, got {}",
        label,
        expected,
        actual.amount()
    );
}

/// Asserts that a Money value carries at most two decimal places
pub fn assert_two_dp(money: &Money, label: &str) {
    assert_eq!(
        money.round_half_up().amount(),
        money.amount(),
        "{} is not rounded to {} decimal places: {}",
        label,
        CURRENCY_DP,
        money.amount()
    );
}

/// Asserts the arithmetic identities every breakdown must satisfy
///
/// # Panics
///
/// Panics naming the first identity that does not hold
pub fn assert_breakdown_consistent(breakdown: &PremiumBreakdown) {
    let amounts = [
        (&breakdown.basic_premium, "basic_premium"),
        (&breakdown.add_on_premium, "add_on_premium"),
        (&breakdown.discount_amount, "discount_amount"),
        (&breakdown.subtotal, "subtotal"),
        (&breakdown.loading_amount, "loading_amount"),
        (&breakdown.terrorism_premium, "terrorism_premium"),
        (&breakdown.net_premium, "net_premium"),
        (&breakdown.cgst, "cgst"),
        (&breakdown.sgst, "sgst"),
    ];
    for (amount, label) in amounts {
        assert_two_dp(amount, label);
        assert!(!amount.is_negative(), "{} is negative: {}", label, amount.amount());
    }

    let line_total: Money = breakdown.add_on_lines.iter().map(|line| line.premium).sum();
    assert_eq!(line_total, breakdown.add_on_premium, "add-on lines do not sum to add_on_premium");

    assert_eq!(
        breakdown.subtotal,
        breakdown.basic_premium + breakdown.add_on_premium - breakdown.discount_amount,
        "subtotal != basic + add-on - discount"
    );

    let rated = breakdown.subtotal + breakdown.loading_amount + breakdown.terrorism_premium;
    if breakdown.minimum_premium_applied {
        assert!(
            rated < breakdown.net_premium,
            "floor applied but rated premium {} is not below net",
            rated
        );
    } else {
        assert_eq!(rated, breakdown.net_premium, "net != subtotal + loading + terrorism");
    }

    assert_eq!(
        breakdown.gross_premium,
        (breakdown.net_premium + breakdown.cgst + breakdown.sgst + breakdown.stamp_duty)
            .round_half_up(),
        "gross != net + CGST + SGST + stamp duty"
    );
}
