//! Unit tests for the Money and rate types
//!
//! Tests cover construction, half-up rounding at the currency scale,
//! per-mille and percentage application, and summation order.

use core_kernel::{Money, MoneyError, PerMille, Percentage};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_full_precision() {
        let m = Money::new(dec!(100.123456789));
        assert_eq!(m.amount(), dec!(100.123456789));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        let err = Money::non_negative(dec!(-0.01)).unwrap_err();
        assert!(matches!(err, MoneyError::InvalidAmount(_)));
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_half_up_on_exact_midpoint() {
        assert_eq!(Money::new(dec!(2.675)).round_half_up().amount(), dec!(2.68));
        assert_eq!(Money::new(dec!(2.665)).round_half_up().amount(), dec!(2.67));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(Money::new(dec!(2.6749)).round_half_up().amount(), dec!(2.67));
    }

    #[test]
    fn test_negative_midpoint_rounds_away_from_zero() {
        assert_eq!(Money::new(dec!(-2.675)).round_half_up().amount(), dec!(-2.68));
    }

    #[test]
    fn test_round_then_sum_differs_from_sum_then_round() {
        let basic = Money::new(dec!(12.345));
        let add_on = Money::new(dec!(7.005));

        let round_then_sum = basic.round_half_up() + add_on.round_half_up();
        let sum_then_round = (basic + add_on).round_half_up();

        assert_eq!(round_then_sum.amount(), dec!(19.36));
        assert_eq!(sum_then_round.amount(), dec!(19.35));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_per_mille_on_large_sum_insured() {
        let si = Money::new(dec!(10000000));
        let premium = PerMille::new(dec!(0.07)).apply(&si).unwrap().round_half_up();
        assert_eq!(premium.amount(), dec!(700.00));
    }

    #[test]
    fn test_per_mille_positivity() {
        assert!(PerMille::new(dec!(0.01)).is_positive());
        assert!(!PerMille::zero().is_positive());
        assert!(!PerMille::new(dec!(-1)).is_positive());
    }

    #[test]
    fn test_percentage_of_net_premium() {
        let net = Money::new(dec!(272.10));
        let cgst = Percentage::new(dec!(9)).apply(&net).unwrap();
        assert_eq!(cgst.amount(), dec!(24.489));
        assert_eq!(cgst.round_half_up().amount(), dec!(24.49));
    }

    #[test]
    fn test_percentage_serialises_as_decimal() {
        let pct = Percentage::new(Decimal::new(125, 1));
        assert_eq!(serde_json::to_string(&pct).unwrap(), "\"12.5\"");
    }
}
