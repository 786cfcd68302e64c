//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;
use core_kernel::{OccupancyCode, Percentage};
use rust_decimal_macros::dec;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("minimum premium must be positive");
    assert!(error.to_string().starts_with("Configuration error"));
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = Percentage::bounded(dec!(120)).unwrap_err();
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(MoneyError::InvalidRate(_))));
    assert!(core_error.to_string().contains("120"));
}

#[test]
fn test_empty_code_is_validation_error() {
    let error = OccupancyCode::parse("").unwrap_err();
    assert!(matches!(error, CoreError::Validation(_)));
    assert!(error.to_string().contains("occupancy code"));
}
