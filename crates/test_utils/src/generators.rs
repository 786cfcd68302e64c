//! Property-Based Test Generators
//!
//! Proptest strategies for requests that the standard rate tables can rate.

use proptest::prelude::*;
use proptest::sample::select;
use rust_decimal::Decimal;

use domain_rating::PremiumRequest;

use crate::builders::PremiumRequestBuilder;
use crate::fixtures::{HOME_PRODUCTS, SLAB_TERRORISM_PRODUCTS};

const RESIDENTIAL_OCCUPANCIES: &[&str] = &["1001", "1001_2"];
const COMMERCIAL_OCCUPANCIES: &[&str] = &["2001", "3001"];

/// Strategy for sums insured from 0 to 1,000 crore, in paise
pub fn sum_insured_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for percentages in 0..=100 with two decimals
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for (product, occupancy) pairs present in the standard tables
pub fn risk_strategy() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        (select(HOME_PRODUCTS), select(RESIDENTIAL_OCCUPANCIES)),
        (select(SLAB_TERRORISM_PRODUCTS), select(COMMERCIAL_OCCUPANCIES)),
    ]
    .prop_map(|(product, occupancy)| (product.to_string(), occupancy.to_string()))
}

/// Strategy for complete requests against the standard tables
pub fn premium_request_strategy() -> impl Strategy<Value = PremiumRequest> {
    (
        risk_strategy(),
        sum_insured_strategy(),
        sum_insured_strategy(),
        percentage_strategy(),
        percentage_strategy(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |((product, occupancy), building, contents, discount, loading, proposer, spouse)| {
                let mut builder = PremiumRequestBuilder::new(product, occupancy)
                    .building(building)
                    .contents(contents)
                    .discount(discount)
                    .loading(loading);
                if proposer {
                    builder = builder.pa_proposer();
                }
                if spouse {
                    builder = builder.pa_spouse();
                }
                builder.build()
            },
        )
}
