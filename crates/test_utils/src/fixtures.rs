//! Pre-built Test Fixtures
//!
//! Standard rate tables and requests whose premiums are worked out by hand.
//! The in-memory store built by [`RateFixtures::standard_store`] holds the
//! same data as `sql/standard_rates.sql`, so adapter tests and domain tests
//! can assert the same numbers.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use core_kernel::{ProductCode, QuoteId};
use domain_rating::{OccupancyType, PremiumRequest, QuoteRecord, RateKind};

use crate::builders::PremiumRequestBuilder;
use crate::store::InMemoryRateStore;

/// Products with residential occupancy restrictions
pub const HOME_PRODUCTS: &[&str] = &["BGRP", "UBGR", "UVGR", "UVGS"];

/// Products carrying slab-rated terrorism cover
pub const SLAB_TERRORISM_PRODUCTS: &[&str] = &["SFSP", "IAR", "BSUSP", "BLUSP", "VUSP"];

/// Sum insured where the slab rates step down: 2,000 crore
pub const SLAB_BOUNDARY: Decimal = dec!(20000000000);

/// Fixture for rate tables
pub struct RateFixtures;

impl RateFixtures {
    /// Basic rate of every home product for occupancies 1001 and 1001_2
    pub fn home_basic_rate() -> Decimal {
        dec!(0.15)
    }

    /// Basic rate of SFSP for the industrial occupancy 3001
    pub fn sfsp_industrial_basic_rate() -> Decimal {
        dec!(0.45)
    }

    /// The standard tables:
    ///
    /// - occupancies 1001 and 1001_2 (Residential), 2001 "Shops"
    ///   (Non-Industrial), 3001 and 3002 "Warehouse" (Industrial), each
    ///   with its description
    /// - basic rate 0.15 for home products on 1001 and 1001_2; 0.45 for
    ///   SFSP on 3001; no other basic rates
    /// - terrorism slabs for every slab product: Residential 0.10,
    ///   Non-Industrial 0.15 / 0.12, Industrial 0.20 / 0.15 either side of
    ///   [`SLAB_BOUNDARY`]
    /// - PA_PROPOSER and PA_SPOUSE flat 7.00 on UBGR and BGRP
    /// - EARTHQUAKE on UBGR: 0.25 for 1001_2 only, else 0.10
    /// - STFI on SFSP: 0.08 except for residential occupancies; on BGRP:
    ///   0.05 for residential occupancies only
    pub fn standard_store() -> InMemoryRateStore {
        let occupancies = [
            ("1001", OccupancyType::Residential, "Dwellings"),
            ("1001_2", OccupancyType::Residential, "Co-operative housing society"),
            ("2001", OccupancyType::NonIndustrial, "Shops"),
            ("3001", OccupancyType::Industrial, "Engineering workshops"),
            ("3002", OccupancyType::Industrial, "Warehouse - non-hazardous goods"),
        ];

        let mut store = InMemoryRateStore::new();
        for (code, occupancy_type, description) in occupancies {
            store = store
                .with_occupancy(code, occupancy_type)
                .with_occupancy_description(code, description);
        }

        for product in HOME_PRODUCTS {
            store = store
                .with_basic_rate(product, "1001", Self::home_basic_rate())
                .with_basic_rate(product, "1001_2", Self::home_basic_rate());
        }
        store = store.with_basic_rate("SFSP", "3001", Self::sfsp_industrial_basic_rate());

        let slabs = [
            (OccupancyType::Residential, dec!(0), None, dec!(0.10)),
            (OccupancyType::NonIndustrial, dec!(0), Some(SLAB_BOUNDARY), dec!(0.15)),
            (OccupancyType::NonIndustrial, SLAB_BOUNDARY, None, dec!(0.12)),
            (OccupancyType::Industrial, dec!(0), Some(SLAB_BOUNDARY), dec!(0.20)),
            (OccupancyType::Industrial, SLAB_BOUNDARY, None, dec!(0.15)),
        ];
        for product in SLAB_TERRORISM_PRODUCTS {
            for (occupancy_type, si_min, si_max, rate) in slabs {
                store = store.with_terrorism_slab(product, occupancy_type, si_min, si_max, rate);
            }
        }

        for product in ["UBGR", "BGRP"] {
            store = store
                .with_add_on_rate(product, "PA_PROPOSER", "ALL", dec!(7.0), RateKind::Flat)
                .with_add_on_rate(product, "PA_SPOUSE", "ALL", dec!(7.0), RateKind::Flat);
        }

        store
            .with_add_on_rate("UBGR", "EARTHQUAKE", "ONLY_1001_2", dec!(0.25), RateKind::PerMille)
            .with_add_on_rate("UBGR", "EARTHQUAKE", "ALL", dec!(0.10), RateKind::PerMille)
            .with_add_on_rate("SFSP", "STFI", "EXCEPT_1001_1001_2", dec!(0.08), RateKind::PerMille)
            .with_add_on_rate("BGRP", "STFI", "ONLY_1001_1001_2", dec!(0.05), RateKind::PerMille)
    }
}

/// Fixture for requests with known premiums
pub struct RequestFixtures;

impl RequestFixtures {
    /// UBGR on a dwelling: SI 12 lakh, 5% discount, 10% loading
    ///
    /// basic 180.00, discount 9.00, subtotal 171.00, loading 17.10,
    /// terrorism 84.00, net 272.10, CGST and SGST 24.49, gross 322.08
    pub fn ubgr_dwelling() -> PremiumRequest {
        PremiumRequestBuilder::new("UBGR", "1001")
            .building(dec!(1000000))
            .contents(dec!(200000))
            .discount(dec!(5))
            .loading(dec!(10))
            .build()
    }

    /// UVGR with SI 1,000: raw net 0.15, floored to 50.00, gross 60.00
    pub fn uvgr_below_minimum() -> PremiumRequest {
        PremiumRequestBuilder::new("UVGR", "1001")
            .building(dec!(1000))
            .build()
    }

    /// SFSP on an industrial risk with no add-ons
    pub fn sfsp_industrial(sum_insured: Decimal) -> PremiumRequest {
        PremiumRequestBuilder::new("SFSP", "3001")
            .building(sum_insured)
            .build()
    }
}

/// Fixture for quote records
pub struct QuoteFixtures;

impl QuoteFixtures {
    /// A record with small JSON payloads
    pub fn record(product_code: &str) -> QuoteRecord {
        QuoteRecord {
            id: QuoteId::new_v7(),
            product_code: ProductCode::parse(product_code).expect("fixture product code"),
            request_data: json!({
                "product_code": product_code,
                "building_sum_insured": "1000000",
            }),
            response_data: json!({ "gross_premium": "322.08" }),
            created_at: Utc::now(),
        }
    }
}
