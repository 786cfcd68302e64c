//! PostgreSQL adapter tests
//!
//! Run against a container loaded with the standard rate tables. They need a
//! Docker daemon and are ignored by default:
//!
//! ```text
//! cargo test -p infra_db -- --ignored
//! ```

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{AddOnCode, Money, OccupancyCode, ProductCode};
use domain_rating::{
    OccupancyRule, OccupancyType, PremiumComposer, QuoteSink, RateKind, RateStore, RatingConfig,
};
use infra_db::repositories::NewQuote;
use infra_db::{DatabaseError, PostgresQuoteSink, PostgresRateStore};
use test_utils::{QuoteFixtures, RequestFixtures, TestDatabase};

fn product(code: &str) -> ProductCode {
    ProductCode::parse(code).unwrap()
}

fn occupancy(code: &str) -> OccupancyCode {
    OccupancyCode::parse(code).unwrap()
}

fn add_on(code: &str) -> AddOnCode {
    AddOnCode::parse(code).unwrap()
}

// ============================================================================
// Rate store
// ============================================================================

mod rate_store {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_basic_rate_lookup() {
        let db = TestDatabase::start().await.unwrap();
        let store = PostgresRateStore::new(db.pool().clone());

        let rate = store.basic_rate(&product("UBGR"), &occupancy("1001_2")).await.unwrap();
        assert_eq!(rate, Some(dec!(0.15)));

        let missing = store.basic_rate(&product("IAR"), &occupancy("3001")).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_occupancy_types_parse() {
        let db = TestDatabase::start().await.unwrap();
        let store = PostgresRateStore::new(db.pool().clone());

        assert_eq!(
            store.occupancy_type(&occupancy("2001")).await.unwrap(),
            Some(OccupancyType::NonIndustrial)
        );
        assert_eq!(store.occupancy_type(&occupancy("9999")).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_occupancy_description_lookup() {
        let db = TestDatabase::start().await.unwrap();
        let store = PostgresRateStore::new(db.pool().clone());

        assert_eq!(
            store.occupancy_description(&occupancy("3002")).await.unwrap().as_deref(),
            Some("Warehouse - non-hazardous goods")
        );
        assert_eq!(store.occupancy_description(&occupancy("9999")).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_terrorism_slabs_filtered_by_type() {
        let db = TestDatabase::start().await.unwrap();
        let store = PostgresRateStore::new(db.pool().clone());

        let slabs = store
            .terrorism_slabs(&product("SFSP"), OccupancyType::Industrial)
            .await
            .unwrap();

        assert_eq!(slabs.len(), 2);
        assert!(slabs.iter().all(|s| s.occupancy_type == OccupancyType::Industrial));
        assert_eq!(slabs[0].si_min, Money::zero());
        assert_eq!(slabs[1].si_max, None);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_add_on_rows_keep_order_and_skip_bad_or_inactive() {
        let db = TestDatabase::start().await.unwrap();
        let store = PostgresRateStore::new(db.pool().clone());

        let earthquake = store.add_on_rates(&product("UBGR"), &add_on("EARTHQUAKE")).await.unwrap();
        assert_eq!(earthquake.len(), 2);
        assert_eq!(
            earthquake[0].rule,
            OccupancyRule::MatchOnly(vec![occupancy("1001_2")])
        );
        assert_eq!(earthquake[1].rule, OccupancyRule::MatchAll);

        let stfi = store.add_on_rates(&product("SFSP"), &add_on("STFI")).await.unwrap();
        assert_eq!(stfi.len(), 1, "unparseable rule row is skipped");
        assert_eq!(stfi[0].rate.kind, RateKind::PerMille);
        assert_eq!(
            stfi[0].rule,
            OccupancyRule::MatchExcept(vec![occupancy("1001"), occupancy("1001_2")])
        );

        let rent = store.add_on_rates(&product("SFSP"), &add_on("RENT")).await.unwrap();
        assert!(rent.is_empty(), "inactive add-on master hides its rates");

        let inactive = store.add_on_rates(&product("SFSP"), &add_on("EARTHQUAKE")).await.unwrap();
        assert!(inactive.is_empty());
    }
}

// ============================================================================
// Quote sink
// ============================================================================

mod quote_sink {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_save_and_read_back() {
        let db = TestDatabase::start().await.unwrap();
        let sink = PostgresQuoteSink::new(db.pool().clone());
        let record = QuoteFixtures::record("UBGR");

        sink.save_quote(&record).await.unwrap();

        let row = sink.repository().get(*record.id.as_uuid()).await.unwrap();
        assert_eq!(row.product, "UBGR");
        assert_eq!(row.response_data, record.response_data);
        assert_eq!(sink.repository().count_for_product("UBGR").await.unwrap(), 1);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_duplicate_id_is_an_error() {
        let db = TestDatabase::start().await.unwrap();
        let sink = PostgresQuoteSink::new(db.pool().clone());
        let record = QuoteFixtures::record("SFSP");

        sink.save_quote(&record).await.unwrap();
        assert!(sink.save_quote(&record).await.is_err());

        let again = NewQuote {
            id: *record.id.as_uuid(),
            product: "SFSP".to_string(),
            request_data: record.request_data.clone(),
            response_data: record.response_data.clone(),
            created_at: record.created_at,
        };
        let err = sink.repository().insert(&again).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)), "got {:?}", err);
    }
}

// ============================================================================
// End to end
// ============================================================================

mod end_to_end {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_ubgr_dwelling_against_postgres() {
        let db = TestDatabase::start().await.unwrap();
        let store = Arc::new(PostgresRateStore::new(db.pool().clone()));
        let composer = PremiumComposer::new(store, RatingConfig::default());

        let breakdown = composer
            .compute_premium(&RequestFixtures::ubgr_dwelling())
            .await
            .unwrap();

        assert_eq!(breakdown.net_premium.amount(), dec!(272.10));
        assert_eq!(breakdown.gross_premium.amount(), dec!(322.08));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_warehouse_fallback_against_postgres() {
        let db = TestDatabase::start().await.unwrap();
        let store = Arc::new(PostgresRateStore::new(db.pool().clone()));
        let composer = PremiumComposer::new(store, RatingConfig::default());

        let mut request = RequestFixtures::sfsp_industrial(dec!(1000000));
        request.occupancy_code = "3002".into();
        let breakdown = composer.compute_premium(&request).await.unwrap();

        assert_eq!(breakdown.basic_rate.value(), dec!(0.40));
        assert_eq!(breakdown.basic_premium.amount(), dec!(400.00));
    }
}
