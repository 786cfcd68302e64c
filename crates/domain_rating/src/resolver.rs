//! Rate resolution
//!
//! Turns a [`RateQuery`] into a rate using the injected [`RateStore`]. Three
//! lookups with three different failure policies:
//!
//! - basic rate: missing or non-positive is `RateNotFound`; the composer
//!   decides per product whether to fall back to a rate chosen from the
//!   occupancy description
//! - terrorism rate: no slab is `TerrorismRateNotConfigured`, never zero
//! - add-on rate: no matching row is the zero flat sentinel

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::{Money, PerMille};

use crate::error::RatingError;
use crate::ports::RateStore;
use crate::product::{FallbackRates, TerrorismMode};
use crate::rates::{OccupancyType, RateQuery, ResolvedRate, TerrorismSlab};

/// Stateless rate lookups over a rate store
#[derive(Clone)]
pub struct RateResolver {
    store: Arc<dyn RateStore>,
}

impl RateResolver {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    /// Resolves the basic per-mille rate for (product, occupancy)
    ///
    /// # Errors
    ///
    /// `RateNotFound` when no row matches or the stored rate is not positive.
    #[instrument(
        skip(self),
        fields(product = %query.product_code, occupancy = %query.occupancy_code)
    )]
    pub async fn resolve_basic_rate(&self, query: &RateQuery) -> Result<PerMille, RatingError> {
        let rate = self
            .store
            .basic_rate(&query.product_code, &query.occupancy_code)
            .await?
            .map(PerMille::new);

        match rate {
            Some(rate) if rate.is_positive() => {
                debug!(%rate, "basic rate resolved");
                Ok(rate)
            }
            _ => Err(RatingError::rate_not_found(
                &query.product_code,
                &query.occupancy_code,
            )),
        }
    }

    /// Picks a fallback basic rate by matching the occupancy description
    /// against `fallback`
    ///
    /// An occupancy with no stored description gets the table's default.
    #[instrument(
        skip(self, fallback),
        fields(product = %query.product_code, occupancy = %query.occupancy_code)
    )]
    pub async fn resolve_fallback_basic_rate(
        &self,
        fallback: &FallbackRates,
        query: &RateQuery,
    ) -> Result<PerMille, RatingError> {
        let description = self.store.occupancy_description(&query.occupancy_code).await?;
        let rate = fallback.rate_for(description.as_deref());
        debug!(%rate, ?description, "fallback basic rate chosen");
        Ok(rate)
    }

    /// Resolves the terrorism per-mille rate for a product's terrorism mode
    ///
    /// Fixed-mandatory products return their fixed rate. Slab products map
    /// the occupancy to its type, then pick the slab whose `[si_min, si_max)`
    /// band contains `query.sum_insured`.
    ///
    /// # Errors
    ///
    /// `UnknownOccupancy` if the store has no type for the occupancy;
    /// `TerrorismRateNotConfigured` if no slab covers the sum insured.
    #[instrument(
        skip(self),
        fields(
            product = %query.product_code,
            occupancy = %query.occupancy_code,
            sum_insured = %query.sum_insured
        )
    )]
    pub async fn resolve_terrorism_rate(
        &self,
        mode: TerrorismMode,
        query: &RateQuery,
    ) -> Result<PerMille, RatingError> {
        match mode {
            TerrorismMode::FixedMandatory(rate) => Ok(rate),
            TerrorismMode::SlabBySumInsured => {
                let occupancy_type = self
                    .store
                    .occupancy_type(&query.occupancy_code)
                    .await?
                    .ok_or_else(|| {
                        RatingError::UnknownOccupancy(query.occupancy_code.to_string())
                    })?;

                let slabs = self
                    .store
                    .terrorism_slabs(&query.product_code, occupancy_type)
                    .await?;

                let slab = select_slab(&slabs, occupancy_type, &query.sum_insured).ok_or_else(|| {
                    RatingError::terrorism_not_configured(
                        &query.product_code,
                        occupancy_type,
                        query.sum_insured.amount(),
                    )
                })?;

                debug!(rate = %slab.rate, %occupancy_type, "terrorism slab selected");
                Ok(slab.rate)
            }
        }
    }

    /// Resolves an add-on rate, surfacing a missing rate as an error
    ///
    /// Among the rows whose occupancy rule matches, the most specific rule
    /// wins (`ONLY` over `EXCEPT` over `ALL`); equally specific rows are
    /// taken in store order.
    pub async fn try_resolve_add_on_rate(
        &self,
        query: &RateQuery,
    ) -> Result<ResolvedRate, RatingError> {
        let add_on = query
            .add_on_code
            .as_ref()
            .ok_or_else(|| RatingError::invalid_request("add-on lookup requires an add-on code"))?;

        let rows = self.store.add_on_rates(&query.product_code, add_on).await?;

        rows.iter()
            .filter(|row| row.rule.matches(Some(&query.occupancy_code)))
            .min_by_key(|row| row.rule.specificity())
            .map(|row| row.rate)
            .ok_or_else(|| RatingError::AddOnRateNotFound {
                product: query.product_code.to_string(),
                add_on: add_on.to_string(),
                occupancy: query.occupancy_code.to_string(),
            })
    }

    /// Resolves an add-on rate; a missing rate becomes the zero flat sentinel
    #[instrument(skip(self), fields(product = %query.product_code, add_on = ?query.add_on_code))]
    pub async fn resolve_add_on_rate(
        &self,
        query: &RateQuery,
    ) -> Result<ResolvedRate, RatingError> {
        match self.try_resolve_add_on_rate(query).await {
            Err(err @ RatingError::AddOnRateNotFound { .. }) => {
                debug!(error = %err, "no add-on rate, contributing zero");
                Ok(ResolvedRate::none())
            }
            other => other,
        }
    }
}

/// Picks the slab for an occupancy type whose band contains `sum_insured`.
///
/// Slabs should not overlap. If they do, the highest rate wins; whether that
/// is intended worst-case pricing or an artefact of data that never
/// overlapped is unverified.
pub fn select_slab<'a>(
    slabs: &'a [TerrorismSlab],
    occupancy_type: OccupancyType,
    sum_insured: &Money,
) -> Option<&'a TerrorismSlab> {
    slabs
        .iter()
        .filter(|slab| slab.occupancy_type == occupancy_type && slab.contains(sum_insured))
        .max_by(|a, b| a.rate.cmp(&b.rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_kernel::{AddOnCode, DomainPort, OccupancyCode, PortError, ProductCode};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::rates::{AddOnRateRow, OccupancyRule, RateKind};

    #[derive(Default)]
    struct StubStore {
        basic: Option<Decimal>,
        occupancy_type: Option<OccupancyType>,
        description: Option<String>,
        slabs: Vec<TerrorismSlab>,
        add_ons: Vec<AddOnRateRow>,
        fail: bool,
    }

    impl DomainPort for StubStore {}

    #[async_trait]
    impl RateStore for StubStore {
        async fn basic_rate(
            &self,
            _: &ProductCode,
            _: &OccupancyCode,
        ) -> Result<Option<Decimal>, PortError> {
            if self.fail {
                return Err(PortError::connection("store offline"));
            }
            Ok(self.basic)
        }

        async fn occupancy_type(
            &self,
            _: &OccupancyCode,
        ) -> Result<Option<OccupancyType>, PortError> {
            Ok(self.occupancy_type)
        }

        async fn occupancy_description(
            &self,
            _: &OccupancyCode,
        ) -> Result<Option<String>, PortError> {
            if self.fail {
                return Err(PortError::connection("store offline"));
            }
            Ok(self.description.clone())
        }

        async fn terrorism_slabs(
            &self,
            _: &ProductCode,
            t: OccupancyType,
        ) -> Result<Vec<TerrorismSlab>, PortError> {
            Ok(self.slabs.iter().filter(|s| s.occupancy_type == t).cloned().collect())
        }

        async fn add_on_rates(
            &self,
            _: &ProductCode,
            _: &AddOnCode,
        ) -> Result<Vec<AddOnRateRow>, PortError> {
            if self.fail {
                return Err(PortError::connection("store offline"));
            }
            Ok(self.add_ons.clone())
        }
    }

    fn query(product: &str, occupancy: &str, si: Decimal) -> RateQuery {
        RateQuery::new(
            ProductCode::parse(product).unwrap(),
            OccupancyCode::parse(occupancy).unwrap(),
            Money::new(si),
        )
    }

    fn slab(t: OccupancyType, min: Decimal, max: Option<Decimal>, rate: Decimal) -> TerrorismSlab {
        TerrorismSlab {
            occupancy_type: t,
            si_min: Money::new(min),
            si_max: max.map(Money::new),
            rate: PerMille::new(rate),
        }
    }

    fn resolver(store: StubStore) -> RateResolver {
        RateResolver::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_basic_rate_found() {
        let r = resolver(StubStore { basic: Some(dec!(0.15)), ..Default::default() });
        let rate = r.resolve_basic_rate(&query("UBGR", "1001", dec!(0))).await.unwrap();
        assert_eq!(rate.value(), dec!(0.15));
    }

    #[tokio::test]
    async fn test_basic_rate_missing_or_zero_is_not_found() {
        let missing = resolver(StubStore::default());
        assert!(matches!(
            missing.resolve_basic_rate(&query("UBGR", "1001", dec!(0))).await,
            Err(RatingError::RateNotFound { .. })
        ));

        let zero = resolver(StubStore { basic: Some(dec!(0)), ..Default::default() });
        assert!(matches!(
            zero.resolve_basic_rate(&query("UBGR", "1001", dec!(0))).await,
            Err(RatingError::RateNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let r = resolver(StubStore { fail: true, ..Default::default() });
        assert!(matches!(
            r.resolve_basic_rate(&query("UBGR", "1001", dec!(0))).await,
            Err(RatingError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_fallback_rate_from_description() {
        let industrial = FallbackRates::from_table(crate::product::INDUSTRIAL_FALLBACK_RATES);
        let q = query("SFSP", "3002", dec!(0));

        let warehouse = resolver(StubStore {
            description: Some("Warehouse - non-hazardous goods".into()),
            ..Default::default()
        });
        let rate = warehouse.resolve_fallback_basic_rate(&industrial, &q).await.unwrap();
        assert_eq!(rate.value(), dec!(0.40));

        let undescribed = resolver(StubStore::default());
        let rate = undescribed.resolve_fallback_basic_rate(&industrial, &q).await.unwrap();
        assert_eq!(rate.value(), dec!(0.15));

        let offline = resolver(StubStore { fail: true, ..Default::default() });
        assert!(matches!(
            offline.resolve_fallback_basic_rate(&industrial, &q).await,
            Err(RatingError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_fixed_mandatory_terrorism_skips_store() {
        let r = resolver(StubStore::default());
        let rate = r
            .resolve_terrorism_rate(
                TerrorismMode::FixedMandatory(PerMille::new(dec!(0.07))),
                &query("BGRP", "1001", dec!(10000000)),
            )
            .await
            .unwrap();
        assert_eq!(rate.value(), dec!(0.07));
    }

    #[tokio::test]
    async fn test_slab_terrorism_picks_band() {
        let r = resolver(StubStore {
            occupancy_type: Some(OccupancyType::Industrial),
            slabs: vec![
                slab(OccupancyType::Industrial, dec!(0), Some(dec!(20000000000)), dec!(0.20)),
                slab(OccupancyType::Industrial, dec!(20000000000), None, dec!(0.15)),
            ],
            ..Default::default()
        });

        let low = r
            .resolve_terrorism_rate(
                TerrorismMode::SlabBySumInsured,
                &query("SFSP", "3001", dec!(5000000)),
            )
            .await
            .unwrap();
        let boundary = r
            .resolve_terrorism_rate(
                TerrorismMode::SlabBySumInsured,
                &query("SFSP", "3001", dec!(20000000000)),
            )
            .await
            .unwrap();

        assert_eq!(low.value(), dec!(0.20));
        assert_eq!(boundary.value(), dec!(0.15));
    }

    #[tokio::test]
    async fn test_slab_terrorism_missing_is_fatal() {
        let r = resolver(StubStore {
            occupancy_type: Some(OccupancyType::NonIndustrial),
            slabs: vec![slab(OccupancyType::NonIndustrial, dec!(1000000), None, dec!(0.12))],
            ..Default::default()
        });
        let err = r
            .resolve_terrorism_rate(
                TerrorismMode::SlabBySumInsured,
                &query("BSUSP", "2001", dec!(500)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RatingError::TerrorismRateNotConfigured { .. }));
    }

    #[tokio::test]
    async fn test_unknown_occupancy_type() {
        let r = resolver(StubStore::default());
        let err = r
            .resolve_terrorism_rate(
                TerrorismMode::SlabBySumInsured,
                &query("IAR", "9999", dec!(500)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RatingError::UnknownOccupancy(code) if code == "9999"));
    }

    #[test]
    fn test_overlapping_slabs_prefer_highest_rate() {
        let slabs = vec![
            slab(OccupancyType::Industrial, dec!(0), None, dec!(0.10)),
            slab(OccupancyType::Industrial, dec!(0), Some(dec!(1000000)), dec!(0.25)),
            slab(OccupancyType::Industrial, dec!(500), None, dec!(0.18)),
            slab(OccupancyType::Residential, dec!(0), None, dec!(0.90)),
        ];
        let chosen =
            select_slab(&slabs, OccupancyType::Industrial, &Money::new(dec!(600))).unwrap();
        assert_eq!(chosen.rate.value(), dec!(0.25));
    }

    #[tokio::test]
    async fn test_add_on_specific_rule_beats_all() {
        let only_x = AddOnRateRow {
            rule: OccupancyRule::MatchOnly(vec![OccupancyCode::parse("X").unwrap()]),
            rate: ResolvedRate::new(dec!(9.0), RateKind::PerMille),
        };
        let all = AddOnRateRow {
            rule: OccupancyRule::MatchAll,
            rate: ResolvedRate::new(dec!(5.0), RateKind::PerMille),
        };

        let add_on = AddOnCode::parse("EQ").unwrap();
        let x = query("SFSP", "X", dec!(0)).for_add_on(add_on.clone(), Money::zero());
        let y = query("SFSP", "Y", dec!(0)).for_add_on(add_on, Money::zero());

        for rows in [vec![only_x.clone(), all.clone()], vec![all, only_x]] {
            let r = resolver(StubStore {
                add_ons: rows,
                ..Default::default()
            });
            assert_eq!(r.resolve_add_on_rate(&x).await.unwrap().value, dec!(9.0));
            assert_eq!(r.resolve_add_on_rate(&y).await.unwrap().value, dec!(5.0));
        }
    }

    #[tokio::test]
    async fn test_add_on_equal_rules_take_store_order() {
        let r = resolver(StubStore {
            add_ons: vec![
                AddOnRateRow {
                    rule: OccupancyRule::MatchAll,
                    rate: ResolvedRate::new(dec!(1.5), RateKind::Flat),
                },
                AddOnRateRow {
                    rule: OccupancyRule::MatchAll,
                    rate: ResolvedRate::new(dec!(2.5), RateKind::Flat),
                },
            ],
            ..Default::default()
        });

        let q = query("SFSP", "X", dec!(0))
            .for_add_on(AddOnCode::parse("EQ").unwrap(), Money::zero());
        assert_eq!(r.resolve_add_on_rate(&q).await.unwrap().value, dec!(1.5));
    }

    #[tokio::test]
    async fn test_add_on_missing_is_sentinel_but_try_reports_it() {
        let r = resolver(StubStore::default());
        let q = query("UVGR", "1001", dec!(0))
            .for_add_on(AddOnCode::parse("STFI").unwrap(), Money::zero());

        assert!(r.resolve_add_on_rate(&q).await.unwrap().is_none());
        assert!(matches!(
            r.try_resolve_add_on_rate(&q).await,
            Err(RatingError::AddOnRateNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_on_store_failure_is_not_swallowed() {
        let r = resolver(StubStore { fail: true, ..Default::default() });
        let q = query("UVGR", "1001", dec!(0))
            .for_add_on(AddOnCode::parse("STFI").unwrap(), Money::zero());
        assert!(matches!(r.resolve_add_on_rate(&q).await, Err(RatingError::Store(_))));
    }
}
