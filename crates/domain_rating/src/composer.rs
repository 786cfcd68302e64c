//! Premium composition
//!
//! The ordered fire premium pipeline:
//!
//! ```text
//! basic -> add-ons -> discount -> subtotal -> loading -> terrorism
//!       -> net -> minimum floor -> CGST/SGST -> stamp duty -> gross
//! ```
//!
//! Every intermediate amount is rounded half-up to two decimals before it
//! feeds the next step. Discount and loading apply to basic and add-on
//! premium only, never to terrorism.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::{Money, OccupancyCode, PerMille, Percentage};

use crate::addons::AddOnAggregator;
use crate::breakdown::PremiumBreakdown;
use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::ports::RateStore;
use crate::product::{BasicRatePolicy, ProductVariant, ProductVariantPolicy};
use crate::rates::RateQuery;
use crate::request::PremiumRequest;
use crate::resolver::RateResolver;

/// Validated view of a request
struct ValidatedRequest {
    variant: ProductVariant,
    occupancy: OccupancyCode,
    total_sum_insured: Money,
    discount: Percentage,
    loading: Percentage,
}

/// Computes premium breakdowns against an injected rate store
///
/// Holds no per-calculation state; clones share the store and can run
/// calculations concurrently.
#[derive(Clone)]
pub struct PremiumComposer {
    resolver: RateResolver,
    add_ons: AddOnAggregator,
    config: RatingConfig,
}

impl PremiumComposer {
    pub fn new(store: Arc<dyn RateStore>, config: RatingConfig) -> Self {
        let resolver = RateResolver::new(store);
        Self {
            add_ons: AddOnAggregator::new(resolver.clone()),
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Computes the premium breakdown for a request
    ///
    /// # Errors
    ///
    /// * `InvalidProductCode` - product code is not rated by this engine
    /// * `OccupancyNotPermitted` - occupancy outside a restricted product's set
    /// * `InvalidRequest` - negative sums insured, percentages outside 0..=100
    ///   or amounts too large to rate
    /// * `RateNotFound` - no basic rate for a product that requires one
    /// * `UnknownOccupancy`, `TerrorismRateNotConfigured` - slab terrorism
    ///   could not be rated
    /// * `Store` - the rate store failed
    #[instrument(
        skip(self, request),
        fields(product = %request.product_code, occupancy = %request.occupancy_code)
    )]
    pub async fn compute_premium(
        &self,
        request: &PremiumRequest,
    ) -> Result<PremiumBreakdown, RatingError> {
        let validated = validate(request)?;
        let variant = &validated.variant;

        // Step 1: total sum insured
        let total_si = validated.total_sum_insured;
        let risk = RateQuery::new(
            variant.product_code.clone(),
            validated.occupancy.clone(),
            total_si,
        );

        // Step 2: basic premium
        let basic_rate = match (
            self.resolver.resolve_basic_rate(&risk).await,
            &variant.basic_rate_policy,
        ) {
            (Ok(rate), _) => rate,
            (Err(RatingError::RateNotFound { .. }), BasicRatePolicy::FallbackTo(fallback)) => {
                let rate = self.resolver.resolve_fallback_basic_rate(fallback, &risk).await?;
                warn!(
                    product = %variant.product_code,
                    occupancy = %validated.occupancy,
                    %rate,
                    "basic rate not configured, using fallback rate"
                );
                rate
            }
            (Err(err), _) => return Err(err),
        };
        let basic_premium = basic_rate.apply(&total_si)?.round_half_up();

        // Step 3: add-ons
        let add_ons = self
            .add_ons
            .aggregate(&risk, &request.add_ons, request.personal_accident, basic_premium)
            .await?;
        let add_on_premium = add_ons.total.round_half_up();

        // Steps 4-6: discount, subtotal, loading
        let discountable = basic_premium.checked_add(add_on_premium)?;
        let discount_amount = validated.discount.apply(&discountable)?.round_half_up();
        let subtotal = (discountable - discount_amount).round_half_up();
        let loading_amount = validated.loading.apply(&subtotal)?.round_half_up();

        // Step 7: terrorism, reported as zero when not carried
        let (terrorism_rate, terrorism_premium) = match variant.terrorism {
            Some(mode) => {
                let rate = self.resolver.resolve_terrorism_rate(mode, &risk).await?;
                (rate, rate.apply(&total_si)?.round_half_up())
            }
            None => (PerMille::zero(), Money::zero()),
        };

        // Steps 8-9: net premium and minimum floor
        let rated_net = subtotal
            .checked_add(loading_amount)?
            .checked_add(terrorism_premium)?
            .round_half_up();
        let minimum = self.config.minimum_premium();
        let minimum_premium_applied = rated_net < minimum;
        let net_premium = if minimum_premium_applied { minimum } else { rated_net };

        // Steps 10-12: taxes, stamp duty, gross
        let cgst = self.config.cgst().apply(&net_premium)?.round_half_up();
        let sgst = self.config.sgst().apply(&net_premium)?.round_half_up();
        let stamp_duty = self.config.stamp_duty();
        let gross_premium = net_premium
            .checked_add(cgst)?
            .checked_add(sgst)?
            .checked_add(stamp_duty)?
            .round_half_up();

        info!(
            product = %variant.product_code,
            total_sum_insured = %total_si,
            net = %net_premium,
            gross = %gross_premium,
            minimum_premium_applied,
            "premium computed"
        );

        Ok(PremiumBreakdown {
            product_code: variant.product_code.clone(),
            occupancy_code: validated.occupancy,
            total_sum_insured: total_si,
            basic_rate,
            basic_premium,
            add_on_premium,
            add_on_lines: add_ons.lines,
            discount_percent: validated.discount,
            discount_amount,
            subtotal,
            loading_percent: validated.loading,
            loading_amount,
            terrorism_rate,
            terrorism_premium,
            net_premium,
            minimum_premium_applied,
            cgst,
            sgst,
            stamp_duty,
            gross_premium,
        })
    }
}

fn validate(request: &PremiumRequest) -> Result<ValidatedRequest, RatingError> {
    let variant = ProductVariantPolicy::lookup_str(&request.product_code)?;

    let occupancy = OccupancyCode::parse(&request.occupancy_code)
        .map_err(|_| RatingError::invalid_request("occupancy_code must not be empty"))?;

    if !variant.permits_occupancy(&occupancy) {
        return Err(RatingError::OccupancyNotPermitted {
            product: variant.product_code.to_string(),
            occupancy: occupancy.to_string(),
        });
    }

    for (label, amount) in request.labelled_sums_insured() {
        Money::non_negative(amount)
            .map_err(|_| RatingError::invalid_request(format!("{} must not be negative", label)))?;
    }

    let discount = Percentage::bounded(request.discount_percent)
        .map_err(|e| RatingError::invalid_request(format!("discount_percent: {}", e)))?;
    let loading = Percentage::bounded(request.loading_percent)
        .map_err(|e| RatingError::invalid_request(format!("loading_percent: {}", e)))?;

    Ok(ValidatedRequest {
        total_sum_insured: request.total_sum_insured()?,
        variant,
        occupancy,
        discount,
        loading,
    })
}
