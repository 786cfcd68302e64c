//! Add-on aggregation
//!
//! Prices a variable list of add-on covers against one risk. Each line is
//! priced from its resolved rate, rounded half-up on its own, and only then
//! summed, so the total always equals the sum of the lines shown on a quote.
//!
//! Personal accident covers for the proposer and spouse are not separate
//! products; they are priced as add-ons under the synthetic codes
//! [`PA_PROPOSER`] and [`PA_SPOUSE`], after any explicit selections.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{AddOnCode, Money, MoneyError, PerMille, Percentage};

use crate::error::RatingError;
use crate::rates::{RateKind, RateQuery, ResolvedRate};
use crate::resolver::RateResolver;

/// Synthetic add-on code for personal accident cover of the proposer
pub const PA_PROPOSER: &str = "PA_PROPOSER";

/// Synthetic add-on code for personal accident cover of the spouse
pub const PA_SPOUSE: &str = "PA_SPOUSE";

/// One selected add-on with its own sum insured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnSelection {
    pub code: AddOnCode,
    #[serde(default)]
    pub sum_insured: Decimal,
}

impl AddOnSelection {
    pub fn new(code: AddOnCode, sum_insured: Decimal) -> Self {
        Self { code, sum_insured }
    }
}

/// Personal accident flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaSelection {
    #[serde(default)]
    pub proposer: bool,
    #[serde(default)]
    pub spouse: bool,
}

impl PaSelection {
    /// The synthetic add-on selections for the set flags, proposer first
    pub fn selections(&self) -> Result<Vec<AddOnSelection>, RatingError> {
        let mut selections = Vec::with_capacity(2);
        if self.proposer {
            selections.push(AddOnSelection::new(AddOnCode::parse(PA_PROPOSER)?, Decimal::ZERO));
        }
        if self.spouse {
            selections.push(AddOnSelection::new(AddOnCode::parse(PA_SPOUSE)?, Decimal::ZERO));
        }
        Ok(selections)
    }
}

/// A priced add-on as shown on the breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnLine {
    pub code: AddOnCode,
    pub sum_insured: Money,
    pub rate: ResolvedRate,
    /// Rounded half-up to 2dp
    pub premium: Money,
}

/// Total add-on premium and the lines it is made of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnTotal {
    pub total: Money,
    pub lines: Vec<AddOnLine>,
}

impl AddOnTotal {
    pub fn empty() -> Self {
        Self {
            total: Money::zero(),
            lines: Vec::new(),
        }
    }
}

/// Unrounded premium of one add-on line
///
/// `basic_premium` is only read by `PercentOfBasicPremium` rates.
pub fn line_premium(
    rate: &ResolvedRate,
    sum_insured: &Money,
    basic_premium: &Money,
) -> Result<Money, MoneyError> {
    match rate.kind {
        RateKind::PerMille => PerMille::new(rate.value).apply(sum_insured),
        RateKind::Percentage => Percentage::new(rate.value).apply(sum_insured),
        RateKind::Flat => Ok(Money::new(rate.value)),
        RateKind::PercentOfBasicPremium => Percentage::new(rate.value).apply(basic_premium),
        RateKind::Free => Ok(Money::zero()),
    }
}

/// Prices add-on selections through a [`RateResolver`]
#[derive(Clone)]
pub struct AddOnAggregator {
    resolver: RateResolver,
}

impl AddOnAggregator {
    pub fn new(resolver: RateResolver) -> Self {
        Self { resolver }
    }

    /// Prices `selections` then the PA covers flagged in `pa`
    ///
    /// # Arguments
    ///
    /// * `risk` - the policy-level query; product and occupancy are reused
    ///   for every add-on lookup
    /// * `basic_premium` - rounded basic premium, for percent-of-basic rates
    ///
    /// # Errors
    ///
    /// A missing add-on rate contributes zero and is not an error. Only rate
    /// store failures propagate.
    pub async fn aggregate(
        &self,
        risk: &RateQuery,
        selections: &[AddOnSelection],
        pa: PaSelection,
        basic_premium: Money,
    ) -> Result<AddOnTotal, RatingError> {
        let pa_selections = pa.selections()?;
        let mut lines = Vec::with_capacity(selections.len() + pa_selections.len());

        for selection in selections.iter().chain(pa_selections.iter()) {
            let sum_insured = Money::new(selection.sum_insured);
            let query = risk.for_add_on(selection.code.clone(), sum_insured);
            let rate = self.resolver.resolve_add_on_rate(&query).await?;
            let premium = line_premium(&rate, &sum_insured, &basic_premium)?.round_half_up();

            debug!(
                add_on = %selection.code,
                kind = %rate.kind,
                rate = %rate.value,
                %premium,
                "add-on priced"
            );

            lines.push(AddOnLine {
                code: selection.code.clone(),
                sum_insured,
                rate,
                premium,
            });
        }

        let total = lines
            .iter()
            .try_fold(Money::zero(), |total, line| total.checked_add(line.premium))?;
        Ok(AddOnTotal { total, lines })
    }
}
