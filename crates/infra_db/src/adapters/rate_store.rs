//! PostgreSQL Rate Store
//!
//! Implements [`RateStore`] over the rate tables. Stored strings are parsed
//! into domain types here, once per row:
//!
//! - an occupancy type that does not parse is a transformation error
//! - an add-on row whose rule or rate kind does not parse is skipped with a
//!   warning, so one bad row cannot take an add-on offline

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use core_kernel::{AddOnCode, DomainPort, Money, OccupancyCode, PerMille, PortError, ProductCode};
use domain_rating::{
    AddOnRateRow, OccupancyRule, OccupancyType, RateKind, RateParseError, RateStore, ResolvedRate,
    TerrorismSlab,
};

use crate::repositories::{AddOnRateDbRow, RateRepository, TerrorismSlabRow};

/// PostgreSQL-backed implementation of the RateStore port
#[derive(Debug, Clone)]
pub struct PostgresRateStore {
    repository: RateRepository,
}

impl PostgresRateStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RateRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &RateRepository {
        &self.repository
    }
}

impl DomainPort for PostgresRateStore {}

#[async_trait]
impl RateStore for PostgresRateStore {
    #[instrument(skip_all, fields(product = %product, occupancy = %occupancy))]
    async fn basic_rate(
        &self,
        product: &ProductCode,
        occupancy: &OccupancyCode,
    ) -> Result<Option<Decimal>, PortError> {
        let rate = self
            .repository
            .find_basic_rate(product.as_str(), occupancy.as_str())
            .await?;
        debug!(found = rate.is_some(), "basic rate lookup");
        Ok(rate)
    }

    #[instrument(skip_all, fields(occupancy = %occupancy))]
    async fn occupancy_type(
        &self,
        occupancy: &OccupancyCode,
    ) -> Result<Option<OccupancyType>, PortError> {
        self.repository
            .find_occupancy_type(occupancy.as_str())
            .await?
            .map(|raw| raw.parse::<OccupancyType>().map_err(parse_error))
            .transpose()
    }

    /// A blank description reads as no description
    #[instrument(skip_all, fields(occupancy = %occupancy))]
    async fn occupancy_description(
        &self,
        occupancy: &OccupancyCode,
    ) -> Result<Option<String>, PortError> {
        let description = self
            .repository
            .find_occupancy_description(occupancy.as_str())
            .await?
            .filter(|description| !description.trim().is_empty());
        Ok(description)
    }

    #[instrument(skip_all, fields(product = %product, occupancy_type = %occupancy_type))]
    async fn terrorism_slabs(
        &self,
        product: &ProductCode,
        occupancy_type: OccupancyType,
    ) -> Result<Vec<TerrorismSlab>, PortError> {
        let rows = self
            .repository
            .list_terrorism_slabs(product.as_str(), occupancy_type.as_str())
            .await?;
        debug!(count = rows.len(), "terrorism slabs loaded");
        Ok(rows
            .into_iter()
            .map(|row| slab_from_row(row, occupancy_type))
            .collect())
    }

    #[instrument(skip_all, fields(product = %product, add_on = %add_on))]
    async fn add_on_rates(
        &self,
        product: &ProductCode,
        add_on: &AddOnCode,
    ) -> Result<Vec<AddOnRateRow>, PortError> {
        let rows = self
            .repository
            .list_add_on_rates(product.as_str(), add_on.as_str())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match add_on_from_row(&row) {
                Ok(parsed) => Some(parsed),
                Err(error) => {
                    warn!(row_id = row.id, %error, "skipping unreadable add-on rate row");
                    None
                }
            })
            .collect())
    }
}

fn parse_error(error: RateParseError) -> PortError {
    PortError::transformation(error.to_string())
}

/// Converts a slab row; the type was the query filter so it is not re-parsed
pub(crate) fn slab_from_row(row: TerrorismSlabRow, occupancy_type: OccupancyType) -> TerrorismSlab {
    TerrorismSlab {
        occupancy_type,
        si_min: Money::new(row.si_min),
        si_max: row.si_max.map(Money::new),
        rate: PerMille::new(row.rate_per_mille),
    }
}

pub(crate) fn add_on_from_row(row: &AddOnRateDbRow) -> Result<AddOnRateRow, RateParseError> {
    let rule = OccupancyRule::parse(row.occupancy_rule.as_deref())?;
    let kind: RateKind = row.rate_type.parse()?;
    Ok(AddOnRateRow {
        rule,
        rate: ResolvedRate::new(row.rate_value, kind),
    })
}
