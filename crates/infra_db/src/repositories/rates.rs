//! Rate repository
//!
//! Read-only access to `product_basic_rates`, `occupancies`,
//! `terrorism_slabs` and `add_on_rates`.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// A terrorism slab as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TerrorismSlabRow {
    pub id: i32,
    pub occupancy_type: String,
    pub si_min: Decimal,
    pub si_max: Option<Decimal>,
    pub rate_per_mille: Decimal,
}

/// An active add-on rate row as stored
///
/// `occupancy_rule` is the raw `add_on_rates.occupancy_type` column.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AddOnRateDbRow {
    pub id: i32,
    pub occupancy_rule: Option<String>,
    pub rate_type: String,
    pub rate_value: Decimal,
}

/// Repository for rate lookups
#[derive(Debug, Clone)]
pub struct RateRepository {
    pool: PgPool,
}

impl RateRepository {
    /// Creates a new RateRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Basic rate for a product on an occupancy, by IIB code
    ///
    /// If several rows exist the oldest wins.
    pub async fn find_basic_rate(
        &self,
        product_code: &str,
        iib_code: &str,
    ) -> Result<Option<Decimal>, DatabaseError> {
        let rate = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT pbr.basic_rate
            FROM product_basic_rates pbr
            JOIN occupancies o ON o.id = pbr.occupancy_id
            WHERE pbr.product_code = $1 AND o.iib_code = $2
            ORDER BY pbr.id
            LIMIT 1
            "#,
        )
        .bind(product_code)
        .bind(iib_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }

    /// Stored occupancy type name for an IIB code
    pub async fn find_occupancy_type(
        &self,
        iib_code: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let occupancy_type = sqlx::query_scalar::<_, String>(
            "SELECT occupancy_type FROM occupancies WHERE iib_code = $1",
        )
        .bind(iib_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(occupancy_type)
    }

    /// Stored description for an IIB code
    pub async fn find_occupancy_description(
        &self,
        iib_code: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let description = sqlx::query_scalar::<_, String>(
            "SELECT occupancy_description FROM occupancies WHERE iib_code = $1",
        )
        .bind(iib_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(description)
    }

    /// Terrorism slabs of a product for one stored occupancy type name
    pub async fn list_terrorism_slabs(
        &self,
        product_code: &str,
        occupancy_type: &str,
    ) -> Result<Vec<TerrorismSlabRow>, DatabaseError> {
        let slabs = sqlx::query_as::<_, TerrorismSlabRow>(
            r#"
            SELECT id, occupancy_type, si_min, si_max, rate_per_mille
            FROM terrorism_slabs
            WHERE product_code = $1 AND occupancy_type = $2
            ORDER BY si_min, id
            "#,
        )
        .bind(product_code)
        .bind(occupancy_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(slabs)
    }

    /// Active rate rows for (product, add-on), in id order
    ///
    /// Rows are dropped if either the rate row or its add-on master entry
    /// is inactive.
    pub async fn list_add_on_rates(
        &self,
        product_code: &str,
        add_on_code: &str,
    ) -> Result<Vec<AddOnRateDbRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddOnRateDbRow>(
            r#"
            SELECT r.id, r.occupancy_type AS occupancy_rule, r.rate_type, r.rate_value
            FROM add_on_rates r
            JOIN add_on_master m ON m.id = r.add_on_id
            WHERE r.product_code = $1
              AND m.add_on_code = $2
              AND r.active
              AND m.active
            ORDER BY r.id
            "#,
        )
        .bind(product_code)
        .bind(add_on_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
