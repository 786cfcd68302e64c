//! Quote repository
//!
//! Append-only log of computed quotes in `irisk_quotes`.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// A quote to insert
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub id: Uuid,
    pub product: String,
    pub request_data: Value,
    pub response_data: Value,
    pub created_at: DateTime<Utc>,
}

/// A stored quote
#[derive(Debug, Clone, FromRow)]
pub struct QuoteRow {
    pub id: Uuid,
    pub product: String,
    pub request_data: Value,
    pub response_data: Value,
    pub created_at: DateTime<Utc>,
}

/// Repository for the quote log
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    /// Creates a new QuoteRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a quote
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the id already exists
    pub async fn insert(&self, quote: &NewQuote) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO irisk_quotes (id, product, request_data, response_data, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(quote.id)
        .bind(&quote.product)
        .bind(&quote.request_data)
        .bind(&quote.response_data)
        .bind(quote.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Fetches a quote by id
    pub async fn get(&self, id: Uuid) -> Result<QuoteRow, DatabaseError> {
        sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, product, request_data, response_data, created_at
            FROM irisk_quotes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Quote", id))
    }

    /// Number of stored quotes for a product
    pub async fn count_for_product(&self, product: &str) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM irisk_quotes WHERE product = $1",
        )
        .bind(product)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
