//! PostgreSQL Quote Sink
//!
//! Implements [`QuoteSink`] by inserting into `irisk_quotes`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_rating::{QuoteRecord, QuoteSink};

use crate::repositories::{NewQuote, QuoteRepository};

/// PostgreSQL-backed implementation of the QuoteSink port
#[derive(Debug, Clone)]
pub struct PostgresQuoteSink {
    repository: QuoteRepository,
}

impl PostgresQuoteSink {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: QuoteRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &QuoteRepository {
        &self.repository
    }
}

impl DomainPort for PostgresQuoteSink {}

#[async_trait]
impl QuoteSink for PostgresQuoteSink {
    #[instrument(skip(self, record), fields(quote_id = %record.id, product = %record.product_code))]
    async fn save_quote(&self, record: &QuoteRecord) -> Result<(), PortError> {
        self.repository.insert(&new_quote(record)).await?;
        debug!("quote saved");
        Ok(())
    }
}

pub(crate) fn new_quote(record: &QuoteRecord) -> NewQuote {
    NewQuote {
        id: *record.id.as_uuid(),
        product: record.product_code.to_string(),
        request_data: record.request_data.clone(),
        response_data: record.response_data.clone(),
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{ProductCode, QuoteId};
    use serde_json::json;

    #[test]
    fn test_record_to_row() {
        let id = QuoteId::new_v7();
        let record = QuoteRecord {
            id,
            product_code: ProductCode::parse("ubgr").unwrap(),
            request_data: json!({"a": 1}),
            response_data: json!({"gross_premium": "322.08"}),
            created_at: Utc::now(),
        };

        let row = new_quote(&record);
        assert_eq!(row.id, *id.as_uuid());
        assert_eq!(row.product, "UBGR");
        assert_eq!(row.response_data["gross_premium"], "322.08");
    }
}
