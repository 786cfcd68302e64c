//! Quote service
//!
//! Computes a premium and then offers the quote to the quote log. Saving is
//! best effort: a failed save is logged and the breakdown is returned anyway.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};

use core_kernel::QuoteId;
use domain_rating::{
    PremiumBreakdown, PremiumComposer, PremiumRequest, QuoteRecord, QuoteSink, RatingError,
};

/// A computed quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteOutcome {
    pub quote_id: QuoteId,
    pub breakdown: PremiumBreakdown,
    /// False when persistence was disabled or failed
    pub saved: bool,
}

/// Premium calculation plus best-effort persistence
#[derive(Clone)]
pub struct QuoteService {
    composer: PremiumComposer,
    sink: Option<Arc<dyn QuoteSink>>,
}

impl QuoteService {
    /// Creates a service that saves every computed quote to `sink`
    pub fn new(composer: PremiumComposer, sink: Arc<dyn QuoteSink>) -> Self {
        Self {
            composer,
            sink: Some(sink),
        }
    }

    /// Creates a service that never saves quotes
    pub fn without_persistence(composer: PremiumComposer) -> Self {
        Self { composer, sink: None }
    }

    /// Computes a quote and offers it to the quote log
    ///
    /// # Errors
    ///
    /// Only calculation errors. Persistence failures never fail a quote.
    #[instrument(skip_all, fields(product = %request.product_code))]
    pub async fn quote(&self, request: &PremiumRequest) -> Result<QuoteOutcome, RatingError> {
        let breakdown = self.composer.compute_premium(request).await?;
        let quote_id = QuoteId::new_v7();

        let saved = match &self.sink {
            Some(sink) => self.save(sink.as_ref(), quote_id, request, &breakdown).await,
            None => false,
        };

        info!(%quote_id, gross = %breakdown.gross_premium, saved, "quote issued");

        Ok(QuoteOutcome {
            quote_id,
            breakdown,
            saved,
        })
    }

    async fn save(
        &self,
        sink: &dyn QuoteSink,
        quote_id: QuoteId,
        request: &PremiumRequest,
        breakdown: &PremiumBreakdown,
    ) -> bool {
        let record = match quote_record(quote_id, request, breakdown) {
            Ok(record) => record,
            Err(error) => {
                warn!(%quote_id, %error, "quote could not be serialised, not saved");
                return false;
            }
        };

        match sink.save_quote(&record).await {
            Ok(()) => true,
            Err(error) => {
                warn!(%quote_id, %error, "failed to save quote");
                false
            }
        }
    }
}

/// Builds the persisted form of a quote
pub fn quote_record(
    quote_id: QuoteId,
    request: &PremiumRequest,
    breakdown: &PremiumBreakdown,
) -> Result<QuoteRecord, serde_json::Error> {
    Ok(QuoteRecord {
        id: quote_id,
        product_code: breakdown.product_code.clone(),
        request_data: serde_json::to_value(request)?,
        response_data: serde_json::to_value(breakdown)?,
        created_at: Utc::now(),
    })
}
