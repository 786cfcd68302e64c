//! Quote Sink Doubles
//!
//! [`RecordingQuoteSink`] keeps every saved record for inspection;
//! [`FailingQuoteSink`] rejects every save, for best-effort persistence tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use core_kernel::{DomainPort, PortError};
use domain_rating::{QuoteRecord, QuoteSink};

/// Stores saved quotes in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingQuoteSink {
    records: Arc<Mutex<Vec<QuoteRecord>>>,
}

impl RecordingQuoteSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records saved so far
    pub async fn records(&self) -> Vec<QuoteRecord> {
        self.records.lock().await.clone()
    }
}

impl DomainPort for RecordingQuoteSink {}

#[async_trait]
impl QuoteSink for RecordingQuoteSink {
    async fn save_quote(&self, record: &QuoteRecord) -> Result<(), PortError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}

/// Fails every save with a connection error
#[derive(Debug, Clone, Default)]
pub struct FailingQuoteSink {
    attempts: Arc<AtomicUsize>,
}

impl FailingQuoteSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves attempted
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl DomainPort for FailingQuoteSink {}

#[async_trait]
impl QuoteSink for FailingQuoteSink {
    async fn save_quote(&self, _record: &QuoteRecord) -> Result<(), PortError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PortError::connection("quote store unavailable"))
    }
}
