//! In-memory implementation of ProcessedPaymentStore.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{ProcessedPayment, ProcessedPaymentStore, SaveResult};

/// In-memory processed-payment ledger keyed by payment id.
#[derive(Default)]
pub struct InMemoryProcessedPaymentStore {
    records: RwLock<HashMap<String, ProcessedPayment>>,
}

impl InMemoryProcessedPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded payments (test inspection).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ProcessedPaymentStore for InMemoryProcessedPaymentStore {
    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<ProcessedPayment>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(payment_id).cloned())
    }

    async fn record(&self, payment: ProcessedPayment) -> Result<SaveResult, DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&payment.payment_id) {
            Ok(SaveResult::AlreadyExists)
        } else {
            records.insert(payment.payment_id.clone(), payment);
            Ok(SaveResult::Inserted)
        }
    }
}
