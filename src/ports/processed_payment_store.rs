//! Processed-payment ledger port - tracks which processor payments have
//! already been reconciled.
//!
//! ## Why the ledger exists
//!
//! Payment processors redeliver webhooks on timeouts, 5xx responses, and
//! lost acknowledgments. Without a ledger, a redelivered `finished`
//! notification would extend `pro_until` a second time for one payment.
//! The ledger makes reconciliation idempotent: replays of a recorded
//! payment id short-circuit to acknowledged-no-op.
//!
//! Races between concurrent duplicate deliveries are resolved by the
//! store's primary-key constraint: the first `record` wins, the loser
//! observes `SaveResult::AlreadyExists`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::DomainError;

/// Record of a reconciled payment notification.
#[derive(Debug, Clone)]
pub struct ProcessedPayment {
    /// Processor-assigned payment id, unique per real payment.
    pub payment_id: String,

    /// Order reference the notification carried.
    pub order_reference: String,

    /// Outcome of reconciliation: "committed" or "ignored".
    pub outcome: String,

    /// Why an ignored notification was ignored.
    pub detail: Option<String>,

    /// When reconciliation happened.
    pub processed_at: DateTime<Utc>,
}

impl ProcessedPayment {
    /// Record for a payment that mutated entitlement state.
    pub fn committed(payment_id: impl Into<String>, order_reference: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
            order_reference: order_reference.into(),
            outcome: "committed".to_string(),
            detail: None,
            processed_at: Utc::now(),
        }
    }

    /// Record for a payment acknowledged without any entitlement action.
    pub fn ignored(
        payment_id: impl Into<String>,
        order_reference: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            payment_id: payment_id.into(),
            order_reference: order_reference.into(),
            outcome: "ignored".to_string(),
            detail: Some(reason.into()),
            processed_at: Utc::now(),
        }
    }
}

/// Result of attempting to record a processed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// First time this payment id was recorded.
    Inserted,
    /// Another delivery already recorded this payment id.
    AlreadyExists,
}

/// Port for the processed-payment ledger.
///
/// Implementations must enforce uniqueness of `payment_id` at the store
/// level (PRIMARY KEY / unique constraint) so concurrent duplicates
/// cannot both observe `Inserted`.
#[async_trait]
pub trait ProcessedPaymentStore: Send + Sync {
    /// Look up a previously reconciled payment by processor payment id.
    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<ProcessedPayment>, DomainError>;

    /// Record a reconciled payment.
    ///
    /// `ON CONFLICT DO NOTHING` semantics: returns `Inserted` for the
    /// first writer and `AlreadyExists` for everyone else.
    async fn record(&self, payment: ProcessedPayment) -> Result<SaveResult, DomainError>;
}
