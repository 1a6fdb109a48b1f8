//! Webhook reconciler - turns a processor notification into an
//! entitlement mutation, exactly once per real payment.
//!
//! ## Per-delivery state machine
//!
//! 1. Verify the HMAC-SHA512 signature over the raw body
//! 2. Filter on payment status; only `finished` is actionable
//! 3. Parse the order reference back into `(plan, account)`
//! 4. Compute the new period end (`now + plan.days()`)
//! 5. Commit through the entitlement store and record the payment id
//!
//! ## Race Condition Handling
//!
//! Concurrent duplicate deliveries both pass the ledger pre-check and
//! both upsert (the writes carry the same payment's data, so the row is
//! never corrupted); the ledger's primary-key constraint then picks one
//! winner. The loser reports `AlreadyProcessed`.
//!
//! A commit failure is NOT recorded in the ledger, so the processor's
//! redelivery re-attempts the same upsert rather than short-circuiting.

use std::sync::Arc;

use crate::domain::entitlement::{Entitlement, OrderReference};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::{EntitlementStore, ProcessedPayment, ProcessedPaymentStore, SaveResult};

use super::notification::{PaymentNotification, PaymentStatus};
use super::verifier::NotificationVerifier;
use super::webhook_errors::WebhookError;

/// Terminal outcome of one webhook delivery.
///
/// Every variant is acknowledged to the processor with a 2xx; the only
/// non-success paths are the `Err` cases of [`WebhookReconciler::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The payment extended an entitlement.
    Committed {
        account_id: AccountId,
        pro_until: Timestamp,
    },

    /// This payment id was already reconciled; nothing was mutated.
    AlreadyProcessed,

    /// Acknowledged without any entitlement action.
    Ignored(IgnoreReason),
}

/// Why a notification was acknowledged without action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Body failed normalization (valid signature, broken payload).
    MalformedPayload(String),

    /// Status was not the terminal success value.
    NonTerminalStatus(PaymentStatus),

    /// Order reference did not parse into `(plan, account)`.
    MalformedReference(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::MalformedPayload(detail) => write!(f, "malformed payload: {}", detail),
            IgnoreReason::NonTerminalStatus(status) => {
                write!(f, "non-terminal status '{}'", status)
            }
            IgnoreReason::MalformedReference(detail) => {
                write!(f, "malformed order reference: {}", detail)
            }
        }
    }
}

/// Reconciles payment notifications into entitlement state.
pub struct WebhookReconciler {
    verifier: NotificationVerifier,
    entitlements: Arc<dyn EntitlementStore>,
    ledger: Arc<dyn ProcessedPaymentStore>,
}

impl WebhookReconciler {
    /// Creates a reconciler over the given verifier and stores.
    pub fn new(
        verifier: NotificationVerifier,
        entitlements: Arc<dyn EntitlementStore>,
        ledger: Arc<dyn ProcessedPaymentStore>,
    ) -> Self {
        Self {
            verifier,
            entitlements,
            ledger,
        }
    }

    /// Process one webhook delivery.
    ///
    /// # Returns
    ///
    /// - `Ok(outcome)` - acknowledged; see [`ReconcileOutcome`]
    /// - `Err(InvalidSignature | MissingSignature)` - rejected, 401
    /// - `Err(Database)` - commit failed, 5xx so the processor retries
    pub async fn process(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<ReconcileOutcome, WebhookError> {
        // 1. Verify before touching the payload at all.
        let signature = signature.ok_or(WebhookError::MissingSignature)?;
        self.verifier.verify(payload, signature)?;

        // A signed-but-broken payload is the processor's bug; redelivery
        // cannot fix it, so acknowledge and flag instead of failing.
        let notification = match PaymentNotification::normalize(payload) {
            Ok(notification) => notification,
            Err(e) => {
                tracing::warn!(error = %e, "acknowledging unparseable payment notification");
                return Ok(ReconcileOutcome::Ignored(IgnoreReason::MalformedPayload(
                    e.to_string(),
                )));
            }
        };

        // 2. Filter: intermediate and failure statuses carry no action.
        if !notification.status.is_success() {
            tracing::debug!(
                payment_id = %notification.payment_id,
                status = %notification.status,
                "ignoring non-terminal payment notification"
            );
            return Ok(ReconcileOutcome::Ignored(IgnoreReason::NonTerminalStatus(
                notification.status,
            )));
        }

        // Replay of an already-reconciled payment: acknowledge, no-op.
        if self
            .ledger
            .find_by_payment_id(&notification.payment_id)
            .await?
            .is_some()
        {
            tracing::debug!(
                payment_id = %notification.payment_id,
                "duplicate delivery of reconciled payment"
            );
            return Ok(ReconcileOutcome::AlreadyProcessed);
        }

        // 3. Parse the order reference back into (plan, account).
        let reference = match OrderReference::parse(&notification.order_reference) {
            Ok(reference) => reference,
            Err(e) => {
                tracing::warn!(
                    payment_id = %notification.payment_id,
                    order_reference = %notification.order_reference,
                    error = %e,
                    "acknowledging payment with unparseable order reference"
                );
                // Recorded so replays short-circuit instead of re-logging.
                self.ledger
                    .record(ProcessedPayment::ignored(
                        &notification.payment_id,
                        &notification.order_reference,
                        e.to_string(),
                    ))
                    .await?;
                return Ok(ReconcileOutcome::Ignored(IgnoreReason::MalformedReference(
                    e.to_string(),
                )));
            }
        };

        // 4. Compute the new period end from the confirmation instant.
        let pro_until = reference.plan.extend_from(Timestamp::now());
        let entitlement = Entitlement::active_until(reference.account_id.clone(), pro_until);

        // 5. Commit. A failure here propagates as retryable.
        self.entitlements.upsert(&entitlement).await?;

        // First recorder wins; a concurrent duplicate reports no-op.
        match self
            .ledger
            .record(ProcessedPayment::committed(
                &notification.payment_id,
                &notification.order_reference,
            ))
            .await?
        {
            SaveResult::Inserted => {
                tracing::info!(
                    payment_id = %notification.payment_id,
                    account_id = %reference.account_id,
                    plan = %reference.plan,
                    "payment reconciled, entitlement extended"
                );
                Ok(ReconcileOutcome::Committed {
                    account_id: reference.account_id,
                    pro_until,
                })
            }
            SaveResult::AlreadyExists => Ok(ReconcileOutcome::AlreadyProcessed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use crate::domain::payment::verifier::compute_test_signature;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    const TEST_SECRET: &str = "ipn_reconciler_secret";

    // ══════════════════════════════════════════════════════════════
    // Test Infrastructure
    // ══════════════════════════════════════════════════════════════

    /// In-memory entitlement store with a failure switch.
    struct MockEntitlementStore {
        rows: RwLock<HashMap<String, Entitlement>>,
        fail_writes: AtomicBool,
    }

    impl MockEntitlementStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                rows: RwLock::new(HashMap::new()),
                fail_writes: AtomicBool::new(false),
            })
        }

        fn set_failing(&self, failing: bool) {
            self.fail_writes.store(failing, Ordering::SeqCst);
        }

        async fn stored(&self, account_id: &str) -> Option<Entitlement> {
            self.rows.read().await.get(account_id).cloned()
        }
    }

    #[async_trait]
    impl EntitlementStore for MockEntitlementStore {
        async fn get(&self, account_id: &AccountId) -> Result<Entitlement, DomainError> {
            let rows = self.rows.read().await;
            Ok(rows
                .get(account_id.as_str())
                .cloned()
                .unwrap_or_else(|| Entitlement::none(account_id.clone())))
        }

        async fn upsert(&self, entitlement: &Entitlement) -> Result<(), DomainError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DomainError::database("simulated outage"));
            }
            let mut rows = self.rows.write().await;
            rows.insert(entitlement.account_id.as_str().to_string(), entitlement.clone());
            Ok(())
        }
    }

    /// In-memory ledger keyed by payment id.
    struct MockLedger {
        records: RwLock<HashMap<String, ProcessedPayment>>,
    }

    impl MockLedger {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                records: RwLock::new(HashMap::new()),
            })
        }

        async fn len(&self) -> usize {
            self.records.read().await.len()
        }
    }

    #[async_trait]
    impl ProcessedPaymentStore for MockLedger {
        async fn find_by_payment_id(
            &self,
            payment_id: &str,
        ) -> Result<Option<ProcessedPayment>, DomainError> {
            Ok(self.records.read().await.get(payment_id).cloned())
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

    fn reconciler(
        entitlements: Arc<MockEntitlementStore>,
        ledger: Arc<MockLedger>,
    ) -> WebhookReconciler {
        WebhookReconciler::new(
            NotificationVerifier::new(TEST_SECRET),
            entitlements,
            ledger,
        )
    }

    fn finished_payload(payment_id: u64, order_id: &str) -> Vec<u8> {
        json!({
            "payment_id": payment_id,
            "payment_status": "finished",
            "order_id": order_id,
        })
        .to_string()
        .into_bytes()
    }

    fn sign(payload: &[u8]) -> String {
        compute_test_signature(TEST_SECRET, payload)
    }

    // ══════════════════════════════════════════════════════════════
    // Happy Path
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn finished_payment_commits_entitlement() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        let payload = finished_payload(101, "pro_pro_monthly_acct1");
        let outcome = reconciler.process(&payload, Some(&sign(&payload))).await.unwrap();

        match outcome {
            ReconcileOutcome::Committed { account_id, pro_until } => {
                assert_eq!(account_id.as_str(), "acct1");
                let days = pro_until.duration_since(&Timestamp::now()).num_days();
                assert_eq!(days, 30); // 31 days minus elapsed nanoseconds
            }
            other => panic!("expected Committed, got {:?}", other),
        }

        let stored = entitlements.stored("acct1").await.unwrap();
        assert!(stored.is_active());
    }

    #[tokio::test]
    async fn quarterly_plan_extends_93_days() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger);

        let payload = finished_payload(102, "pro_pro_3months_acct2");
        reconciler.process(&payload, Some(&sign(&payload))).await.unwrap();

        let stored = entitlements.stored("acct2").await.unwrap();
        let until = stored.pro_until.unwrap();
        assert_eq!(until.duration_since(&Timestamp::now()).num_days(), 92);
    }

    #[tokio::test]
    async fn renewal_resets_instead_of_stacking() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger);

        // Existing period with 300 days remaining.
        let generous = Entitlement::active_until(
            AccountId::new("acct3").unwrap(),
            Timestamp::now().add_days(300),
        );
        entitlements.upsert(&generous).await.unwrap();

        let payload = finished_payload(103, "pro_pro_monthly_acct3");
        reconciler.process(&payload, Some(&sign(&payload))).await.unwrap();

        let stored = entitlements.stored("acct3").await.unwrap();
        let days = stored.pro_until.unwrap().duration_since(&Timestamp::now()).num_days();
        assert_eq!(days, 30);
    }

    // ══════════════════════════════════════════════════════════════
    // Idempotency
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn duplicate_delivery_does_not_extend_twice() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        let payload = finished_payload(104, "pro_pro_monthly_acct4");
        let signature = sign(&payload);

        reconciler.process(&payload, Some(&signature)).await.unwrap();
        let first_until = entitlements.stored("acct4").await.unwrap().pro_until.unwrap();

        let outcome = reconciler.process(&payload, Some(&signature)).await.unwrap();
        assert_eq!(outcome, ReconcileOutcome::AlreadyProcessed);

        let second_until = entitlements.stored("acct4").await.unwrap().pro_until.unwrap();
        assert_eq!(first_until, second_until);
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_payments_for_same_account_both_apply() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        let first = finished_payload(105, "pro_pro_monthly_acct5");
        let second = finished_payload(106, "pro_pro_monthly_acct5");

        let o1 = reconciler.process(&first, Some(&sign(&first))).await.unwrap();
        let o2 = reconciler.process(&second, Some(&sign(&second))).await.unwrap();

        assert!(matches!(o1, ReconcileOutcome::Committed { .. }));
        assert!(matches!(o2, ReconcileOutcome::Committed { .. }));
        assert_eq!(ledger.len().await, 2);
    }

    // ══════════════════════════════════════════════════════════════
    // Rejection and Filtering
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_signature_is_rejected_without_mutation() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        let payload = finished_payload(107, "pro_pro_monthly_acct6");
        let result = reconciler.process(&payload, None).await;

        assert!(matches!(result, Err(WebhookError::MissingSignature)));
        assert!(entitlements.stored("acct6").await.is_none());
        assert_eq!(ledger.len().await, 0);
    }

    #[tokio::test]
    async fn invalid_signature_is_rejected_without_mutation() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        let payload = finished_payload(108, "pro_pro_monthly_acct7");
        let result = reconciler.process(&payload, Some(&"ab".repeat(64))).await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
        assert!(entitlements.stored("acct7").await.is_none());
        assert_eq!(ledger.len().await, 0);
    }

    #[tokio::test]
    async fn non_terminal_status_never_mutates() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        for status in ["waiting", "confirming", "partially_paid", "failed", "refunded", "expired"] {
            let payload = json!({
                "payment_id": 109,
                "payment_status": status,
                "order_id": "pro_pro_monthly_acct8",
            })
            .to_string()
            .into_bytes();

            let outcome = reconciler.process(&payload, Some(&sign(&payload))).await.unwrap();
            assert!(
                matches!(outcome, ReconcileOutcome::Ignored(IgnoreReason::NonTerminalStatus(_))),
                "status '{}' must be ignored",
                status
            );
        }

        assert!(entitlements.stored("acct8").await.is_none());
        assert_eq!(ledger.len().await, 0);
    }

    #[tokio::test]
    async fn malformed_payload_is_acknowledged() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements, ledger);

        let payload = b"definitely not json".to_vec();
        let outcome = reconciler.process(&payload, Some(&sign(&payload))).await.unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::Ignored(IgnoreReason::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn malformed_reference_is_acknowledged_and_recorded() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        let payload = finished_payload(110, "pro_pro_lifetime_acct9");
        let outcome = reconciler.process(&payload, Some(&sign(&payload))).await.unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::Ignored(IgnoreReason::MalformedReference(_))
        ));
        assert!(entitlements.stored("acct9").await.is_none());

        // Replay short-circuits off the ledger record.
        let replay = reconciler.process(&payload, Some(&sign(&payload))).await.unwrap();
        assert_eq!(replay, ReconcileOutcome::AlreadyProcessed);
        assert_eq!(ledger.len().await, 1);
    }

    // ══════════════════════════════════════════════════════════════
    // Commit Failure
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn store_failure_surfaces_as_retryable() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());
        entitlements.set_failing(true);

        let payload = finished_payload(111, "pro_pro_monthly_acct10");
        let result = reconciler.process(&payload, Some(&sign(&payload))).await;

        match result {
            Err(WebhookError::Database(_)) => {}
            other => panic!("expected Database error, got {:?}", other),
        }
        // No ledger record, so the redelivery is not short-circuited.
        assert_eq!(ledger.len().await, 0);
    }

    #[tokio::test]
    async fn redelivery_after_store_failure_succeeds() {
        let entitlements = MockEntitlementStore::new();
        let ledger = MockLedger::new();
        let reconciler = reconciler(entitlements.clone(), ledger.clone());

        let payload = finished_payload(112, "pro_pro_monthly_acct11");
        let signature = sign(&payload);

        entitlements.set_failing(true);
        assert!(reconciler.process(&payload, Some(&signature)).await.is_err());

        entitlements.set_failing(false);
        let outcome = reconciler.process(&payload, Some(&signature)).await.unwrap();

        assert!(matches!(outcome, ReconcileOutcome::Committed { .. }));
        assert!(entitlements.stored("acct11").await.unwrap().is_active());
    }
}
