//! Payment domain module.
//!
//! Turns the processor's asynchronous payment notifications into
//! entitlement mutations, exactly once per real payment.
//!
//! # Module Structure
//!
//! - `notification` - wire payload normalization and payment status
//! - `verifier` - HMAC-SHA512 signature verification
//! - `reconciler` - the per-delivery reconciliation state machine
//! - `webhook_errors` - error taxonomy with HTTP/retry semantics

mod notification;
mod reconciler;
mod verifier;
mod webhook_errors;

pub use notification::{PaymentNotification, PaymentStatus};
pub use reconciler::{IgnoreReason, ReconcileOutcome, WebhookReconciler};
pub use verifier::NotificationVerifier;
pub use webhook_errors::WebhookError;
