//! HandlePaymentWebhookHandler - Command handler for processor webhooks.
//!
//! Thin wrapper around the domain reconciler; the HTTP adapter maps the
//! outcome to a response.

use std::sync::Arc;

use crate::domain::payment::{ReconcileOutcome, WebhookError, WebhookReconciler};

/// Command carrying one raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as signed by the processor.
    pub payload: Vec<u8>,

    /// Hex signature header value, if present.
    pub signature: Option<String>,
}

/// Handler reconciling payment webhooks.
pub struct HandlePaymentWebhookHandler {
    reconciler: Arc<WebhookReconciler>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(reconciler: Arc<WebhookReconciler>) -> Self {
        Self { reconciler }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<ReconcileOutcome, WebhookError> {
        self.reconciler
            .process(&cmd.payload, cmd.signature.as_deref())
            .await
    }
}
