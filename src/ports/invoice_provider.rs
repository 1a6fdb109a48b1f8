//! Invoice provider port for the external hosted-payment processor.
//!
//! Checkout creation is the only outbound call this service makes to the
//! processor: it creates a hosted invoice page the reader is redirected
//! to, embedding the order reference the processor will echo back
//! verbatim in its confirmation webhook.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request to create a hosted invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Order reference (`pro_<plan>_<account_id>`), echoed back by the
    /// processor in the webhook.
    pub order_reference: String,

    /// Human-readable description shown on the hosted payment page.
    pub description: String,

    /// Invoice amount.
    pub price_amount: f64,

    /// Fiat currency of the amount (e.g. "usd").
    pub price_currency: String,

    /// URL the processor redirects to after successful payment.
    pub success_url: String,

    /// URL the processor redirects to after a cancelled payment.
    pub cancel_url: String,

    /// Idempotency key for safe retries of the outbound call.
    pub idempotency_key: Option<String>,
}

/// Hosted invoice created at the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedInvoice {
    /// Processor-assigned invoice id.
    pub id: String,

    /// Hosted payment page URL to redirect the reader to.
    pub payment_url: String,
}

/// Errors from invoice provider operations.
#[derive(Debug, Clone, Error)]
pub enum InvoiceError {
    /// Network connectivity issue; safe to retry.
    #[error("Network error: {0}")]
    Network(String),

    /// Processor rejected our API credentials.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Processor returned a non-success status.
    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Processor response could not be interpreted.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl InvoiceError {
    /// Whether the operation can be safely retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            InvoiceError::Network(_) => true,
            InvoiceError::Provider { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Port for the hosted-invoice processor.
#[async_trait]
pub trait InvoiceProvider: Send + Sync {
    /// Create a hosted invoice and return its payment page URL.
    async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<HostedInvoice, InvoiceError>;
}
