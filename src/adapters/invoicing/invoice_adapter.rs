//! HTTP adapter for the hosted-invoice processor.
//!
//! Implements the `InvoiceProvider` trait against the processor's REST
//! API. The API key never appears in logs or serialized output; it is
//! held as a `SecretString` and only exposed when building the request.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{CreateInvoiceRequest, HostedInvoice, InvoiceError, InvoiceProvider};

/// Processor API configuration.
#[derive(Clone)]
pub struct InvoicingConfig {
    /// API key for outbound calls.
    api_key: SecretString,

    /// Base URL of the processor API.
    api_base_url: String,
}

impl InvoicingConfig {
    /// Create a new processor configuration.
    pub fn new(api_key: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: api_base_url.into(),
        }
    }
}

/// Hosted-invoice processor adapter.
pub struct HostedInvoiceAdapter {
    config: InvoicingConfig,
    http_client: reqwest::Client,
}

impl HostedInvoiceAdapter {
    /// Create a new adapter with the given configuration.
    pub fn new(config: InvoicingConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Wire shape of the processor's invoice-creation response.
#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    id: String,
    invoice_url: String,
}

#[async_trait]
impl InvoiceProvider for HostedInvoiceAdapter {
    async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<HostedInvoice, InvoiceError> {
        let url = format!("{}/v1/invoice", self.config.api_base_url);

        let body = serde_json::json!({
            "order_id": request.order_reference,
            "order_description": request.description,
            "price_amount": request.price_amount,
            "price_currency": request.price_currency,
            "success_url": request.success_url,
            "cancel_url": request.cancel_url,
        });

        let mut http_request = self
            .http_client
            .post(&url)
            .header("x-api-key", self.config.api_key.expose_secret())
            .json(&body);

        if let Some(key) = &request.idempotency_key {
            http_request = http_request.header("Idempotency-Key", key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| InvoiceError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(InvoiceError::Authentication(format!(
                "processor rejected API key ({})",
                status
            )));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InvoiceError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let invoice: InvoiceResponse = response
            .json()
            .await
            .map_err(|e| InvoiceError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            invoice_id = %invoice.id,
            order_reference = %request.order_reference,
            "hosted invoice created"
        );

        Ok(HostedInvoice {
            id: invoice.id,
            payment_url: invoice.invoice_url,
        })
    }
}
