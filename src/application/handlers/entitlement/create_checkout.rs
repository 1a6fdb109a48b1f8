//! CreateCheckoutHandler - Command handler for starting a paid checkout.
//!
//! Builds the order reference the processor will echo back in its
//! confirmation webhook and creates a hosted invoice the reader is
//! redirected to.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entitlement::{OrderReference, Plan};
use crate::domain::foundation::{AccountId, DomainError};
use crate::ports::{CreateInvoiceRequest, InvoiceProvider};

/// Command to create a hosted checkout for a plan.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub account_id: AccountId,
    pub plan: Plan,
    pub success_url: String,
    pub cancel_url: String,
}

/// Result of checkout creation.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub invoice_id: String,
    pub payment_url: String,
}

/// Per-plan pricing, injected from configuration at construction.
#[derive(Debug, Clone)]
pub struct CheckoutPricing {
    pub monthly_usd: f64,
    pub quarterly_usd: f64,
    pub currency: String,
}

impl CheckoutPricing {
    /// Invoice amount for a plan.
    pub fn amount_for(&self, plan: Plan) -> f64 {
        match plan {
            Plan::ProMonthly => self.monthly_usd,
            Plan::Pro3Months => self.quarterly_usd,
        }
    }
}

/// Handler creating hosted invoices at the payment processor.
pub struct CreateCheckoutHandler {
    provider: Arc<dyn InvoiceProvider>,
    pricing: CheckoutPricing,
}

impl CreateCheckoutHandler {
    pub fn new(provider: Arc<dyn InvoiceProvider>, pricing: CheckoutPricing) -> Self {
        Self { provider, pricing }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, DomainError> {
        let reference = OrderReference::new(cmd.plan, cmd.account_id.clone());

        let request = CreateInvoiceRequest {
            order_reference: reference.encode(),
            description: format!("Coinpress {}", cmd.plan.display_name()),
            price_amount: self.pricing.amount_for(cmd.plan),
            price_currency: self.pricing.currency.clone(),
            success_url: cmd.success_url,
            cancel_url: cmd.cancel_url,
            idempotency_key: Some(Uuid::new_v4().to_string()),
        };

        let invoice = self.provider.create_invoice(request).await.map_err(|e| {
            tracing::error!(
                account_id = %cmd.account_id,
                plan = %cmd.plan,
                error = %e,
                "invoice creation failed"
            );
            DomainError::external(e.to_string())
        })?;

        tracing::info!(
            account_id = %cmd.account_id,
            plan = %cmd.plan,
            invoice_id = %invoice.id,
            "checkout created"
        );

        Ok(CreateCheckoutResult {
            invoice_id: invoice.id,
            payment_url: invoice.payment_url,
        })
    }
}
