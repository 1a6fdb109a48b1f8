//! Mock invoice provider for tests and local development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::ports::{CreateInvoiceRequest, HostedInvoice, InvoiceError, InvoiceProvider};

/// Deterministic in-process invoice provider.
///
/// Records every request for assertion and hands out sequential invoice
/// ids with a fake payment page URL.
#[derive(Default)]
pub struct MockInvoiceProvider {
    counter: AtomicU64,
    requests: Mutex<Vec<CreateInvoiceRequest>>,
}

impl MockInvoiceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests seen so far (test inspection).
    pub fn requests(&self) -> Vec<CreateInvoiceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvoiceProvider for MockInvoiceProvider {
    async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<HostedInvoice, InvoiceError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request);

        Ok(HostedInvoice {
            id: format!("inv_mock_{}", n),
            payment_url: format!("https://pay.example.test/inv_mock_{}", n),
        })
    }
}
