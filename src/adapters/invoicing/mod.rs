//! Hosted-invoice processor adapters.

mod invoice_adapter;
mod mock_provider;

pub use invoice_adapter::{HostedInvoiceAdapter, InvoicingConfig};
pub use mock_provider::MockInvoiceProvider;
