//! Ports - async trait seams between the domain and the outside world.
//!
//! Adapters (postgres, http clients, in-memory) implement these traits;
//! application handlers and the reconciler depend only on the traits.

mod content_reader;
mod entitlement_store;
mod invoice_provider;
mod processed_payment_store;

pub use content_reader::{ContentReader, PremiumResource};
pub use entitlement_store::EntitlementStore;
pub use invoice_provider::{
    CreateInvoiceRequest, HostedInvoice, InvoiceError, InvoiceProvider,
};
pub use processed_payment_store::{ProcessedPayment, ProcessedPaymentStore, SaveResult};
