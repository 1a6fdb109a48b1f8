//! In-memory adapters for tests and local development.

mod content_reader;
mod entitlement_store;
mod processed_payment_store;

pub use content_reader::InMemoryContentReader;
pub use entitlement_store::InMemoryEntitlementStore;
pub use processed_payment_store::InMemoryProcessedPaymentStore;
