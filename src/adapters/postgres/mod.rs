//! PostgreSQL adapters.

mod entitlement_store;
mod processed_payment_store;

pub use entitlement_store::PostgresEntitlementStore;
pub use processed_payment_store::PostgresProcessedPaymentStore;
