//! Entitlement use-case handlers.

mod check_access;
mod create_checkout;
mod get_entitlement;
mod handle_payment_webhook;

pub use check_access::{CheckAccessHandler, CheckAccessQuery};
pub use create_checkout::{
    CheckoutPricing, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult,
};
pub use get_entitlement::{EntitlementView, GetEntitlementHandler, GetEntitlementQuery};
pub use handle_payment_webhook::{HandlePaymentWebhookCommand, HandlePaymentWebhookHandler};
