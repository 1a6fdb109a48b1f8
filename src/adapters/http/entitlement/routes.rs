//! Axum router configuration for entitlement endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::AppState;
use super::handlers::{check_access, create_checkout, get_entitlement, handle_payment_webhook};

/// Create the entitlement API router.
///
/// # Routes
///
/// ## Viewer Endpoints (require authentication)
/// - `GET /` - Current viewer's entitlement view
/// - `POST /checkout` - Start a paid checkout
///
/// ## Gate Endpoint (anonymous allowed)
/// - `GET /access` - Access-gate check for a premium resource
pub fn entitlement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_entitlement))
        .route("/access", get(check_access))
        .route("/checkout", post(create_checkout))
}

/// Create the payment webhook router.
///
/// Separate from the entitlement routes because webhooks carry no
/// session auth; they are verified via body signature.
///
/// # Routes
/// - `POST /payments` - Payment processor webhook
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/payments", post(handle_payment_webhook))
}
