//! HTTP handlers for entitlement endpoints.
//!
//! These handlers connect Axum routes to application layer
//! command/query handlers.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::entitlement::{
    CheckAccessQuery, CreateCheckoutCommand, GetEntitlementQuery, HandlePaymentWebhookCommand,
};
use crate::domain::payment::ReconcileOutcome;

use super::super::{ApiError, AppState, AuthenticatedViewer, ErrorResponse, Viewer};
use super::dto::{
    AccessCheckParams, AccessCheckResponse, CheckoutResponse, CreateCheckoutRequest,
    EntitlementResponse, WebhookAckResponse,
};

/// GET /api/entitlements - Current viewer's entitlement view
pub async fn get_entitlement(
    State(state): State<AppState>,
    viewer: AuthenticatedViewer,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_entitlement_handler();
    let query = GetEntitlementQuery {
        account_id: viewer.account_id,
    };

    let view = handler.handle(query).await?;

    Ok(Json(EntitlementResponse::from(view)))
}

/// GET /api/entitlements/access - Access-gate check for a premium resource
///
/// Anonymous callers get a normal deny, not an error. The response never
/// distinguishes "not logged in" from "expired".
pub async fn check_access(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(params): Query<AccessCheckParams>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.check_access_handler();
    let query = CheckAccessQuery {
        viewer: viewer.account_id,
        premium: params.premium.unwrap_or(true),
    };

    let decision = handler.handle(query).await?;

    Ok(Json(AccessCheckResponse {
        has_access: decision.is_granted(),
    }))
}

/// POST /api/entitlements/checkout - Start a paid checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    viewer: AuthenticatedViewer,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_checkout_handler();
    let cmd = CreateCheckoutCommand {
        account_id: viewer.account_id,
        plan: request.plan,
        success_url: request.success_url,
        cancel_url: request.cancel_url,
    };

    let result = handler.handle(cmd).await?;

    let response = CheckoutResponse {
        invoice_id: result.invoice_id,
        payment_url: result.payment_url,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/webhooks/payments - Payment processor webhook
///
/// No session auth; authenticity comes from the body signature. The raw
/// bytes are passed through untouched because the signature covers them.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> axum::response::Response {
    let signature = headers
        .get(state.signature_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match handler.handle(cmd).await {
        Ok(outcome) => {
            let outcome_label = match outcome {
                ReconcileOutcome::Committed { .. } => "committed",
                ReconcileOutcome::AlreadyProcessed => "already_processed",
                ReconcileOutcome::Ignored(_) => "ignored",
            };
            (
                StatusCode::OK,
                Json(WebhookAckResponse {
                    status: "ok",
                    outcome: outcome_label,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = e.status_code();
            (status, Json(ErrorResponse::new("WEBHOOK_REJECTED", e.to_string()))).into_response()
        }
    }
}
