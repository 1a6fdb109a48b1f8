//! HTTP adapters - Axum routes, handlers, and DTOs.
//!
//! Identity is delegated to the auth layer in front of this service; the
//! extractors here only read the account id header that layer injects.

pub mod content;
pub mod entitlement;

use std::sync::Arc;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::handlers::content::FetchResourceHandler;
use crate::application::handlers::entitlement::{
    CheckAccessHandler, CheckoutPricing, CreateCheckoutHandler, GetEntitlementHandler,
    HandlePaymentWebhookHandler,
};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode};
use crate::domain::payment::WebhookReconciler;
use crate::ports::{ContentReader, EntitlementStore, InvoiceProvider};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct AppState {
    pub entitlements: Arc<dyn EntitlementStore>,
    pub content: Arc<dyn ContentReader>,
    pub invoice_provider: Arc<dyn InvoiceProvider>,
    pub reconciler: Arc<WebhookReconciler>,
    pub pricing: CheckoutPricing,
    /// Name of the request header carrying the webhook signature.
    pub signature_header: String,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn get_entitlement_handler(&self) -> GetEntitlementHandler {
        GetEntitlementHandler::new(self.entitlements.clone())
    }

    pub fn check_access_handler(&self) -> CheckAccessHandler {
        CheckAccessHandler::new(self.entitlements.clone())
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.invoice_provider.clone(), self.pricing.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.reconciler.clone())
    }

    pub fn fetch_resource_handler(&self) -> FetchResourceHandler {
        FetchResourceHandler::new(self.content.clone(), self.entitlements.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Viewer Extraction
// ════════════════════════════════════════════════════════════════════════════════

/// Header the auth layer injects with the verified account id.
pub const ACCOUNT_HEADER: &str = "x-account-id";

/// Authenticated viewer; rejects anonymous requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedViewer {
    pub account_id: AccountId,
}

/// Optional viewer; anonymous requests extract as `None`.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub account_id: Option<AccountId>,
}

/// Rejection type for AuthenticatedViewer extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

fn account_from_parts(parts: &axum::http::request::Parts) -> Option<AccountId> {
    parts
        .headers
        .get(ACCOUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| AccountId::new(s).ok())
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedViewer
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let account_id = account_from_parts(parts).ok_or(AuthenticationRequired)?;
            Ok(AuthenticatedViewer { account_id })
        })
    }
}

impl<S> axum::extract::FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Ok(Viewer {
                account_id: account_from_parts(parts),
            })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// JSON error payload: `{ "error": { "code": ..., "message": ... } }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Inner error object.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError
            | ErrorCode::ExternalServiceError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal details stay in the logs, not the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
            "Internal error".to_string()
        } else {
            self.0.message.clone()
        };

        let body = ErrorResponse::new(self.0.code.to_string(), message);
        (status, Json(body)).into_response()
    }
}
