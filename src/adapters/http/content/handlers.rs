//! HTTP handlers for access-gated content reads.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::content::{FetchResourceQuery, FetchResourceResult};

use super::super::{ApiError, AppState, ErrorResponse, Viewer};
use super::dto::{PaywallResponse, ResourceResponse};

/// GET /api/content/:slug - Fetch a resource through the access gate
///
/// Premium resources render as a 402 paywall prompt unless the viewer's
/// entitlement is active; the body is never included in a denied
/// response.
pub async fn get_resource(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let handler = state.fetch_resource_handler();
    let query = FetchResourceQuery {
        slug,
        viewer: viewer.account_id,
    };

    let result = handler.handle(query).await?;

    let response = match result {
        FetchResourceResult::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("RESOURCE_NOT_FOUND", "No such resource")),
        )
            .into_response(),
        FetchResourceResult::Paywalled { slug, title } => (
            StatusCode::PAYMENT_REQUIRED,
            Json(PaywallResponse::new(slug, title)),
        )
            .into_response(),
        FetchResourceResult::Granted(resource) => {
            Json(ResourceResponse::from(resource)).into_response()
        }
    };

    Ok(response)
}
