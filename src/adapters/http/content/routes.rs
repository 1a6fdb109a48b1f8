//! Axum router configuration for content endpoints.

use axum::{routing::get, Router};

use super::super::AppState;
use super::handlers::get_resource;

/// Create the content API router.
///
/// # Routes
/// - `GET /:slug` - Access-gated resource fetch (anonymous allowed)
pub fn content_routes() -> Router<AppState> {
    Router::new().route("/:slug", get(get_resource))
}
