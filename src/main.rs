//! Coinpress entitlement service binary.
//!
//! Loads configuration, wires the Postgres and HTTP adapters together,
//! and serves the API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use coinpress::adapters::cms::CmsContentReader;
use coinpress::adapters::http::entitlement::routes::{entitlement_routes, webhook_routes};
use coinpress::adapters::http::content::routes::content_routes;
use coinpress::adapters::http::AppState;
use coinpress::adapters::invoicing::{HostedInvoiceAdapter, InvoicingConfig};
use coinpress::adapters::postgres::{PostgresEntitlementStore, PostgresProcessedPaymentStore};
use coinpress::application::handlers::entitlement::CheckoutPricing;
use coinpress::config::AppConfig;
use coinpress::domain::payment::{NotificationVerifier, WebhookReconciler};
use coinpress::ports::{ContentReader, EntitlementStore, InvoiceProvider, ProcessedPaymentStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.server.log_level)?)
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let entitlements: Arc<dyn EntitlementStore> =
        Arc::new(PostgresEntitlementStore::new(pool.clone()));
    let ledger: Arc<dyn ProcessedPaymentStore> =
        Arc::new(PostgresProcessedPaymentStore::new(pool.clone()));
    let invoice_provider: Arc<dyn InvoiceProvider> =
        Arc::new(HostedInvoiceAdapter::new(InvoicingConfig::new(
            config.payment.api_key.clone(),
            config.payment.api_base_url.clone(),
        )));
    let content: Arc<dyn ContentReader> =
        Arc::new(CmsContentReader::new(config.content.clone()));

    let reconciler = Arc::new(WebhookReconciler::new(
        NotificationVerifier::new(config.payment.ipn_secret.clone()),
        entitlements.clone(),
        ledger.clone(),
    ));

    let state = AppState {
        entitlements,
        content,
        invoice_provider,
        reconciler,
        pricing: CheckoutPricing {
            monthly_usd: config.payment.monthly_price_usd,
            quarterly_usd: config.payment.quarterly_price_usd,
            currency: config.payment.price_currency.clone(),
        },
        signature_header: config.payment.signature_header.clone(),
    };

    let cors = {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        if origins.is_empty() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = Router::new()
        .nest("/api/entitlements", entitlement_routes())
        .nest("/api/webhooks", webhook_routes())
        .nest("/api/content", content_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(cors),
        );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "coinpress entitlement service listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
