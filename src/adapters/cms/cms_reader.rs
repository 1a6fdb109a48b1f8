//! HTTP reader for the headless CMS.
//!
//! CMS response envelopes have varied across versions: older endpoints
//! return the resource object directly, newer ones wrap it in a `data`
//! envelope, and the premium flag has appeared as both `is_premium` and
//! `isPremium`. All of that shape-guessing lives in [`parse_resource`];
//! the rest of the crate sees only [`PremiumResource`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ContentConfig;
use crate::domain::foundation::DomainError;
use crate::ports::{ContentReader, PremiumResource};

/// CMS-backed implementation of the ContentReader port.
pub struct CmsContentReader {
    config: ContentConfig,
    http_client: reqwest::Client,
}

impl CmsContentReader {
    /// Creates a reader for the configured CMS.
    pub fn new(config: ContentConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Wire shape of a CMS resource, tolerant of both field spellings.
#[derive(Debug, Deserialize)]
struct WireResource {
    slug: String,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(alias = "isPremium", default)]
    is_premium: bool,
}

/// Normalize a CMS response body into a resource.
///
/// Accepts both the flat shape and the `data`-wrapped envelope.
fn parse_resource(value: Value) -> Result<PremiumResource, DomainError> {
    let object = match value.get("data") {
        Some(data) if data.is_object() => data.clone(),
        _ => value,
    };

    let wire: WireResource = serde_json::from_value(object)
        .map_err(|e| DomainError::external(format!("Unexpected CMS response shape: {}", e)))?;

    Ok(PremiumResource {
        slug: wire.slug,
        title: wire.title,
        body: wire.body,
        is_premium: wire.is_premium,
    })
}

#[async_trait]
impl ContentReader for CmsContentReader {
    async fn by_slug(&self, slug: &str) -> Result<Option<PremiumResource>, DomainError> {
        let url = format!("{}/api/resources/{}", self.config.base_url, slug);

        let mut request = self.http_client.get(&url);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::external(format!("CMS request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DomainError::external(format!(
                "CMS returned status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::external(format!("CMS response was not JSON: {}", e)))?;

        parse_resource(body).map(Some)
    }
}
