//! Request/response DTOs for content endpoints.

use serde::Serialize;

use crate::ports::PremiumResource;

/// Response for a granted resource fetch.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceResponse {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub premium: bool,
}

impl From<PremiumResource> for ResourceResponse {
    fn from(resource: PremiumResource) -> Self {
        Self {
            slug: resource.slug,
            title: resource.title,
            body: resource.body,
            premium: resource.is_premium,
        }
    }
}

/// Paywall prompt for a denied fetch.
///
/// Carries only public fields and a generic upgrade message; it never
/// reveals why the viewer was denied.
#[derive(Debug, Clone, Serialize)]
pub struct PaywallResponse {
    pub slug: String,
    pub title: String,
    pub message: &'static str,
    pub upgrade_url: &'static str,
}

impl PaywallResponse {
    pub fn new(slug: String, title: String) -> Self {
        Self {
            slug,
            title,
            message: "This story is for Coinpress Pro subscribers.",
            upgrade_url: "/pro",
        }
    }
}
