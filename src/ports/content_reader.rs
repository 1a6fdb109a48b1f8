//! Content reader port for the headless CMS.
//!
//! The CMS owns all editorial data; this service only needs a resource's
//! body and its editor-set premium flag, and only to decide whether the
//! body may be returned to the renderer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Resource fetched from the CMS, as much of it as the gate needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumResource {
    /// URL slug identifying the resource.
    pub slug: String,

    /// Headline / list title.
    pub title: String,

    /// Rendered body. Never returned to a viewer the gate denies.
    pub body: String,

    /// Editor-set premium flag, independent of any viewer.
    pub is_premium: bool,
}

/// Port for reading premium-flagged resources from the CMS.
#[async_trait]
pub trait ContentReader: Send + Sync {
    /// Fetch a resource by slug.
    ///
    /// Returns `None` for unknown slugs.
    async fn by_slug(&self, slug: &str) -> Result<Option<PremiumResource>, DomainError>;
}
