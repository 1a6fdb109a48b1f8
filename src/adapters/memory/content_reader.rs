//! In-memory implementation of ContentReader.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::DomainError;
use crate::ports::{ContentReader, PremiumResource};

/// In-memory content reader seeded with fixed resources.
#[derive(Default)]
pub struct InMemoryContentReader {
    resources: HashMap<String, PremiumResource>,
}

impl InMemoryContentReader {
    /// Creates a reader over the given resources, keyed by slug.
    pub fn with_resources(resources: Vec<PremiumResource>) -> Self {
        Self {
            resources: resources.into_iter().map(|r| (r.slug.clone(), r)).collect(),
        }
    }
}

#[async_trait]
impl ContentReader for InMemoryContentReader {
    async fn by_slug(&self, slug: &str) -> Result<Option<PremiumResource>, DomainError> {
        Ok(self.resources.get(slug).cloned())
    }
}
