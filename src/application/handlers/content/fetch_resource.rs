//! FetchResourceHandler - Query handler for access-gated resource reads.
//!
//! Every read of a premium-flagged resource passes through the access
//! gate before the body reaches a renderer; a denied request yields a
//! paywall marker carrying only public fields, never the body.

use std::sync::Arc;

use crate::domain::entitlement::{decide, AccessDecision};
use crate::domain::foundation::{AccountId, DomainError, Timestamp};
use crate::ports::{ContentReader, EntitlementStore, PremiumResource};

/// Query for a resource by slug, on behalf of an optional viewer.
#[derive(Debug, Clone)]
pub struct FetchResourceQuery {
    pub slug: String,

    /// Viewer account, `None` for anonymous requests.
    pub viewer: Option<AccountId>,
}

/// Result of a gated resource fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResourceResult {
    /// Unknown slug.
    NotFound,

    /// Gate denied; only public fields are exposed, and no reason.
    Paywalled { slug: String, title: String },

    /// Gate granted; full resource.
    Granted(PremiumResource),
}

/// Handler fetching resources through the access gate.
pub struct FetchResourceHandler {
    content: Arc<dyn ContentReader>,
    entitlements: Arc<dyn EntitlementStore>,
}

impl FetchResourceHandler {
    pub fn new(content: Arc<dyn ContentReader>, entitlements: Arc<dyn EntitlementStore>) -> Self {
        Self {
            content,
            entitlements,
        }
    }

    pub async fn handle(
        &self,
        query: FetchResourceQuery,
    ) -> Result<FetchResourceResult, DomainError> {
        let resource = match self.content.by_slug(&query.slug).await? {
            Some(resource) => resource,
            None => return Ok(FetchResourceResult::NotFound),
        };

        // Fast path: free resources skip the entitlement read.
        if !resource.is_premium {
            return Ok(FetchResourceResult::Granted(resource));
        }

        let entitlement = match &query.viewer {
            Some(viewer) => Some(self.entitlements.get(viewer).await?),
            None => None,
        };

        match decide(true, entitlement.as_ref(), Timestamp::now()) {
            AccessDecision::Granted => Ok(FetchResourceResult::Granted(resource)),
            AccessDecision::Paywalled => {
                tracing::debug!(slug = %resource.slug, "premium resource paywalled");
                Ok(FetchResourceResult::Paywalled {
                    slug: resource.slug,
                    title: resource.title,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlement::Entitlement;
    use async_trait::async_trait;
    use std::collections::HashMap;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockContentReader {
        resources: HashMap<String, PremiumResource>,
    }

    impl MockContentReader {
        fn with(resources: Vec<PremiumResource>) -> Self {
            Self {
                resources: resources.into_iter().map(|r| (r.slug.clone(), r)).collect(),
            }
        }
    }

    #[async_trait]
    impl ContentReader for MockContentReader {
        async fn by_slug(&self, slug: &str) -> Result<Option<PremiumResource>, DomainError> {
            Ok(self.resources.get(slug).cloned())
        }
    }

    struct MockEntitlementStore {
        rows: HashMap<String, Entitlement>,
    }

    impl MockEntitlementStore {
        fn empty() -> Self {
            Self { rows: HashMap::new() }
        }

        fn with(entitlement: Entitlement) -> Self {
            let mut rows = HashMap::new();
            rows.insert(entitlement.account_id.as_str().to_string(), entitlement);
            Self { rows }
        }
    }

    #[async_trait]
    impl EntitlementStore for MockEntitlementStore {
        async fn get(&self, account_id: &AccountId) -> Result<Entitlement, DomainError> {
            Ok(self
                .rows
                .get(account_id.as_str())
                .cloned()
                .unwrap_or_else(|| Entitlement::none(account_id.clone())))
        }

        async fn upsert(&self, _entitlement: &Entitlement) -> Result<(), DomainError> {
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn viewer() -> AccountId {
        AccountId::new("acct-reader").unwrap()
    }

    fn free_article() -> PremiumResource {
        PremiumResource {
            slug: "btc-hits-new-high".to_string(),
            title: "Bitcoin hits new high".to_string(),
            body: "Full story...".to_string(),
            is_premium: false,
        }
    }

    fn premium_list() -> PremiumResource {
        PremiumResource {
            slug: "top-10-tokens-q3".to_string(),
            title: "Top 10 tokens for Q3".to_string(),
            body: "1. ...".to_string(),
            is_premium: true,
        }
    }

    fn handler(
        resources: Vec<PremiumResource>,
        store: MockEntitlementStore,
    ) -> FetchResourceHandler {
        FetchResourceHandler::new(
            Arc::new(MockContentReader::with(resources)),
            Arc::new(store),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let handler = handler(vec![], MockEntitlementStore::empty());

        let result = handler
            .handle(FetchResourceQuery {
                slug: "missing".to_string(),
                viewer: None,
            })
            .await
            .unwrap();

        assert_eq!(result, FetchResourceResult::NotFound);
    }

    #[tokio::test]
    async fn free_article_served_to_anonymous() {
        let handler = handler(vec![free_article()], MockEntitlementStore::empty());

        let result = handler
            .handle(FetchResourceQuery {
                slug: "btc-hits-new-high".to_string(),
                viewer: None,
            })
            .await
            .unwrap();

        assert_eq!(result, FetchResourceResult::Granted(free_article()));
    }

    #[tokio::test]
    async fn premium_list_paywalled_for_anonymous() {
        let handler = handler(vec![premium_list()], MockEntitlementStore::empty());

        let result = handler
            .handle(FetchResourceQuery {
                slug: "top-10-tokens-q3".to_string(),
                viewer: None,
            })
            .await
            .unwrap();

        // The body never leaks into the paywalled variant.
        assert_eq!(
            result,
            FetchResourceResult::Paywalled {
                slug: "top-10-tokens-q3".to_string(),
                title: "Top 10 tokens for Q3".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn premium_list_served_to_active_subscriber() {
        let entitlement = Entitlement::active_until(viewer(), Timestamp::now().add_days(5));
        let handler = handler(vec![premium_list()], MockEntitlementStore::with(entitlement));

        let result = handler
            .handle(FetchResourceQuery {
                slug: "top-10-tokens-q3".to_string(),
                viewer: Some(viewer()),
            })
            .await
            .unwrap();

        assert_eq!(result, FetchResourceResult::Granted(premium_list()));
    }

    #[tokio::test]
    async fn premium_list_paywalled_for_expired_subscriber() {
        let stale = Entitlement {
            account_id: viewer(),
            is_pro: true,
            pro_until: Some(Timestamp::now().minus_days(1)),
        };
        let handler = handler(vec![premium_list()], MockEntitlementStore::with(stale));

        let result = handler
            .handle(FetchResourceQuery {
                slug: "top-10-tokens-q3".to_string(),
                viewer: Some(viewer()),
            })
            .await
            .unwrap();

        assert!(matches!(result, FetchResourceResult::Paywalled { .. }));
    }
}
