//! CheckAccessHandler - Query handler for the access gate.

use std::sync::Arc;

use crate::domain::entitlement::{decide, AccessDecision};
use crate::domain::foundation::{AccountId, DomainError, Timestamp};
use crate::ports::EntitlementStore;

/// Query to decide access to a resource.
#[derive(Debug, Clone)]
pub struct CheckAccessQuery {
    /// Viewer account, `None` for anonymous requests.
    pub viewer: Option<AccountId>,

    /// The target resource's editor-set premium flag.
    pub premium: bool,
}

/// Handler deciding whether a viewer may see a premium resource.
///
/// Re-reads the entitlement store on every premium check; entitlement
/// changes are rare relative to page views, so correctness wins over
/// latency and there is no cache to invalidate.
pub struct CheckAccessHandler {
    entitlements: Arc<dyn EntitlementStore>,
}

impl CheckAccessHandler {
    pub fn new(entitlements: Arc<dyn EntitlementStore>) -> Self {
        Self { entitlements }
    }

    pub async fn handle(&self, query: CheckAccessQuery) -> Result<AccessDecision, DomainError> {
        // Fast path: non-premium resources need no entitlement lookup.
        if !query.premium {
            return Ok(AccessDecision::Granted);
        }

        let viewer = match query.viewer {
            Some(viewer) => viewer,
            None => return Ok(AccessDecision::Paywalled),
        };

        let entitlement = self.entitlements.get(&viewer).await?;
        Ok(decide(true, Some(&entitlement), Timestamp::now()))
    }
}
