//! GetEntitlementHandler - Query handler for a viewer's own entitlement.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{AccountId, DomainError, Timestamp};
use crate::ports::EntitlementStore;

/// Query for the current viewer's entitlement.
#[derive(Debug, Clone)]
pub struct GetEntitlementQuery {
    pub account_id: AccountId,
}

/// Read-model view of an entitlement.
///
/// `active` is derived from the authoritative timestamp at read time;
/// the raw `is_pro` flag is intentionally not exposed.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementView {
    pub active: bool,
    pub pro_until: Option<Timestamp>,
    pub days_remaining: u32,
}

/// Handler returning the viewer's entitlement view.
pub struct GetEntitlementHandler {
    entitlements: Arc<dyn EntitlementStore>,
}

impl GetEntitlementHandler {
    pub fn new(entitlements: Arc<dyn EntitlementStore>) -> Self {
        Self { entitlements }
    }

    pub async fn handle(&self, query: GetEntitlementQuery) -> Result<EntitlementView, DomainError> {
        let entitlement = self.entitlements.get(&query.account_id).await?;

        Ok(EntitlementView {
            active: entitlement.is_active(),
            pro_until: entitlement.pro_until,
            days_remaining: entitlement.days_remaining(),
        })
    }
}
