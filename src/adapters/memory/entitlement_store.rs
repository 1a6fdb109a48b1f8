//! In-memory implementation of EntitlementStore.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{AccountId, DomainError};
use crate::ports::EntitlementStore;

/// In-memory entitlement store keyed by account id.
#[derive(Default)]
pub struct InMemoryEntitlementStore {
    rows: RwLock<HashMap<String, Entitlement>>,
}

impl InMemoryEntitlementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntitlementStore for InMemoryEntitlementStore {
    async fn get(&self, account_id: &AccountId) -> Result<Entitlement, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(account_id.as_str())
            .cloned()
            .unwrap_or_else(|| Entitlement::none(account_id.clone())))
    }

    async fn upsert(&self, entitlement: &Entitlement) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        rows.insert(
            entitlement.account_id.as_str().to_string(),
            entitlement.clone(),
        );
        Ok(())
    }
}
