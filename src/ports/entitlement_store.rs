//! Entitlement store port - the single read/write boundary to the
//! per-account entitlement record.
//!
//! # Design
//!
//! - **Missing row is not an error**: `get` maps an absent record to the
//!   empty entitlement, so callers never branch on "not found".
//! - **Upsert semantics**: `upsert` must succeed for first-time payers
//!   with no pre-existing profile row.
//! - **No caching**: the access gate re-reads current state on every
//!   check; correctness is favored over latency here.

use async_trait::async_trait;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{AccountId, DomainError};

/// Port for reading and writing entitlement records.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Read the entitlement for an account.
    ///
    /// An account with no record yields `Entitlement::none`.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the underlying store is unavailable.
    async fn get(&self, account_id: &AccountId) -> Result<Entitlement, DomainError>;

    /// Insert or overwrite the entitlement, keyed by account id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the underlying store is unavailable; the
    /// webhook caller surfaces this as a retryable failure.
    async fn upsert(&self, entitlement: &Entitlement) -> Result<(), DomainError>;
}
