//! Entitlement record entity.
//!
//! One record per account. Accounts without a record have no paid access.
//!
//! # Design Decisions
//!
//! - **Timestamp is authoritative**: `is_pro` is a cache/hint written by
//!   the reconciler; every reader re-derives effective entitlement from
//!   `pro_until`. A stale `true` flag with an expired timestamp denies.
//! - **No expiry job**: records expire naturally by comparison; nothing
//!   ever deletes them.
//! - **Fail-secure**: no record = no access.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Timestamp};

/// Per-account premium entitlement.
///
/// # Invariants
///
/// - `account_id` is unique (one record per account)
/// - Effective entitlement is `is_pro && pro_until > now`; both conditions
///   are required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Account that owns this entitlement.
    pub account_id: AccountId,

    /// Paid-access hint. Only meaningful together with `pro_until`.
    pub is_pro: bool,

    /// Instant the current paid period ends. `None` means never paid.
    pub pro_until: Option<Timestamp>,
}

impl Entitlement {
    /// The empty entitlement, what a missing store row maps to.
    pub fn none(account_id: AccountId) -> Self {
        Self {
            account_id,
            is_pro: false,
            pro_until: None,
        }
    }

    /// An entitlement active until the given instant.
    pub fn active_until(account_id: AccountId, until: Timestamp) -> Self {
        Self {
            account_id,
            is_pro: true,
            pro_until: Some(until),
        }
    }

    /// Whether this entitlement grants access at the given instant.
    ///
    /// The flag alone is never sufficient: an expired or missing
    /// `pro_until` denies regardless of `is_pro`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.is_pro && self.pro_until.map(|until| until.is_after(&now)).unwrap_or(false)
    }

    /// Whether this entitlement grants access right now.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Timestamp::now())
    }

    /// Whole days remaining in the paid period, 0 if expired or unpaid.
    pub fn days_remaining(&self) -> u32 {
        let now = Timestamp::now();
        match self.pro_until {
            Some(until) if until.is_after(&now) => {
                until.duration_since(&now).num_days().max(0) as u32
            }
            _ => 0,
        }
    }
}
