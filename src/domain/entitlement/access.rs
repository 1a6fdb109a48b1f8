//! Access gate decision function.
//!
//! Pure policy: given a resource's premium flag and the viewer's
//! entitlement (already fetched, or absent for anonymous viewers),
//! decide whether the resource body may be rendered.
//!
//! The decision carries no reason. A paywalled response never reveals
//! whether the viewer was anonymous, unpaid, or expired.

use crate::domain::foundation::Timestamp;

use super::Entitlement;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the resource body.
    Granted,
    /// Render the paywall prompt instead of the body.
    Paywalled,
}

impl AccessDecision {
    /// Returns true if the resource body may be rendered.
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Decide access to a resource at the given instant.
///
/// - Non-premium resources are always granted; callers should skip the
///   entitlement read entirely on that path.
/// - `entitlement = None` means an anonymous viewer.
/// - An authenticated viewer is granted iff the entitlement is active
///   (`is_pro` AND `pro_until` in the future).
pub fn decide(premium: bool, entitlement: Option<&Entitlement>, now: Timestamp) -> AccessDecision {
    if !premium {
        return AccessDecision::Granted;
    }

    match entitlement {
        Some(e) if e.is_active_at(now) => AccessDecision::Granted,
        _ => AccessDecision::Paywalled,
    }
}
