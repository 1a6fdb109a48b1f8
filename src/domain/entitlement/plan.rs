//! Subscription plan definitions.
//!
//! Each plan maps to a fixed number of days added to `pro_until` when a
//! payment for it is confirmed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Paid subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    /// One month of premium access.
    #[serde(rename = "pro_monthly")]
    ProMonthly,

    /// Three months of premium access.
    #[serde(rename = "pro_3months")]
    Pro3Months,
}

impl Plan {
    /// Parse a plan from its wire identifier.
    ///
    /// Returns `None` for unknown identifiers; callers treat those as
    /// non-actionable rather than failing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pro_monthly" => Some(Plan::ProMonthly),
            "pro_3months" => Some(Plan::Pro3Months),
            _ => None,
        }
    }

    /// The wire identifier of this plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::ProMonthly => "pro_monthly",
            Plan::Pro3Months => "pro_3months",
        }
    }

    /// Days of premium access one payment for this plan buys.
    pub fn days(&self) -> i64 {
        match self {
            Plan::ProMonthly => 31,
            Plan::Pro3Months => 93,
        }
    }

    /// New period end for a payment confirmed at `now`.
    ///
    /// Deliberately `now + days`, not `max(current, now) + days`: a
    /// renewal resets the clock rather than stacking.
    pub fn extend_from(&self, now: Timestamp) -> Timestamp {
        now.add_days(self.days())
    }

    /// Display name for user-facing surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::ProMonthly => "Pro Monthly",
            Plan::Pro3Months => "Pro Quarterly",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
