//! Order reference encoding and parsing.
//!
//! The reference is chosen by this service at checkout time and echoed
//! back verbatim by the payment processor in its confirmation webhook.
//! Format: `pro_<plan>_<account_id>`.
//!
//! Plan identifiers themselves contain the `_` delimiter
//! (`pro_monthly`, `pro_3months`), so parsing isolates the account id
//! from the LAST delimiter and treats everything between the `pro_`
//! prefix and that point as the plan.

use thiserror::Error;

use crate::domain::foundation::AccountId;

use super::Plan;

/// Prefix every order reference starts with.
const REFERENCE_PREFIX: &str = "pro_";

/// Parsed checkout order reference: `(plan, account)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReference {
    pub plan: Plan,
    pub account_id: AccountId,
}

/// Errors from parsing an order reference.
///
/// All of these are non-actionable from the processor's point of view:
/// the reconciler acknowledges and logs them rather than failing the
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("reference does not start with '{REFERENCE_PREFIX}'")]
    MissingPrefix,

    #[error("reference has no plan/account delimiter")]
    MissingDelimiter,

    #[error("unknown plan '{0}'")]
    UnknownPlan(String),

    #[error("invalid account id: {0}")]
    InvalidAccount(String),
}

impl OrderReference {
    /// Creates a reference for a checkout session.
    pub fn new(plan: Plan, account_id: AccountId) -> Self {
        Self { plan, account_id }
    }

    /// Encodes the reference into its wire form.
    pub fn encode(&self) -> String {
        format!("{}{}_{}", REFERENCE_PREFIX, self.plan.as_str(), self.account_id)
    }

    /// Parses a wire reference back into `(plan, account)`.
    ///
    /// Splits from the last delimiter: `pro_pro_monthly_acct1` yields
    /// plan `pro_monthly` and account `acct1`.
    pub fn parse(reference: &str) -> Result<Self, ReferenceError> {
        let rest = reference
            .strip_prefix(REFERENCE_PREFIX)
            .ok_or(ReferenceError::MissingPrefix)?;

        let (plan_str, account_str) = rest
            .rsplit_once('_')
            .ok_or(ReferenceError::MissingDelimiter)?;

        let plan =
            Plan::parse(plan_str).ok_or_else(|| ReferenceError::UnknownPlan(plan_str.to_string()))?;

        let account_id = AccountId::new(account_str)
            .map_err(|e| ReferenceError::InvalidAccount(e.to_string()))?;

        Ok(Self { plan, account_id })
    }
}

impl std::fmt::Display for OrderReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}
