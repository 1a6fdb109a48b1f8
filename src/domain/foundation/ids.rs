//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Account identifier issued by the external identity provider.
///
/// Opaque to this service. It is embedded verbatim in order references
/// (`pro_<plan>_<account_id>`) and echoed back by the payment processor,
/// so it must not contain the reference delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new AccountId, returning an error if it is empty or
    /// would be ambiguous inside an order reference.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("account_id"));
        }
        if id.contains('_') {
            return Err(ValidationError::invalid_format(
                "account_id",
                "must not contain '_'",
            ));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "account_id",
                "must not contain whitespace",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_accepts_opaque_provider_id() {
        let id = AccountId::new("auth0|65f2c1").unwrap();
        assert_eq!(id.as_str(), "auth0|65f2c1");
    }

    #[test]
    fn account_id_rejects_empty_string() {
        let result = AccountId::new("");
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn account_id_rejects_underscore() {
        // Underscore is the order-reference delimiter.
        let result = AccountId::new("user_123");
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn account_id_rejects_whitespace() {
        let result = AccountId::new("user 123");
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn account_id_displays_correctly() {
        let id = AccountId::new("acct-456").unwrap();
        assert_eq!(format!("{}", id), "acct-456");
    }

    #[test]
    fn account_id_serializes_as_plain_string() {
        let id = AccountId::new("acct-789").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"acct-789\"");
    }
}
