//! PostgreSQL implementation of EntitlementStore.
//!
//! One row per account. The upsert is a single statement, so concurrent
//! writes to the same account rely on the store's per-row atomicity and
//! never interleave partial updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{AccountId, DomainError, Timestamp};
use crate::ports::EntitlementStore;

/// PostgreSQL implementation of the EntitlementStore port.
pub struct PostgresEntitlementStore {
    pool: PgPool,
}

impl PostgresEntitlementStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an entitlement.
#[derive(Debug, sqlx::FromRow)]
struct EntitlementRow {
    account_id: String,
    is_pro: bool,
    pro_until: Option<DateTime<Utc>>,
}

impl TryFrom<EntitlementRow> for Entitlement {
    type Error = DomainError;

    fn try_from(row: EntitlementRow) -> Result<Self, Self::Error> {
        let account_id = AccountId::new(row.account_id)
            .map_err(|e| DomainError::database(format!("Invalid account_id in row: {}", e)))?;

        Ok(Entitlement {
            account_id,
            is_pro: row.is_pro,
            pro_until: row.pro_until.map(Timestamp::from_datetime),
        })
    }
}

#[async_trait]
impl EntitlementStore for PostgresEntitlementStore {
    async fn get(&self, account_id: &AccountId) -> Result<Entitlement, DomainError> {
        let row = sqlx::query_as::<_, EntitlementRow>(
            r#"
            SELECT account_id, is_pro, pro_until
            FROM entitlements
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to read entitlement: {}", e)))?;

        match row {
            Some(row) => row.try_into(),
            // No row is the empty entitlement, never an error.
            None => Ok(Entitlement::none(account_id.clone())),
        }
    }

    async fn upsert(&self, entitlement: &Entitlement) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO entitlements (account_id, is_pro, pro_until, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (account_id) DO UPDATE SET
                is_pro = EXCLUDED.is_pro,
                pro_until = EXCLUDED.pro_until,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(entitlement.account_id.as_str())
        .bind(entitlement.is_pro)
        .bind(entitlement.pro_until.map(|t| *t.as_datetime()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert entitlement: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_entitlement() {
        let row = EntitlementRow {
            account_id: "acct-1".to_string(),
            is_pro: true,
            pro_until: Some(Utc::now()),
        };

        let entitlement: Entitlement = row.try_into().unwrap();
        assert_eq!(entitlement.account_id.as_str(), "acct-1");
        assert!(entitlement.is_pro);
        assert!(entitlement.pro_until.is_some());
    }

    #[test]
    fn row_with_null_pro_until_converts() {
        let row = EntitlementRow {
            account_id: "acct-2".to_string(),
            is_pro: false,
            pro_until: None,
        };

        let entitlement: Entitlement = row.try_into().unwrap();
        assert!(!entitlement.is_pro);
        assert!(entitlement.pro_until.is_none());
        assert!(!entitlement.is_active());
    }

    #[test]
    fn row_with_invalid_account_id_fails() {
        let row = EntitlementRow {
            account_id: String::new(),
            is_pro: false,
            pro_until: None,
        };

        let result: Result<Entitlement, _> = row.try_into();
        assert!(result.is_err());
    }
}
