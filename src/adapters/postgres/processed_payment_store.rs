//! PostgreSQL implementation of ProcessedPaymentStore.
//!
//! `payment_id` is the primary key; concurrent duplicate deliveries race
//! on the insert and exactly one observes `Inserted`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::ports::{ProcessedPayment, ProcessedPaymentStore, SaveResult};

/// PostgreSQL implementation of the ProcessedPaymentStore port.
pub struct PostgresProcessedPaymentStore {
    pool: PgPool,
}

impl PostgresProcessedPaymentStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a processed payment.
#[derive(Debug, sqlx::FromRow)]
struct ProcessedPaymentRow {
    payment_id: String,
    order_reference: String,
    outcome: String,
    detail: Option<String>,
    processed_at: DateTime<Utc>,
}

impl From<ProcessedPaymentRow> for ProcessedPayment {
    fn from(row: ProcessedPaymentRow) -> Self {
        ProcessedPayment {
            payment_id: row.payment_id,
            order_reference: row.order_reference,
            outcome: row.outcome,
            detail: row.detail,
            processed_at: row.processed_at,
        }
    }
}

#[async_trait]
impl ProcessedPaymentStore for PostgresProcessedPaymentStore {
    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<ProcessedPayment>, DomainError> {
        let row = sqlx::query_as::<_, ProcessedPaymentRow>(
            r#"
            SELECT payment_id, order_reference, outcome, detail, processed_at
            FROM processed_payments
            WHERE payment_id = $1
            "#,
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to read processed payment: {}", e)))?;

        Ok(row.map(ProcessedPayment::from))
    }

    async fn record(&self, payment: ProcessedPayment) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO processed_payments
                (payment_id, order_reference, outcome, detail, processed_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (payment_id) DO NOTHING
            "#,
        )
        .bind(&payment.payment_id)
        .bind(&payment.order_reference)
        .bind(&payment.outcome)
        .bind(&payment.detail)
        .bind(payment.processed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record processed payment: {}", e)))?;

        // 0 rows affected means another delivery won the insert race.
        if result.rows_affected() == 1 {
            Ok(SaveResult::Inserted)
        } else {
            Ok(SaveResult::AlreadyExists)
        }
    }
}
