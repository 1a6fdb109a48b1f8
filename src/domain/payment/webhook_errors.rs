//! Webhook error types for payment notification handling.
//!
//! Status codes drive the processor's retry policy: only signature
//! failures (401) and store failures (5xx) are non-success; structurally
//! malformed messages are acknowledged because redelivery cannot fix
//! them.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature header was absent.
    #[error("Missing signature header")]
    MissingSignature,

    /// Notification body could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from the notification payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Entitlement store or ledger operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if the processor should redeliver this notification.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Database(_))
    }

    /// Maps the error to an HTTP status code.
    ///
    /// - 401: authentication failure, redelivery will not help
    /// - 200: structurally malformed message, acknowledged so it does
    ///   not block well-formed notifications behind retries
    /// - 5xx: transient store failure, the processor will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature | WebhookError::MissingSignature => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::ParseError(_) | WebhookError::MissingField(_) => StatusCode::OK,
            WebhookError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts DomainError to WebhookError for store operations.
impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Database(err.to_string())
    }
}
