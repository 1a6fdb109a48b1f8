//! Payment notification payloads.
//!
//! The processor has shipped two envelope shapes over time: a flat
//! object and a `data`-wrapped one. All shape-guessing lives in
//! [`PaymentNotification::normalize`]; the rest of the crate only ever
//! sees the normalized form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::WebhookError;

/// Processor payment status.
///
/// Only `Finished` triggers an entitlement mutation. Every other value,
/// including statuses added by the processor after this code was
/// written (`Unknown`), is acknowledged without action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Waiting,
    Confirming,
    Confirmed,
    Sending,
    PartiallyPaid,
    Finished,
    Failed,
    Refunded,
    Expired,
    Unknown,
}

impl PaymentStatus {
    /// Parse a status from its wire string.
    pub fn parse(s: &str) -> Self {
        match s {
            "waiting" => Self::Waiting,
            "confirming" => Self::Confirming,
            "confirmed" => Self::Confirmed,
            "sending" => Self::Sending,
            "partially_paid" => Self::PartiallyPaid,
            "finished" => Self::Finished,
            "failed" => Self::Failed,
            "refunded" => Self::Refunded,
            "expired" => Self::Expired,
            _ => Self::Unknown,
        }
    }

    /// The wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Confirming => "confirming",
            Self::Confirmed => "confirmed",
            Self::Sending => "sending",
            Self::PartiallyPaid => "partially_paid",
            Self::Finished => "finished",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this is the terminal success status.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized payment notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNotification {
    /// Processor-assigned payment id, unique per real payment.
    pub payment_id: String,

    /// Payment status at the time of delivery.
    pub status: PaymentStatus,

    /// Order reference this service chose at checkout time, echoed back
    /// verbatim.
    pub order_reference: String,
}

impl PaymentNotification {
    /// Normalize a raw webhook body into a [`PaymentNotification`].
    ///
    /// Handles both envelope shapes (flat and `data`-wrapped) and both
    /// payment id encodings (number and string).
    ///
    /// # Errors
    ///
    /// - `ParseError` when the body is not a JSON object
    /// - `MissingField` when a required field is absent or the wrong type
    pub fn normalize(payload: &[u8]) -> Result<Self, WebhookError> {
        let root: Value = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        // Newer processor versions wrap the fields in a `data` envelope.
        let fields = match root.get("data") {
            Some(data) if data.is_object() => data,
            _ => &root,
        };

        if !fields.is_object() {
            return Err(WebhookError::ParseError("payload is not an object".to_string()));
        }

        let payment_id = match fields.get("payment_id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(WebhookError::MissingField("payment_id")),
        };

        let status = fields
            .get("payment_status")
            .and_then(Value::as_str)
            .map(PaymentStatus::parse)
            .ok_or(WebhookError::MissingField("payment_status"))?;

        let order_reference = fields
            .get("order_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(WebhookError::MissingField("order_id"))?;

        Ok(Self {
            payment_id,
            status,
            order_reference,
        })
    }
}
