//! Request/response DTOs for entitlement endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::entitlement::EntitlementView;
use crate::domain::entitlement::Plan;
use crate::domain::foundation::Timestamp;

/// Request body for POST /checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    pub plan: Plan,
    pub success_url: String,
    pub cancel_url: String,
}

/// Response for POST /checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub invoice_id: String,
    pub payment_url: String,
}

/// Response for GET /.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementResponse {
    pub active: bool,
    pub pro_until: Option<Timestamp>,
    pub days_remaining: u32,
}

impl From<EntitlementView> for EntitlementResponse {
    fn from(view: EntitlementView) -> Self {
        Self {
            active: view.active,
            pro_until: view.pro_until,
            days_remaining: view.days_remaining,
        }
    }
}

/// Query parameters for GET /access.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessCheckParams {
    /// Premium flag of the resource being checked; defaults to true.
    pub premium: Option<bool>,
}

/// Response for GET /access.
#[derive(Debug, Clone, Serialize)]
pub struct AccessCheckResponse {
    pub has_access: bool,
}

/// Acknowledgment body for the webhook endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub status: &'static str,
    pub outcome: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_request_deserializes() {
        let json = r#"{
            "plan": "pro_3months",
            "success_url": "https://coinpress.example/pro/success",
            "cancel_url": "https://coinpress.example/pro/cancel"
        }"#;

        let request: CreateCheckoutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.plan, Plan::Pro3Months);
    }

    #[test]
    fn checkout_request_rejects_unknown_plan() {
        let json = r#"{
            "plan": "pro_lifetime",
            "success_url": "https://a",
            "cancel_url": "https://b"
        }"#;

        let result: Result<CreateCheckoutRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn entitlement_response_from_view() {
        let view = EntitlementView {
            active: true,
            pro_until: Some(Timestamp::now().add_days(10)),
            days_remaining: 9,
        };

        let response = EntitlementResponse::from(view);
        assert!(response.active);
        assert_eq!(response.days_remaining, 9);
    }

    #[test]
    fn access_params_premium_is_optional() {
        let params: AccessCheckParams = serde_json::from_str("{}").unwrap();
        assert!(params.premium.is_none());
    }
}
