//! Payment processor configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment processor configuration (hosted invoicing)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Processor API key for outbound invoice creation
    pub api_key: String,

    /// Shared secret the processor signs webhook bodies with
    pub ipn_secret: String,

    /// Processor API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request header carrying the hex HMAC signature
    #[serde(default = "default_signature_header")]
    pub signature_header: String,

    /// Monthly plan price in the fiat currency
    #[serde(default = "default_monthly_price")]
    pub monthly_price_usd: f64,

    /// Quarterly plan price in the fiat currency
    #[serde(default = "default_quarterly_price")]
    pub quarterly_price_usd: f64,

    /// Fiat currency invoices are denominated in
    #[serde(default = "default_currency")]
    pub price_currency: String,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_API_KEY"));
        }
        if self.ipn_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_IPN_SECRET"));
        }
        if !(self.monthly_price_usd > 0.0) {
            return Err(ValidationError::InvalidPlanPrice("monthly_price_usd"));
        }
        if !(self.quarterly_price_usd > 0.0) {
            return Err(ValidationError::InvalidPlanPrice("quarterly_price_usd"));
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.invoicing.example.com".to_string()
}

fn default_signature_header() -> String {
    "x-payment-sig".to_string()
}

fn default_monthly_price() -> f64 {
    20.0
}

fn default_quarterly_price() -> f64 {
    50.0
}

fn default_currency() -> String {
    "usd".to_string()
}
