//! Headless CMS configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Headless CMS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// CMS API base URL
    pub base_url: String,

    /// Optional CMS API token
    pub api_token: Option<String>,
}

impl ContentConfig {
    /// Validate CMS configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("CONTENT_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidContentUrl);
        }
        Ok(())
    }
}
