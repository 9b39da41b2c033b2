//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Webhook signing secret shared with the gateway
    pub webhook_secret: String,

    /// Publicly reachable URL the gateway delivers webhooks to; shown on
    /// the connection screen for registration with the gateway
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__WEBHOOK_SECRET"));
        }
        // Secrets issued by the gateway carry the whsec_ prefix
        if !self.webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidWebhookSecret);
        }
        if self.webhook_url.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__WEBHOOK_URL"));
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            webhook_secret: String::new(),
            webhook_url: default_webhook_url(),
        }
    }
}

fn default_webhook_url() -> String {
    "http://localhost:8080/api/webhooks/gateway".to_string()
}
