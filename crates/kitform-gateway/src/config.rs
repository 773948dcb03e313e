//! Gateway configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the outbound integrations.
///
/// A missing freight API token is not an error: the quote client degrades
/// to the local fallback estimator so development and previews work without
/// credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Carrier aggregation API base URL.
    #[serde(default = "default_freight_url")]
    pub freight_url: String,
    /// Bearer token for the carrier API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freight_token: Option<String>,
    /// Payment-session creation endpoint.
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,
    /// Suburb autocomplete endpoint.
    #[serde(default = "default_autocomplete_url")]
    pub autocomplete_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Additional attempts after the first failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay for retry backoff, in milliseconds.
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,
    /// Local sliding-window rate limit, requests per minute.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: usize,
}

fn default_freight_url() -> String {
    "https://api.freightdesk.example.com/v2/quote".to_string()
}

fn default_checkout_url() -> String {
    "https://pay.kitform.example.com/api/checkout-session".to_string()
}

fn default_autocomplete_url() -> String {
    "https://api.kitform.example.com/suburbs".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_base_ms() -> u64 {
    500
}

fn default_rate_limit() -> usize {
    60
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            freight_url: default_freight_url(),
            freight_token: None,
            checkout_url: default_checkout_url(),
            autocomplete_url: default_autocomplete_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_ms: default_retry_base_ms(),
            rate_limit_per_minute: default_rate_limit(),
        }
    }
}

impl GatewayConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// Recognized: `KITFORM_FREIGHT_URL`, `KITFORM_FREIGHT_TOKEN`,
    /// `KITFORM_CHECKOUT_URL`, `KITFORM_AUTOCOMPLETE_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("KITFORM_FREIGHT_URL") {
            config.freight_url = url;
        }
        if let Ok(token) = std::env::var("KITFORM_FREIGHT_TOKEN") {
            if !token.trim().is_empty() {
                config.freight_token = Some(token);
            }
        }
        if let Ok(url) = std::env::var("KITFORM_CHECKOUT_URL") {
            config.checkout_url = url;
        }
        if let Ok(url) = std::env::var("KITFORM_AUTOCOMPLETE_URL") {
            config.autocomplete_url = url;
        }
        config
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a carrier credential is configured.
    pub fn has_freight_token(&self) -> bool {
        self.freight_token.is_some()
    }
}
