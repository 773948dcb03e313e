//! Payment-session creation client.
//!
//! Posts the session payload built by the commerce crate and returns the
//! hosted payment page URL. The endpoint answers `{"url": ...}` on success
//! and `{"error": ...}` otherwise, sometimes with a 200 status, so both
//! shapes are decoded before the status code is trusted.

use crate::error::GatewayError;
use kitform_commerce::checkout::CheckoutSessionRequest;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the payment-session endpoint.
pub struct CheckoutClient {
    client: reqwest::Client,
    url: String,
}

impl CheckoutClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// Create a payment session, returning the redirect URL.
    pub async fn create_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body: SessionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        if let Some(error) = body.error {
            tracing::warn!(%error, "payment session rejected");
            return Err(GatewayError::Decode(error));
        }
        if !status.is_success() {
            return Err(GatewayError::from_status(status.as_u16()));
        }
        body.url.ok_or_else(|| {
            GatewayError::Decode("session response missing redirect url".to_string())
        })
    }
}
