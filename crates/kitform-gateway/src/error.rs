//! Gateway error types.

use thiserror::Error;

/// Errors from outbound HTTP integrations.
///
/// The variants are distinguishable so callers can choose retry vs. fatal
/// messaging: auth and rate-limit failures are terminal for the attempt,
/// HTTP/network failures are retried up to the configured budget, and
/// exhaustion surfaces as `RequestFailed`.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The configured API credential was rejected (HTTP 401).
    #[error("API key rejected by carrier")]
    InvalidApiKey,

    /// The carrier (HTTP 429) or the local limiter refused the request.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Non-success HTTP status other than 401/429.
    #[error("HTTP {status} from remote service")]
    Http { status: u16 },

    /// All retry attempts were exhausted.
    #[error("Request failed after {attempts} attempts")]
    RequestFailed { attempts: u32 },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::InvalidApiKey | GatewayError::RateLimitExceeded => false,
            GatewayError::Http { status } => *status >= 500,
            GatewayError::Network(_) => true,
            GatewayError::Decode(_) | GatewayError::RequestFailed { .. } => false,
        }
    }

    /// Classify an HTTP status into the taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => GatewayError::InvalidApiKey,
            429 => GatewayError::RateLimitExceeded,
            s => GatewayError::Http { status: s },
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode(e.to_string())
    }
}
