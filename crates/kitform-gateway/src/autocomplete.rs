//! Suburb autocomplete client.
//!
//! Backs the address form's suburb field: a prefix query returns matching
//! suburb/postcode/state triples. Failures are reported but non-fatal for
//! the caller, which can always fall back to free-text entry.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum query length before the endpoint is worth asking.
pub const MIN_QUERY_LEN: usize = 2;

/// One suburb match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuburbSuggestion {
    pub suburb: String,
    pub postcode: String,
    pub state: String,
    /// Endpoint-provided display label, when present.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SuburbSuggestion {
    /// Display label, e.g. "Marrickville NSW 2204".
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{} {} {}", self.suburb, self.state, self.postcode),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    #[serde(default)]
    suggestions: Vec<SuburbSuggestion>,
}

/// Client for the suburb autocomplete endpoint.
pub struct AutocompleteClient {
    client: reqwest::Client,
    url: String,
}

impl AutocompleteClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// Look up suburbs matching a prefix. Queries shorter than
    /// [`MIN_QUERY_LEN`] return no results without a network call.
    pub async fn suggest(&self, query: &str) -> Result<Vec<SuburbSuggestion>, GatewayError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(&self.url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::from_status(status.as_u16()));
        }
        let body: SuggestionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(body.suggestions)
    }
}
