//! Build-enquiry submission client.
//!
//! Production [`EnquirySink`]: posts the wizard's enquiry payload to the
//! enquiry endpoint. The wizard only needs success or failure; any
//! transport or status problem collapses to a `CommerceError` the wizard
//! renders as its retry banner.

use crate::error::GatewayError;
use async_trait::async_trait;
use kitform_commerce::error::CommerceError;
use kitform_commerce::wizard::{BuildEnquiry, EnquirySink};
use std::time::Duration;

/// Client for the enquiry endpoint.
pub struct EnquiryClient {
    client: reqwest::Client,
    url: String,
}

impl EnquiryClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self { client, url })
    }

    async fn post(&self, enquiry: &BuildEnquiry) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .json(enquiry)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::from_status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl EnquirySink for EnquiryClient {
    async fn submit(&self, enquiry: &BuildEnquiry) -> Result<(), CommerceError> {
        self.post(enquiry).await.map_err(|e| {
            tracing::error!(error = %e, "enquiry submission failed");
            CommerceError::Submission(e.to_string())
        })
    }
}
