//! Carrier quote client.
//!
//! The client front-ends the carrier aggregator with a local rate limiter,
//! a bounded retry loop, and a credential-less fallback. HTTP is behind the
//! [`FreightTransport`] trait so the retry and classification logic is
//! testable without a network.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::freight::fallback::estimate_quotes;
use crate::freight::request::{build_quote_request, QuoteJobRequest};
use crate::freight::response::CarrierQuoteResponse;
use crate::limiter::SlidingWindowLimiter;
use crate::retry::backoff_delay;
use async_trait::async_trait;
use kitform_commerce::cart::{CartLineItem, ShippingAddress};
use kitform_commerce::error::CommerceError;
use kitform_commerce::money::Money;
use kitform_commerce::shipping::{QuoteRequestOptions, QuoteService, ShippingQuote};
use std::time::Duration;
use tokio::sync::Mutex;

/// One carrier round trip. Implementations classify HTTP outcomes into
/// [`GatewayError`] so the retry loop can decide what is worth repeating.
#[async_trait]
pub trait FreightTransport: Send + Sync {
    async fn send_quote_request(
        &self,
        request: &QuoteJobRequest,
    ) -> Result<CarrierQuoteResponse, GatewayError>;
}

/// Reqwest-backed transport with bearer auth and a per-request timeout.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HttpTransport {
    pub fn new(url: String, token: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self { client, url, token })
    }
}

#[async_trait]
impl FreightTransport for HttpTransport {
    async fn send_quote_request(
        &self,
        request: &QuoteJobRequest,
    ) -> Result<CarrierQuoteResponse, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::from_status(status.as_u16()));
        }
        response
            .json::<CarrierQuoteResponse>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Quote client over a [`FreightTransport`].
///
/// A client with no transport (no credential configured) serves estimates
/// from the local rule table instead of failing.
pub struct FreightClient<T: FreightTransport> {
    transport: Option<T>,
    config: GatewayConfig,
    limiter: Mutex<SlidingWindowLimiter>,
}

impl FreightClient<HttpTransport> {
    /// Build from configuration. A missing token yields a fallback-only
    /// client.
    pub fn from_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        let transport = match &config.freight_token {
            Some(token) => Some(HttpTransport::new(
                config.freight_url.clone(),
                token.clone(),
                config.timeout(),
            )?),
            None => None,
        };
        Ok(Self::build(transport, config))
    }
}

impl<T: FreightTransport> FreightClient<T> {
    pub fn with_transport(transport: T, config: GatewayConfig) -> Self {
        Self::build(Some(transport), config)
    }

    /// Client that only serves local estimates.
    pub fn disconnected(config: GatewayConfig) -> Self {
        Self::build(None, config)
    }

    fn build(transport: Option<T>, config: GatewayConfig) -> Self {
        let limiter = Mutex::new(SlidingWindowLimiter::per_minute(
            config.rate_limit_per_minute,
        ));
        Self {
            transport,
            config,
            limiter,
        }
    }

    /// Fetch quotes for an address and item set.
    ///
    /// Retries transient failures up to `max_retries` extra attempts with
    /// exponential backoff; auth and rate-limit rejections are returned
    /// immediately.
    pub async fn quotes(
        &self,
        address: &ShippingAddress,
        items: &[CartLineItem],
        options: QuoteRequestOptions,
    ) -> Result<Vec<ShippingQuote>, GatewayError> {
        let Some(transport) = &self.transport else {
            tracing::info!("no carrier credential configured, serving local estimates");
            return Ok(estimate_quotes(address, items));
        };

        if !self.limiter.lock().await.try_acquire() {
            tracing::warn!("local rate limit reached, refusing quote request");
            return Err(GatewayError::RateLimitExceeded);
        }

        let request = build_quote_request(address, items, options);
        let attempts = self.config.max_retries + 1;
        let base = Duration::from_millis(self.config.retry_base_ms);

        for attempt in 1..=attempts {
            if attempt > 1 {
                let delay = backoff_delay(base, attempt - 1);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying quote request");
                tokio::time::sleep(delay).await;
            }
            match transport.send_quote_request(&request).await {
                Ok(response) => {
                    let quotes = response.normalize();
                    tracing::debug!(count = quotes.len(), "carrier quotes received");
                    return Ok(quotes);
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    tracing::warn!(attempt, error = %e, "quote request failed, will retry");
                }
                Err(e) if e.is_retryable() => {
                    tracing::error!(attempts, error = %e, "quote request retries exhausted");
                    return Err(GatewayError::RequestFailed { attempts });
                }
                Err(e) => {
                    tracing::error!(error = %e, "quote request failed");
                    return Err(e);
                }
            }
        }
        Err(GatewayError::RequestFailed { attempts })
    }
}

#[async_trait]
impl<T: FreightTransport> QuoteService for FreightClient<T> {
    async fn fetch_quotes(
        &self,
        address: &ShippingAddress,
        items: &[CartLineItem],
        _total_value: Money,
        options: QuoteRequestOptions,
    ) -> Result<Vec<ShippingQuote>, CommerceError> {
        self.quotes(address, items, options)
            .await
            .map_err(|e| CommerceError::QuoteService(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freight::response::CarrierQuote;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex as StdMutex;

    struct ScriptedTransport {
        calls: AtomicU32,
        script: StdMutex<VecDeque<Result<CarrierQuoteResponse, GatewayError>>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<CarrierQuoteResponse, GatewayError>>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                script: StdMutex::new(script.into()),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FreightTransport for ScriptedTransport {
        async fn send_quote_request(
            &self,
            _request: &QuoteJobRequest,
        ) -> Result<CarrierQuoteResponse, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GatewayError::Network("script exhausted".to_string())))
        }
    }

    fn ok_response() -> CarrierQuoteResponse {
        CarrierQuoteResponse {
            quotes: vec![CarrierQuote {
                service: "Road Express".to_string(),
                price: 42.5,
                delivery_days: Some(4),
                carrier: Some("AusFreight".to_string()),
                description: None,
                authority_to_leave: false,
                restrictions: vec![],
            }],
        }
    }

    fn fast_config() -> GatewayConfig {
        GatewayConfig {
            freight_token: Some("tok-test".to_string()),
            retry_base_ms: 1,
            ..GatewayConfig::default()
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress::new("12 Foundry Rd", "Marrickville", "NSW", "2204")
    }

    fn items() -> Vec<CartLineItem> {
        use kitform_commerce::money::{Currency, Money};
        vec![CartLineItem::new(
            "up-cover",
            "Cover",
            Money::new(14900, Currency::AUD),
        )]
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let transport = ScriptedTransport::new(vec![Ok(ok_response())]);
        let client = FreightClient::with_transport(transport, fast_config());

        let quotes = client
            .quotes(&address(), &items(), QuoteRequestOptions::default())
            .await
            .unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].price.amount_cents, 4250);
        assert_eq!(client.transport.as_ref().unwrap().calls(), 1);
    }

    #[tokio::test]
    async fn test_server_error_retried_then_succeeds() {
        let transport = ScriptedTransport::new(vec![
            Err(GatewayError::Http { status: 503 }),
            Ok(ok_response()),
        ]);
        let client = FreightClient::with_transport(transport, fast_config());

        let quotes = client
            .quotes(&address(), &items(), QuoteRequestOptions::default())
            .await
            .unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(client.transport.as_ref().unwrap().calls(), 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let transport = ScriptedTransport::new(vec![
            Err(GatewayError::Network("reset".to_string())),
            Err(GatewayError::Network("reset".to_string())),
            Err(GatewayError::Network("reset".to_string())),
        ]);
        let client = FreightClient::with_transport(transport, fast_config());

        let err = client
            .quotes(&address(), &items(), QuoteRequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed { attempts: 3 }));
        // 1 initial + max_retries extra.
        assert_eq!(client.transport.as_ref().unwrap().calls(), 3);
    }

    #[tokio::test]
    async fn test_invalid_api_key_not_retried() {
        let transport = ScriptedTransport::new(vec![Err(GatewayError::InvalidApiKey)]);
        let client = FreightClient::with_transport(transport, fast_config());

        let err = client
            .quotes(&address(), &items(), QuoteRequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidApiKey));
        assert_eq!(client.transport.as_ref().unwrap().calls(), 1);
    }

    #[tokio::test]
    async fn test_carrier_rate_limit_not_retried() {
        let transport = ScriptedTransport::new(vec![Err(GatewayError::RateLimitExceeded)]);
        let client = FreightClient::with_transport(transport, fast_config());

        let err = client
            .quotes(&address(), &items(), QuoteRequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RateLimitExceeded));
        assert_eq!(client.transport.as_ref().unwrap().calls(), 1);
    }

    #[tokio::test]
    async fn test_local_limiter_blocks_before_network() {
        let transport = ScriptedTransport::new(vec![Ok(ok_response())]);
        let config = GatewayConfig {
            rate_limit_per_minute: 0,
            ..fast_config()
        };
        let client = FreightClient::with_transport(transport, config);

        let err = client
            .quotes(&address(), &items(), QuoteRequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RateLimitExceeded));
        assert_eq!(client.transport.as_ref().unwrap().calls(), 0);
    }

    #[tokio::test]
    async fn test_no_credential_serves_estimates() {
        let client =
            FreightClient::<ScriptedTransport>::disconnected(GatewayConfig::default());

        let quotes = client
            .quotes(&address(), &items(), QuoteRequestOptions::default())
            .await
            .unwrap();
        assert!(!quotes.is_empty());
        assert!(quotes[0].service.contains("estimated"));
    }

    #[tokio::test]
    async fn test_quote_service_error_mapping() {
        let transport = ScriptedTransport::new(vec![Err(GatewayError::InvalidApiKey)]);
        let client = FreightClient::with_transport(transport, fast_config());
        let service: &dyn QuoteService = &client;

        let err = service
            .fetch_quotes(
                &address(),
                &items(),
                kitform_commerce::money::Money::new(14900, kitform_commerce::money::Currency::AUD),
                QuoteRequestOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::QuoteService(_)));
    }
}
