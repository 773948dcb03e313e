//! Outbound HTTP integrations for the kitform storefront.
//!
//! This crate implements the network side of the traits the commerce crate
//! defines:
//!
//! - **Freight**: carrier quote requests with rate limiting, bounded retry,
//!   and a credential-less local estimator ([`freight::FreightClient`]
//!   implements [`kitform_commerce::shipping::QuoteService`])
//! - **Checkout**: payment-session creation ([`checkout::CheckoutClient`])
//! - **Enquiry**: build-enquiry submission ([`enquiry::EnquiryClient`]
//!   implements [`kitform_commerce::wizard::EnquirySink`])
//! - **Autocomplete**: suburb lookup for the address form
//!
//! Configuration comes from [`config::GatewayConfig`], which reads
//! `KITFORM_*` environment variables and degrades gracefully when the
//! freight credential is absent.

pub mod autocomplete;
pub mod checkout;
pub mod config;
pub mod enquiry;
pub mod error;
pub mod freight;
pub mod limiter;
pub mod retry;

pub use autocomplete::{AutocompleteClient, SuburbSuggestion};
pub use checkout::CheckoutClient;
pub use enquiry::EnquiryClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use freight::{FreightClient, FreightTransport, HttpTransport};
