//! Carrier quote integration: request building, response normalization,
//! the retrying client, and the credential-less estimator.

pub mod client;
pub mod fallback;
pub mod request;
pub mod response;

pub use client::{FreightClient, FreightTransport, HttpTransport};
pub use fallback::estimate_quotes;
pub use request::{build_quote_request, QuoteJobRequest};
pub use response::{CarrierQuote, CarrierQuoteResponse};
