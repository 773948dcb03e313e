//! Shipping quote types and the quote-service seam.
//!
//! Quotes are produced by an external carrier aggregator. The gateway crate
//! implements [`QuoteService`]; the cart store only ever sees the normalized
//! [`ShippingQuote`] shape, never carrier-specific field names.

use crate::cart::{CartLineItem, ShippingAddress};
use crate::error::CommerceError;
use crate::money::Money;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A carrier-priced shipping service offer for one address/item set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingQuote {
    /// Service name (e.g., "Standard Freight").
    pub service: String,
    /// Quoted price.
    pub price: Money,
    /// Estimated delivery days.
    pub delivery_days: Option<i32>,
    /// Carrier name.
    pub carrier: Option<String>,
    /// Free-text description of the service.
    pub description: Option<String>,
    /// Whether the carrier may leave the package without a signature.
    pub authority_to_leave: bool,
    /// Business rules attached to this service (depot pickup, tail lift...).
    pub restrictions: Vec<String>,
}

impl ShippingQuote {
    /// Delivery estimate string for display.
    pub fn delivery_estimate(&self) -> Option<String> {
        self.delivery_days.map(|d| {
            if d == 1 {
                "1 day".to_string()
            } else {
                format!("{} days", d)
            }
        })
    }
}

/// Buyer-side options forwarded to the carrier request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct QuoteRequestOptions {
    /// Delivery address is a business, not residential.
    pub buyer_is_business: bool,
    /// Receiving site has a forklift (affects freight services offered).
    pub buyer_has_forklift: bool,
    /// Ask the carrier to include authority-to-leave service options.
    pub authority_to_leave: bool,
}

/// The seam between the cart store and the carrier gateway.
///
/// Failures cross this boundary as values with user-renderable messages;
/// the store never has to catch panics or downcast transport errors.
#[async_trait]
pub trait QuoteService {
    async fn fetch_quotes(
        &self,
        address: &ShippingAddress,
        items: &[CartLineItem],
        total_value: Money,
        options: QuoteRequestOptions,
    ) -> Result<Vec<ShippingQuote>, CommerceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_delivery_estimate() {
        let quote = ShippingQuote {
            service: "Express".to_string(),
            price: Money::new(2500, Currency::AUD),
            delivery_days: Some(1),
            carrier: Some("FastWay".to_string()),
            description: None,
            authority_to_leave: false,
            restrictions: vec![],
        };
        assert_eq!(quote.delivery_estimate(), Some("1 day".to_string()));

        let mut quote = quote;
        quote.delivery_days = Some(5);
        assert_eq!(quote.delivery_estimate(), Some("5 days".to_string()));

        quote.delivery_days = None;
        assert_eq!(quote.delivery_estimate(), None);
    }
}
