//! Carrier response normalization.
//!
//! Carriers behind the aggregator disagree on field names: some send
//! `serviceName`/`totalPrice`, others `service`/`price`. Serde aliases
//! coalesce the variations here so everything downstream sees exactly one
//! quote shape.

use kitform_commerce::money::{Currency, Money};
use kitform_commerce::shipping::ShippingQuote;
use serde::Deserialize;

/// One quote as a carrier sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierQuote {
    #[serde(alias = "serviceName")]
    pub service: String,
    #[serde(alias = "totalPrice")]
    pub price: f64,
    #[serde(default, alias = "eta", alias = "etaDays")]
    pub delivery_days: Option<i32>,
    #[serde(default, alias = "carrierName")]
    pub carrier: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "atl")]
    pub authority_to_leave: bool,
    #[serde(default)]
    pub restrictions: Vec<String>,
}

/// The aggregator response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CarrierQuoteResponse {
    #[serde(default)]
    pub quotes: Vec<CarrierQuote>,
}

impl CarrierQuote {
    /// Convert to the uniform domain shape. Carrier prices arrive as
    /// dollars; they become cents exactly once, here.
    pub fn normalize(self) -> ShippingQuote {
        ShippingQuote {
            service: self.service,
            price: Money::from_decimal(self.price, Currency::AUD),
            delivery_days: self.delivery_days,
            carrier: self.carrier,
            description: self.description,
            authority_to_leave: self.authority_to_leave,
            restrictions: self.restrictions,
        }
    }
}

impl CarrierQuoteResponse {
    pub fn normalize(self) -> Vec<ShippingQuote> {
        self.quotes.into_iter().map(CarrierQuote::normalize).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical_fields() {
        let body = r#"{
            "quotes": [{
                "service": "Road Express",
                "price": 42.50,
                "deliveryDays": 4,
                "carrier": "AusFreight",
                "authorityToLeave": true,
                "restrictions": ["depot-collect"]
            }]
        }"#;
        let response: CarrierQuoteResponse = serde_json::from_str(body).unwrap();
        let quotes = response.normalize();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].service, "Road Express");
        assert_eq!(quotes[0].price.amount_cents, 4250);
        assert_eq!(quotes[0].delivery_days, Some(4));
        assert!(quotes[0].authority_to_leave);
        assert_eq!(quotes[0].restrictions, vec!["depot-collect".to_string()]);
    }

    #[test]
    fn test_normalize_aliased_fields() {
        let body = r#"{
            "quotes": [{
                "serviceName": "Tail-Lift Delivery",
                "totalPrice": 189.0,
                "eta": 7,
                "carrierName": "HeavyHaul"
            }]
        }"#;
        let response: CarrierQuoteResponse = serde_json::from_str(body).unwrap();
        let quotes = response.normalize();

        assert_eq!(quotes[0].service, "Tail-Lift Delivery");
        assert_eq!(quotes[0].price.amount_cents, 18900);
        assert_eq!(quotes[0].delivery_days, Some(7));
        assert_eq!(quotes[0].carrier.as_deref(), Some("HeavyHaul"));
        // Absent optional fields take quiet defaults.
        assert!(!quotes[0].authority_to_leave);
        assert!(quotes[0].restrictions.is_empty());
    }

    #[test]
    fn test_empty_envelope() {
        let response: CarrierQuoteResponse = serde_json::from_str("{}").unwrap();
        assert!(response.normalize().is_empty());
    }
}
