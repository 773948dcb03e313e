//! Carrier quote request schema and builder.
//!
//! The wire shape follows the aggregator's documented schema (camelCase
//! JSON). Free-text address fields are truncated to the carrier's maximum
//! lengths and missing product dimensions fall back to fixed defaults, so a
//! sparse catalog entry can still be quoted.

use chrono::{Datelike, Duration as ChronoDuration, Utc, Weekday};
use kitform_commerce::cart::{CartLineItem, ShippingAddress};
use kitform_commerce::shipping::QuoteRequestOptions;
use serde::{Deserialize, Serialize};

/// Carrier-documented maximum for street and suburb free text.
pub const MAX_FREE_TEXT_LEN: usize = 30;

/// Fallback item dimensions (cm) and weight (kg) for products that omit
/// shipping metadata.
pub const FALLBACK_LENGTH_CM: f64 = 30.0;
pub const FALLBACK_WIDTH_CM: f64 = 20.0;
pub const FALLBACK_HEIGHT_CM: f64 = 10.0;
pub const FALLBACK_WEIGHT_KG: f64 = 1.0;

/// Dispatch warehouse, the pickup side of every quote.
const WAREHOUSE_NAME: &str = "Kitform Dispatch";
const WAREHOUSE_STREET: &str = "4 Gow St";
const WAREHOUSE_SUBURB: &str = "Padstow";
const WAREHOUSE_POSTCODE: &str = "2211";
const WAREHOUSE_STATE: &str = "NSW";

/// Suburb/postcode/state triple in the carrier's nested shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Locality {
    pub suburb: String,
    pub postcode: String,
    pub state: String,
}

/// A pickup or delivery location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobLocation {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_two: Option<String>,
    pub locality: Locality,
}

/// One freight item descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobItem {
    pub item_type: String,
    pub description: String,
    pub quantity: i64,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub weight: f64,
    pub consolidatable: bool,
}

/// The quote request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteJobRequest {
    pub job_type: Vec<String>,
    pub buyer_is_business: bool,
    pub buyer_has_forklift: bool,
    pub return_authority_to_leave_options: bool,
    pub job_date: String,
    pub pickup_location: JobLocation,
    pub buyer_location: JobLocation,
    pub items: Vec<JobItem>,
}

/// Truncate free text to the carrier's documented maximum.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

/// Next business day, the earliest the warehouse can book a pickup.
pub fn next_business_day() -> String {
    let mut date = Utc::now().date_naive() + ChronoDuration::days(1);
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date += ChronoDuration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}

fn warehouse_location() -> JobLocation {
    JobLocation {
        name: WAREHOUSE_NAME.to_string(),
        address: WAREHOUSE_STREET.to_string(),
        address_line_two: None,
        locality: Locality {
            suburb: WAREHOUSE_SUBURB.to_string(),
            postcode: WAREHOUSE_POSTCODE.to_string(),
            state: WAREHOUSE_STATE.to_string(),
        },
    }
}

/// Map a cart line item to a carrier item descriptor.
fn job_item(item: &CartLineItem) -> JobItem {
    let (length, width, height) = match item.dimensions {
        Some(d) => (d.length_cm, d.width_cm, d.height_cm),
        None => (FALLBACK_LENGTH_CM, FALLBACK_WIDTH_CM, FALLBACK_HEIGHT_CM),
    };
    JobItem {
        item_type: item.ship_class.carrier_item_type().to_string(),
        description: truncate(&item.name, MAX_FREE_TEXT_LEN),
        quantity: item.quantity,
        height,
        width,
        length,
        weight: item.weight_kg.unwrap_or(FALLBACK_WEIGHT_KG),
        // Cartons can share a consignment; pallets and flat packs cannot.
        consolidatable: item.ship_class == kitform_commerce::catalog::ShipClass::Standard,
    }
}

/// Build the carrier request for a cart and destination.
pub fn build_quote_request(
    address: &ShippingAddress,
    items: &[CartLineItem],
    options: QuoteRequestOptions,
) -> QuoteJobRequest {
    let mut job_type: Vec<String> = Vec::new();
    for item in items {
        let t = item.ship_class.carrier_item_type().to_string();
        if !job_type.contains(&t) {
            job_type.push(t);
        }
    }

    QuoteJobRequest {
        job_type,
        buyer_is_business: options.buyer_is_business,
        buyer_has_forklift: options.buyer_has_forklift,
        return_authority_to_leave_options: options.authority_to_leave,
        job_date: next_business_day(),
        pickup_location: warehouse_location(),
        buyer_location: JobLocation {
            name: "Delivery address".to_string(),
            address: truncate(&address.street, MAX_FREE_TEXT_LEN),
            address_line_two: None,
            locality: Locality {
                suburb: truncate(&address.suburb, MAX_FREE_TEXT_LEN),
                postcode: address.postcode.clone(),
                state: address.state.clone(),
            },
        },
        items: items.iter().map(job_item).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitform_commerce::catalog::{Dimensions, ShipClass};
    use kitform_commerce::money::{Currency, Money};

    fn address() -> ShippingAddress {
        ShippingAddress::new("12 Foundry Rd", "Marrickville", "NSW", "2204")
    }

    #[test]
    fn test_dimension_fallbacks() {
        let items = vec![CartLineItem::new(
            "up-care-kit",
            "Stainless Care Kit",
            Money::new(4900, Currency::AUD),
        )];
        let req = build_quote_request(&address(), &items, QuoteRequestOptions::default());

        let item = &req.items[0];
        assert_eq!(item.length, 30.0);
        assert_eq!(item.width, 20.0);
        assert_eq!(item.height, 10.0);
        assert_eq!(item.weight, 1.0);
        assert_eq!(item.item_type, "carton");
        assert!(item.consolidatable);
    }

    #[test]
    fn test_product_metadata_used_when_present() {
        let items = vec![CartLineItem::new(
            "kit-classic-4",
            "Classic 4-Module Outdoor Kitchen",
            Money::new(499900, Currency::AUD),
        )
        .with_shipping(185.0, Dimensions::new(240.0, 65.0, 90.0), ShipClass::Freight)];
        let req = build_quote_request(&address(), &items, QuoteRequestOptions::default());

        let item = &req.items[0];
        assert_eq!(item.length, 240.0);
        assert_eq!(item.weight, 185.0);
        assert_eq!(item.item_type, "pallet");
        assert!(!item.consolidatable);
        assert_eq!(req.job_type, vec!["pallet".to_string()]);
    }

    #[test]
    fn test_free_text_truncated_to_carrier_max() {
        let long_street = "Unit 7, 123 Extraordinarily Long Boulevard Name";
        let addr = ShippingAddress::new(long_street, "Marrickville", "NSW", "2204");
        let items = vec![CartLineItem::new("x", "X", Money::new(100, Currency::AUD))];
        let req = build_quote_request(&addr, &items, QuoteRequestOptions::default());

        assert_eq!(req.buyer_location.address.chars().count(), 30);
        assert!(long_street.starts_with(&req.buyer_location.address));
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let items = vec![CartLineItem::new("x", "X", Money::new(100, Currency::AUD))];
        let req = build_quote_request(&address(), &items, QuoteRequestOptions::default());
        let json = serde_json::to_value(&req).unwrap();

        assert!(json.get("buyerIsBusiness").is_some());
        assert!(json.get("returnAuthorityToLeaveOptions").is_some());
        assert!(json["pickupLocation"]["locality"].get("postcode").is_some());
        assert!(json["items"][0].get("itemType").is_some());
    }

    #[test]
    fn test_next_business_day_skips_weekend() {
        let date = next_business_day();
        let parsed = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").unwrap();
        assert!(!matches!(parsed.weekday(), Weekday::Sat | Weekday::Sun));
    }
}
