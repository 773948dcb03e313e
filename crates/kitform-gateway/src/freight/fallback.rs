//! Local quote estimation for credential-less environments.
//!
//! When no carrier API token is configured the client does not fail: it
//! synthesizes approximate quotes from a small rule table so development,
//! previews, and demos can exercise the full cart-to-checkout path. The
//! estimates are deliberately labelled as such in the service name.

use kitform_commerce::cart::{CartLineItem, ShippingAddress};
use kitform_commerce::catalog::ShipClass;
use kitform_commerce::money::{Currency, Money};
use kitform_commerce::shipping::ShippingQuote;

/// Per-item base rates in cents, by shipping class.
const CARTON_BASE_CENTS: i64 = 1250;
const FLATPACK_BASE_CENTS: i64 = 4900;
const PALLET_BASE_CENTS: i64 = 16500;

/// Linear surcharge above the free-weight threshold.
const FREE_WEIGHT_KG: f64 = 5.0;
const PER_KG_SURCHARGE_CENTS: f64 = 80.0;

/// Flat surcharge for remote destinations.
const REMOTE_SURCHARGE_CENTS: i64 = 4500;

/// International baseline.
const INTERNATIONAL_BASE_CENTS: i64 = 12000;
const INTERNATIONAL_PER_KG_CENTS: f64 = 500.0;

/// States priced as remote by every carrier on the panel.
fn is_remote_state(state: &str) -> bool {
    matches!(state.to_uppercase().as_str(), "NT" | "WA" | "TAS")
}

fn total_weight_kg(items: &[CartLineItem]) -> f64 {
    items
        .iter()
        .map(|i| i.weight_kg.unwrap_or(1.0) * i.quantity as f64)
        .sum()
}

fn base_rate_cents(items: &[CartLineItem]) -> i64 {
    items
        .iter()
        .map(|i| {
            let rate = match i.ship_class {
                ShipClass::Standard => CARTON_BASE_CENTS,
                ShipClass::Oversized => FLATPACK_BASE_CENTS,
                ShipClass::Freight => PALLET_BASE_CENTS,
            };
            rate * i.quantity
        })
        .sum()
}

fn freight_restrictions(items: &[CartLineItem]) -> Vec<String> {
    if items.iter().any(|i| i.ship_class == ShipClass::Freight) {
        vec!["forklift-or-tail-lift-required".to_string()]
    } else {
        Vec::new()
    }
}

/// Estimate quotes for a destination and item set. Always returns at least
/// one quote; never fails.
pub fn estimate_quotes(address: &ShippingAddress, items: &[CartLineItem]) -> Vec<ShippingQuote> {
    let weight = total_weight_kg(items);
    let overweight_cents = if weight > FREE_WEIGHT_KG {
        ((weight - FREE_WEIGHT_KG) * PER_KG_SURCHARGE_CENTS).round() as i64
    } else {
        0
    };

    if address.is_international() {
        let cents = INTERNATIONAL_BASE_CENTS + (weight * INTERNATIONAL_PER_KG_CENTS).round() as i64;
        return vec![ShippingQuote {
            service: "International Economy (estimated)".to_string(),
            price: Money::new(cents, Currency::AUD),
            delivery_days: Some(14),
            carrier: None,
            description: Some("Estimate only; final rate confirmed at dispatch".to_string()),
            authority_to_leave: false,
            restrictions: vec!["customs-clearance".to_string()],
        }];
    }

    let remote = is_remote_state(&address.state);
    let mut standard_cents = base_rate_cents(items) + overweight_cents;
    if remote {
        standard_cents += REMOTE_SURCHARGE_CENTS;
    }
    // Express runs on the same rules at a fixed 60% premium.
    let express_cents = standard_cents + (standard_cents * 6) / 10;

    let restrictions = freight_restrictions(items);

    vec![
        ShippingQuote {
            service: "Standard Freight (estimated)".to_string(),
            price: Money::new(standard_cents, Currency::AUD),
            delivery_days: Some(if remote { 8 } else { 5 }),
            carrier: None,
            description: Some("Estimate only; final rate confirmed at dispatch".to_string()),
            authority_to_leave: true,
            restrictions: restrictions.clone(),
        },
        ShippingQuote {
            service: "Express Freight (estimated)".to_string(),
            price: Money::new(express_cents, Currency::AUD),
            delivery_days: Some(if remote { 4 } else { 2 }),
            carrier: None,
            description: Some("Signature on delivery".to_string()),
            authority_to_leave: false,
            restrictions,
        },
    ]
}
