//! Checkout orchestration and payment-session request construction.

use crate::cart::CartStore;
use crate::checkout::totals::{order_total, InsuranceTier, PaymentMethod};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An item line in the payment-session payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionItem {
    pub id: String,
    pub name: String,
    /// Price in dollars; cents are converted at the wire boundary only.
    pub price: f64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub images: Vec<String>,
}

/// Payload for the payment-session creation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub items: Vec<SessionItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub shipping_cost: f64,
    pub shipping_method: String,
}

/// Order options gathered on the checkout page.
///
/// Reads the cart plus the selected quote, computes the final total, and
/// builds the payment-session request. Submission is guarded: no selected
/// quote means no session, mirroring the disabled submit control.
#[derive(Debug, Clone, Default)]
pub struct CheckoutDraft {
    pub payment_method: PaymentMethod,
    pub insurance: InsuranceTier,
    pub delivery_instructions: Option<String>,
}

impl CheckoutDraft {
    pub fn new(payment_method: PaymentMethod) -> Self {
        Self {
            payment_method,
            insurance: InsuranceTier::None,
            delivery_instructions: None,
        }
    }

    /// Whether checkout can be submitted for this cart.
    pub fn can_submit(&self, cart: &CartStore) -> bool {
        !cart.is_empty() && cart.selected_quote().is_some()
    }

    /// The final total for display and charging.
    pub fn total(&self, cart: &CartStore) -> Result<Money, CommerceError> {
        order_total(
            cart.subtotal()?,
            cart.selected_quote().map(|q| q.price),
            self.payment_method,
            self.insurance,
        )
    }

    /// Build the payment-session payload.
    ///
    /// Runtime guard: fails with `QuoteNotSelected` when no shipping quote
    /// has been chosen, even if a caller bypassed the disabled control.
    pub fn session_request(
        &self,
        cart: &CartStore,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Result<CheckoutSessionRequest, CommerceError> {
        let quote = cart
            .selected_quote()
            .ok_or(CommerceError::QuoteNotSelected)?;

        let items = cart
            .items()
            .iter()
            .map(|item| SessionItem {
                id: item.id.as_str().to_string(),
                name: item.name.clone(),
                price: item.unit_price.to_decimal(),
                quantity: item.quantity,
                short_description: None,
                images: item.image.clone().into_iter().collect(),
            })
            .collect();

        Ok(CheckoutSessionRequest {
            items,
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
            shipping_cost: quote.price.to_decimal(),
            shipping_method: quote.service.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLineItem;
    use crate::money::Currency;
    use crate::shipping::ShippingQuote;

    fn cart_with_quote() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(
            CartLineItem::new("kit-classic-4", "Classic 4", Money::new(499900, Currency::AUD))
                .with_quantity(1),
        )
        .unwrap();
        cart.select_quote(ShippingQuote {
            service: "Standard Freight".to_string(),
            price: Money::new(18500, Currency::AUD),
            delivery_days: Some(6),
            carrier: Some("AusFreight".to_string()),
            description: None,
            authority_to_leave: false,
            restrictions: vec![],
        });
        cart
    }

    #[test]
    fn test_session_request_requires_quote() {
        let mut cart = CartStore::new();
        cart.add_item(CartLineItem::new(
            "x",
            "X",
            Money::new(100, Currency::AUD),
        ))
        .unwrap();

        let draft = CheckoutDraft::default();
        assert!(!draft.can_submit(&cart));
        let err = draft.session_request(&cart, "https://s", "https://c");
        assert!(matches!(err, Err(CommerceError::QuoteNotSelected)));
    }

    #[test]
    fn test_session_request_shape() {
        let cart = cart_with_quote();
        let draft = CheckoutDraft::new(PaymentMethod::CreditCard);
        assert!(draft.can_submit(&cart));

        let req = draft
            .session_request(&cart, "https://kitform.example/done", "https://kitform.example/cart")
            .unwrap();
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].id, "kit-classic-4");
        assert!((req.items[0].price - 4999.0).abs() < 1e-9);
        assert!((req.shipping_cost - 185.0).abs() < 1e-9);
        assert_eq!(req.shipping_method, "Standard Freight");

        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("successUrl").is_some());
        assert!(json.get("shippingCost").is_some());
    }

    #[test]
    fn test_draft_total_includes_surcharge_and_shipping() {
        let cart = cart_with_quote();
        let draft = CheckoutDraft::new(PaymentMethod::CreditCard);
        // 499900 + 18500 + 2.5% of 499900 (12498c, rounded once)
        let total = draft.total(&cart).unwrap();
        assert_eq!(total.amount_cents, 499900 + 18500 + 12498);
    }
}
