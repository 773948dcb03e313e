//! Cart store and line items.
//!
//! The cart is an explicit owned object: one per session, mutated only
//! through its methods. `item_count` and `subtotal` are always derived from
//! the line items, never independently settable, so they cannot drift.
//!
//! Quote fetching is the only operation here that touches the network (via
//! the [`QuoteService`] seam). Two overlapping fetches are possible if the
//! user double-submits; there is no cancellation token and the last response
//! to land wins, matching the UI's advisory-only double-click protection.

use crate::cart::ShippingAddress;
use crate::catalog::{Dimensions, ShipClass};
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};
use crate::shipping::{QuoteRequestOptions, QuoteService, ShippingQuote};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 999;

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product or resolved-variant id; the merge key for repeat adds.
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity, always >= 1.
    pub quantity: i64,
    /// Display image.
    pub image: Option<String>,
    /// Weight in kilograms for freight quoting.
    pub weight_kg: Option<f64>,
    /// Dimensions for freight quoting.
    pub dimensions: Option<Dimensions>,
    /// Shipping category.
    pub ship_class: ShipClass,
}

impl CartLineItem {
    pub fn new(id: impl Into<LineItemId>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity: 1,
            image: None,
            weight_kg: None,
            dimensions: None,
            ship_class: ShipClass::Standard,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_shipping(
        mut self,
        weight_kg: f64,
        dimensions: Dimensions,
        ship_class: ShipClass,
    ) -> Self {
        self.weight_kg = Some(weight_kg);
        self.dimensions = Some(dimensions);
        self.ship_class = ship_class;
        self
    }

    /// Line total (unit price x quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// The session cart.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    shipping_address: Option<ShippingAddress>,
    quotes: Vec<ShippingQuote>,
    selected_quote: Option<ShippingQuote>,
    /// True while a quote request is in flight; read by the UI to show a
    /// loading indicator and disable the submit control.
    quoting: bool,
    /// User-renderable error from the last quote attempt.
    quote_error: Option<String>,
    currency: Currency,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item; repeat adds of the same id accumulate quantity.
    pub fn add_item(&mut self, item: CartLineItem) -> Result<(), CommerceError> {
        if item.quantity < 1 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let merged = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            if merged > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    merged,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = merged;
        } else {
            if item.quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    item.quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            debug!(id = %item.id, "cart: new line item");
            self.items.push(item);
        }
        Ok(())
    }

    /// Remove an item entirely.
    pub fn remove_item(&mut self, id: &LineItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < before
    }

    /// Set an item's quantity exactly.
    ///
    /// Quantities below 1 are a no-op, not a removal: the UI's stepper can
    /// emit 0 transiently and deletion stays an explicit action.
    pub fn update_quantity(
        &mut self,
        id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Ok(false);
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.id == id) {
            item.quantity = quantity;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Empty the cart and drop any quoting state.
    pub fn clear(&mut self) {
        self.items.clear();
        self.quotes.clear();
        self.selected_quote = None;
        self.quote_error = None;
    }

    /// Set the delivery address.
    ///
    /// Fetched quotes were priced against the previous destination, so the
    /// quote list and the selection are invalidated here.
    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.shipping_address = Some(address);
        self.quotes.clear();
        self.selected_quote = None;
        self.quote_error = None;
    }

    /// Fetch carrier quotes for the current address and items.
    ///
    /// The only I/O operation on the store. Failures land in `quote_error`
    /// as a user-renderable string and are also returned as values; prior
    /// cart state is never touched by a failure.
    pub async fn get_shipping_quotes(
        &mut self,
        service: &dyn QuoteService,
        options: QuoteRequestOptions,
    ) -> Result<Vec<ShippingQuote>, CommerceError> {
        let address = self
            .shipping_address
            .clone()
            .ok_or_else(|| CommerceError::IncompleteAddress("street, suburb, state, postcode".into()))?;
        address.validate()?;

        let total = self.subtotal()?;
        let items = self.items.clone();

        self.quoting = true;
        self.quote_error = None;
        let result = service.fetch_quotes(&address, &items, total, options).await;
        self.quoting = false;

        match result {
            Ok(quotes) => {
                debug!(count = quotes.len(), "cart: quotes received");
                self.quotes = quotes.clone();
                Ok(quotes)
            }
            Err(err) => {
                warn!(error = %err, "cart: quote fetch failed");
                self.quote_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Select one quote; replaces any previous selection.
    pub fn select_quote(&mut self, quote: ShippingQuote) {
        self.selected_quote = Some(quote);
    }

    /// Total item count (sum of quantities). Always derived.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Goods subtotal. Always derived from the line items.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let mut acc = Money::zero(self.currency);
        for item in &self.items {
            acc = acc
                .try_add(&item.line_total()?)
                .ok_or(CommerceError::Overflow)?;
        }
        Ok(acc)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_address.as_ref()
    }

    pub fn quotes(&self) -> &[ShippingQuote] {
        &self.quotes
    }

    pub fn selected_quote(&self) -> Option<&ShippingQuote> {
        self.selected_quote.as_ref()
    }

    pub fn is_quoting(&self) -> bool {
        self.quoting
    }

    pub fn quote_error(&self) -> Option<&str> {
        self.quote_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::QuoteService;
    use async_trait::async_trait;

    fn item(id: &str, cents: i64, qty: i64) -> CartLineItem {
        CartLineItem::new(id, id.to_string(), Money::new(cents, Currency::AUD))
            .with_quantity(qty)
    }

    struct FixedQuotes(Vec<ShippingQuote>);

    #[async_trait]
    impl QuoteService for FixedQuotes {
        async fn fetch_quotes(
            &self,
            _address: &ShippingAddress,
            _items: &[CartLineItem],
            _total: Money,
            _options: QuoteRequestOptions,
        ) -> Result<Vec<ShippingQuote>, CommerceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingQuotes;

    #[async_trait]
    impl QuoteService for FailingQuotes {
        async fn fetch_quotes(
            &self,
            _address: &ShippingAddress,
            _items: &[CartLineItem],
            _total: Money,
            _options: QuoteRequestOptions,
        ) -> Result<Vec<ShippingQuote>, CommerceError> {
            Err(CommerceError::QuoteService(
                "carrier unavailable, try again".to_string(),
            ))
        }
    }

    fn standard_quote(cents: i64) -> ShippingQuote {
        ShippingQuote {
            service: "Standard Freight".to_string(),
            price: Money::new(cents, Currency::AUD),
            delivery_days: Some(5),
            carrier: Some("AusFreight".to_string()),
            description: None,
            authority_to_leave: true,
            restrictions: vec![],
        }
    }

    #[test]
    fn test_add_item_merges_by_id() {
        let mut cart = CartStore::new();
        cart.add_item(item("kit-classic-4", 499900, 1)).unwrap();
        cart.add_item(item("kit-classic-4", 499900, 2)).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_item_rejects_nonpositive_quantity() {
        let mut cart = CartStore::new();
        assert!(cart.add_item(item("x", 100, 0)).is_err());
        assert!(cart.add_item(item("x", 100, -2)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_below_one_is_noop() {
        let mut cart = CartStore::new();
        cart.add_item(item("x", 100, 3)).unwrap();
        let id = LineItemId::new("x");

        assert!(!cart.update_quantity(&id, 0).unwrap());
        assert_eq!(cart.item_count(), 3);
        assert!(!cart.update_quantity(&id, -5).unwrap());
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = CartStore::new();
        cart.add_item(item("x", 100, 3)).unwrap();
        let id = LineItemId::new("x");

        assert!(cart.update_quantity(&id, 7).unwrap());
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = CartStore::new();
        cart.add_item(item("x", 100, 3)).unwrap();
        let id = LineItemId::new("x");
        assert!(cart
            .update_quantity(&id, MAX_QUANTITY_PER_ITEM + 1)
            .is_err());
    }

    #[test]
    fn test_subtotal_tracks_mutations() {
        let mut cart = CartStore::new();
        cart.add_item(item("a", 1000, 2)).unwrap();
        cart.add_item(item("b", 2500, 1)).unwrap();
        assert_eq!(cart.subtotal().unwrap().amount_cents, 4500);

        cart.update_quantity(&LineItemId::new("a"), 5).unwrap();
        assert_eq!(cart.subtotal().unwrap().amount_cents, 7500);

        cart.remove_item(&LineItemId::new("b"));
        assert_eq!(cart.subtotal().unwrap().amount_cents, 5000);

        cart.clear();
        assert_eq!(cart.subtotal().unwrap().amount_cents, 0);
    }

    #[tokio::test]
    async fn test_quotes_require_complete_address() {
        let mut cart = CartStore::new();
        cart.add_item(item("x", 5000, 1)).unwrap();

        let svc = FixedQuotes(vec![standard_quote(1500)]);
        // No address at all.
        assert!(cart
            .get_shipping_quotes(&svc, QuoteRequestOptions::default())
            .await
            .is_err());

        // Partial address.
        cart.set_shipping_address(ShippingAddress::new("12 Foundry Rd", "", "NSW", "2204"));
        assert!(cart
            .get_shipping_quotes(&svc, QuoteRequestOptions::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_quote_failure_preserves_cart_and_sets_error() {
        let mut cart = CartStore::new();
        cart.add_item(item("x", 5000, 2)).unwrap();
        cart.set_shipping_address(ShippingAddress::new(
            "12 Foundry Rd",
            "Marrickville",
            "NSW",
            "2204",
        ));

        let result = cart
            .get_shipping_quotes(&FailingQuotes, QuoteRequestOptions::default())
            .await;
        assert!(result.is_err());
        assert!(cart.quote_error().unwrap().contains("carrier unavailable"));
        assert!(!cart.is_quoting());
        // Cart contents untouched by the failure.
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test]
    async fn test_address_change_invalidates_quotes() {
        let mut cart = CartStore::new();
        cart.add_item(item("x", 5000, 1)).unwrap();
        cart.set_shipping_address(ShippingAddress::new(
            "12 Foundry Rd",
            "Marrickville",
            "NSW",
            "2204",
        ));

        let svc = FixedQuotes(vec![standard_quote(1500)]);
        cart.get_shipping_quotes(&svc, QuoteRequestOptions::default())
            .await
            .unwrap();
        cart.select_quote(cart.quotes()[0].clone());
        assert!(cart.selected_quote().is_some());

        cart.set_shipping_address(ShippingAddress::new("1 Beach St", "Cairns", "QLD", "4870"));
        assert!(cart.quotes().is_empty());
        assert!(cart.selected_quote().is_none());
    }

    #[tokio::test]
    async fn test_select_quote_last_write_wins() {
        let mut cart = CartStore::new();
        cart.select_quote(standard_quote(1500));
        cart.select_quote(standard_quote(2500));
        assert_eq!(cart.selected_quote().unwrap().price.amount_cents, 2500);
    }

    /// End-to-end: $50 x2 in the cart, address set, $15 quote selected,
    /// checkout total comes to $115.00.
    #[tokio::test]
    async fn test_cart_to_checkout_scenario() {
        use crate::checkout::{order_total, InsuranceTier, PaymentMethod};

        let mut cart = CartStore::new();
        cart.add_item(item("up-cover", 5000, 2)).unwrap();
        assert_eq!(cart.subtotal().unwrap().amount_cents, 10000);

        cart.set_shipping_address(ShippingAddress::new(
            "12 Foundry Rd",
            "Marrickville",
            "NSW",
            "2204",
        ));
        let svc = FixedQuotes(vec![standard_quote(1500)]);
        let quotes = cart
            .get_shipping_quotes(&svc, QuoteRequestOptions::default())
            .await
            .unwrap();
        cart.select_quote(quotes[0].clone());

        let total = order_total(
            cart.subtotal().unwrap(),
            cart.selected_quote().map(|q| q.price),
            PaymentMethod::BankTransfer,
            InsuranceTier::None,
        )
        .unwrap();
        assert_eq!(total.amount_cents, 11500);
        assert_eq!(total.display(), "$115.00");
    }
}
