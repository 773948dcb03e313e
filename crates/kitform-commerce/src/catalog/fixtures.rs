//! The in-memory catalog and its fixture data.
//!
//! Product data is static: built once at startup, handed out by reference,
//! never mutated. There is deliberately no persistence layer behind this.

use crate::catalog::product::{
    AxisValue, Dimensions, Product, ProductKind, ShipClass, VariantAxis,
};
use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, Money};

/// The product catalog: an owned, immutable collection with lookups.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Build the standard demo catalog.
    pub fn with_fixtures() -> Self {
        Self::new(fixture_products())
    }

    /// All listed products (test entries excluded).
    pub fn listed(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_listed())
    }

    /// Look up a product by id.
    pub fn by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Listed products in a category.
    pub fn in_category<'a>(
        &'a self,
        category: &'a CategoryId,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.listed()
            .filter(move |p| p.category_id.as_ref() == Some(category))
    }

    /// Listed flat-pack kits.
    pub fn kits(&self) -> impl Iterator<Item = &Product> {
        self.listed().filter(|p| p.kind == ProductKind::Kit)
    }

    /// Listed checkout upsells.
    pub fn upsells(&self) -> impl Iterator<Item = &Product> {
        self.listed().filter(|p| p.kind == ProductKind::Upsell)
    }

    /// Number of products, including unlisted ones.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn aud(cents: i64) -> Money {
    Money::new(cents, Currency::AUD)
}

fn finish_axis() -> VariantAxis {
    VariantAxis::new("finish", "Finish")
        .with_value(AxisValue::new("matte-black", "Matte Black"))
        .with_value(AxisValue::new("stainless", "Stainless Steel"))
        .with_value(AxisValue::new("timber", "Timber Look"))
}

fn fixture_products() -> Vec<Product> {
    let kits = CategoryId::new("kits");
    let components = CategoryId::new("components");
    let upsells = CategoryId::new("upsells");

    let mut classic_4 = Product::new(
        "kit-classic-4",
        "KF-C4",
        "Classic 4-Module Outdoor Kitchen",
        "classic-4-module",
        aud(499900),
    );
    classic_4.images = vec!["img/classic-4.jpg".to_string()];
    classic_4.category_id = Some(kits.clone());
    classic_4.tags = vec!["kit".to_string(), "classic".to_string()];
    classic_4.dimensions = Some(Dimensions::new(240.0, 65.0, 90.0));
    classic_4.weight_kg = Some(185.0);
    classic_4.ship_class = ShipClass::Freight;
    classic_4.variant_options = vec![{
        let mut axis = finish_axis();
        // Stainless carries a premium on the classic line.
        axis.values[1].price_cents = Some(529900);
        axis
    }];

    let mut classic_6 = Product::new(
        "kit-classic-6",
        "KF-C6",
        "Classic 6-Module Outdoor Kitchen",
        "classic-6-module",
        aud(689900),
    );
    classic_6.images = vec!["img/classic-6.jpg".to_string()];
    classic_6.category_id = Some(kits.clone());
    classic_6.tags = vec!["kit".to_string(), "classic".to_string()];
    classic_6.dimensions = Some(Dimensions::new(360.0, 65.0, 90.0));
    classic_6.weight_kg = Some(260.0);
    classic_6.ship_class = ShipClass::Freight;
    classic_6.variant_options = vec![finish_axis()];

    let mut premium_4 = Product::new(
        "kit-premium-4",
        "KF-P4",
        "Premium 4-Module Outdoor Kitchen",
        "premium-4-module",
        aud(849900),
    );
    premium_4.images = vec!["img/premium-4.jpg".to_string()];
    premium_4.category_id = Some(kits.clone());
    premium_4.tags = vec!["kit".to_string(), "premium".to_string()];
    premium_4.dimensions = Some(Dimensions::new(250.0, 70.0, 92.0));
    premium_4.weight_kg = Some(210.0);
    premium_4.ship_class = ShipClass::Freight;
    premium_4.variant_options = vec![finish_axis()];

    let mut fridge_single = Product::new(
        "comp-fridge-single",
        "KF-FR1",
        "Single-Door Outdoor Fridge Module",
        "fridge-module-single",
        aud(129900),
    );
    fridge_single.images = vec!["img/fridge-single.jpg".to_string()];
    fridge_single.category_id = Some(components.clone());
    fridge_single.kind = ProductKind::Component;
    fridge_single.dimensions = Some(Dimensions::new(60.0, 60.0, 85.0));
    fridge_single.weight_kg = Some(42.0);
    fridge_single.ship_class = ShipClass::Oversized;

    let mut bench_cover = Product::new(
        "up-cover",
        "KF-COV",
        "All-Weather Kitchen Cover",
        "all-weather-cover",
        aud(14900),
    );
    bench_cover.images = vec!["img/cover.jpg".to_string()];
    bench_cover.category_id = Some(upsells.clone());
    bench_cover.kind = ProductKind::Upsell;
    bench_cover.weight_kg = Some(2.4);

    let mut care_kit = Product::new(
        "up-care-kit",
        "KF-CARE",
        "Stainless Care Kit",
        "stainless-care-kit",
        aud(4900),
    );
    care_kit.category_id = Some(upsells);
    care_kit.kind = ProductKind::Upsell;
    care_kit.weight_kg = Some(1.1);

    // Staging checkout probe; hidden from listings, orderable by id.
    let mut test_product = Product::new(
        "test-checkout",
        "KF-TEST",
        "Checkout Test Item",
        "checkout-test-item",
        aud(100),
    );
    test_product.kind = ProductKind::Test;

    vec![
        classic_4,
        classic_6,
        premium_4,
        fridge_single,
        bench_cover,
        care_kit,
        test_product,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_catalog_loads() {
        let catalog = Catalog::with_fixtures();
        assert!(!catalog.is_empty());
        assert!(catalog.by_id(&ProductId::new("kit-classic-4")).is_some());
        assert!(catalog.by_slug("classic-6-module").is_some());
    }

    #[test]
    fn test_listed_excludes_test_products() {
        let catalog = Catalog::with_fixtures();
        assert!(catalog.listed().all(|p| p.kind != ProductKind::Test));
        // Still reachable directly.
        assert!(catalog.by_id(&ProductId::new("test-checkout")).is_some());
    }

    #[test]
    fn test_category_lookup() {
        let catalog = Catalog::with_fixtures();
        let kits = CategoryId::new("kits");
        assert_eq!(catalog.in_category(&kits).count(), 3);
        assert_eq!(catalog.upsells().count(), 2);
    }
}
