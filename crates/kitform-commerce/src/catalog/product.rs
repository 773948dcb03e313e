//! Product and option-axis types.

use crate::ids::{CategoryId, ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductKind {
    /// A flat-pack kit (the primary catalog entries).
    #[default]
    Kit,
    /// An individual component (benchtop, cabinet, fridge module).
    Component,
    /// A checkout upsell (covers, care kits, install hardware).
    Upsell,
    /// Staging-only sample, hidden from the storefront.
    Test,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Kit => "kit",
            ProductKind::Component => "component",
            ProductKind::Upsell => "upsell",
            ProductKind::Test => "test",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kit" => Some(ProductKind::Kit),
            "component" => Some(ProductKind::Component),
            "upsell" => Some(ProductKind::Upsell),
            "test" => Some(ProductKind::Test),
            _ => None,
        }
    }
}

/// Coarse shipping-cost category used to size carrier item descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShipClass {
    /// Parcel-sized, ships as a carton.
    #[default]
    Standard,
    /// Large but not palletized, ships as a flat pack.
    Oversized,
    /// Palletized freight.
    Freight,
}

impl ShipClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipClass::Standard => "standard",
            ShipClass::Oversized => "oversized",
            ShipClass::Freight => "freight",
        }
    }

    /// Carrier item-type string for this class.
    pub fn carrier_item_type(&self) -> &'static str {
        match self {
            ShipClass::Standard => "carton",
            ShipClass::Oversized => "flatpack",
            ShipClass::Freight => "pallet",
        }
    }
}

/// Physical dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }
}

/// One declared option axis on a product (color, size, finish...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantAxis {
    /// Stable axis name used as the selection key (e.g., "finish").
    pub name: String,
    /// Display name (e.g., "Finish").
    pub display_name: String,
    /// Whether a value must be chosen before a variant resolves.
    /// Defaults to true when deserialized from fixture data.
    #[serde(default = "default_required")]
    pub required: bool,
    /// Ordered values for this axis.
    pub values: Vec<AxisValue>,
}

fn default_required() -> bool {
    true
}

impl VariantAxis {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            required: true,
            values: Vec::new(),
        }
    }

    /// Mark this axis optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Append a value.
    pub fn with_value(mut self, value: AxisValue) -> Self {
        self.values.push(value);
        self
    }

    /// Find a value by its stable value string.
    pub fn value(&self, value: &str) -> Option<&AxisValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// One selectable value on an option axis.
///
/// Overrides, when present, replace the corresponding base-product field in
/// a synthesized variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisValue {
    /// Stable value string used as the selection key.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether this value is currently orderable.
    #[serde(default = "default_available")]
    pub available: bool,
    /// Price override in cents.
    pub price_cents: Option<i64>,
    /// Image override.
    pub image: Option<String>,
    /// SKU override.
    pub sku: Option<String>,
    /// Stock quantity for this specific value, if tracked.
    pub stock_qty: Option<i64>,
}

fn default_available() -> bool {
    true
}

impl AxisValue {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            available: true,
            price_cents: None,
            image: None,
            sku: None,
            stock_qty: None,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn with_price_cents(mut self, cents: i64) -> Self {
        self.price_cents = Some(cents);
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A pre-built variant entry on a product.
///
/// Matching against selections uses the stable option values, not display
/// labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// SKU for this combination.
    pub sku: String,
    /// Price of this combination.
    pub price: Money,
    /// Option values defining this combination: (axis name, value).
    pub option_values: Vec<(String, String)>,
    /// Image for this combination.
    pub image: Option<String>,
    /// Whether this combination is orderable.
    pub available: bool,
}

/// A product in the catalog.
///
/// Fixture data: loaded once, never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Stock keeping unit.
    pub sku: String,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Base price.
    pub price: Money,
    /// Image URLs, primary first.
    pub images: Vec<String>,
    /// Category this product belongs to.
    pub category_id: Option<CategoryId>,
    /// Tags for filtering.
    pub tags: Vec<String>,
    /// Physical dimensions, if known.
    pub dimensions: Option<Dimensions>,
    /// Weight in kilograms, if known.
    pub weight_kg: Option<f64>,
    /// Whether the base product is in stock.
    pub in_stock: bool,
    /// Shipping category.
    pub ship_class: ShipClass,
    /// Declared option axes.
    pub variant_options: Vec<VariantAxis>,
    /// Pre-built variants, if the product enumerates them explicitly.
    pub variants: Vec<ProductVariant>,
    /// Product classification.
    pub kind: ProductKind,
}

impl Product {
    /// Create a new product with no options.
    pub fn new(
        id: impl Into<ProductId>,
        sku: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            sku: sku.into(),
            name: name.into(),
            slug: slug.into(),
            price,
            images: Vec::new(),
            category_id: None,
            tags: Vec::new(),
            dimensions: None,
            weight_kg: None,
            in_stock: true,
            ship_class: ShipClass::Standard,
            variant_options: Vec::new(),
            variants: Vec::new(),
            kind: ProductKind::Kit,
        }
    }

    /// Check if the product declares any option axes.
    pub fn has_options(&self) -> bool {
        !self.variant_options.is_empty()
    }

    /// Names of the axes that must be selected before a variant resolves.
    pub fn required_option_names(&self) -> Vec<&str> {
        self.variant_options
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Primary image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|s| s.as_str())
    }

    /// Whether the product is shown on the storefront.
    pub fn is_listed(&self) -> bool {
        self.kind != ProductKind::Test
    }
}
