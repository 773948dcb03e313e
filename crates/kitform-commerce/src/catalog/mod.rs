//! Product catalog module.
//!
//! Static product fixtures, option axes, and variant resolution.

mod fixtures;
mod product;
mod variant;

pub use fixtures::Catalog;
pub use product::{
    AxisValue, Dimensions, Product, ProductKind, ProductVariant, ShipClass, VariantAxis,
};
pub use variant::{resolve_variant, ResolvedVariant, SelectedOptions};
