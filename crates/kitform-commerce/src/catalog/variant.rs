//! Variant resolution.
//!
//! Given a product's declared option axes and a partial user selection,
//! resolve the concrete priced/SKU'd variant, or `None` while the selection
//! is incomplete. Pure functions; the UI calls this on every click, so
//! malformed input degrades to `None` instead of erroring.
//!
//! Explicit variant entries are matched on stable option *values* via a
//! sorted `name=value` key. Display labels never participate in matching.

use crate::catalog::product::{Product, ProductVariant};
use crate::ids::VariantId;
use crate::money::Money;
use std::collections::BTreeMap;

/// A user's in-progress option selection: axis name -> chosen value.
pub type SelectedOptions = BTreeMap<String, String>;

/// A concrete, priced instantiation of a product for one option combination.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariant {
    /// Variant identifier (explicit entry's id, or synthesized).
    pub id: VariantId,
    /// SKU after overrides.
    pub sku: String,
    /// Price after overrides.
    pub price: Money,
    /// Image after overrides.
    pub image: Option<String>,
    /// True iff every selected value is individually orderable.
    pub available: bool,
    /// The (axis, value) pairs this variant was resolved from.
    pub option_values: Vec<(String, String)>,
}

/// Stable comparison key for an option combination: sorted `name=value`
/// pairs joined by `|`.
fn combination_key(pairs: &[(String, String)]) -> String {
    let mut sorted: Vec<String> = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    sorted.sort();
    sorted.join("|")
}

/// Resolve a product + selection to a concrete variant.
///
/// Returns `None` whenever any required axis is unselected. Selected axes
/// the product does not declare are ignored rather than rejected.
///
/// Override precedence in synthesis: axes are applied in declaration order
/// and a later axis's override wins on conflict.
pub fn resolve_variant(product: &Product, selected: &SelectedOptions) -> Option<ResolvedVariant> {
    // Gate: every required axis must have a selection.
    for name in product.required_option_names() {
        if !selected.contains_key(name) {
            return None;
        }
    }

    // Restrict the selection to declared axes, in declaration order.
    let mut pairs: Vec<(String, String)> = Vec::new();
    for axis in &product.variant_options {
        if let Some(value) = selected.get(&axis.name) {
            pairs.push((axis.name.clone(), value.clone()));
        }
    }

    // Explicit variant list: stable-key lookup, first match wins.
    if !product.variants.is_empty() {
        let selection_key = combination_key(&pairs);
        if let Some(variant) = product
            .variants
            .iter()
            .find(|v| combination_key(&v.option_values) == selection_key)
        {
            return Some(resolve_explicit(product, variant, &pairs));
        }
    }

    Some(synthesize(product, &pairs))
}

fn resolve_explicit(
    product: &Product,
    variant: &ProductVariant,
    pairs: &[(String, String)],
) -> ResolvedVariant {
    ResolvedVariant {
        id: variant.id.clone(),
        sku: variant.sku.clone(),
        price: variant.price,
        image: variant
            .image
            .clone()
            .or_else(|| product.primary_image().map(String::from)),
        available: variant.available && values_available(product, pairs),
        option_values: pairs.to_vec(),
    }
}

/// Build a variant from the base product plus per-value overrides.
fn synthesize(product: &Product, pairs: &[(String, String)]) -> ResolvedVariant {
    let mut price = product.price;
    let mut sku = product.sku.clone();
    let mut image = product.primary_image().map(String::from);

    // Declaration order; a later axis's override replaces an earlier one's.
    for axis in &product.variant_options {
        let Some((_, selected_value)) = pairs.iter().find(|(name, _)| name == &axis.name) else {
            continue;
        };
        let Some(value) = axis.value(selected_value) else {
            continue;
        };
        if let Some(cents) = value.price_cents {
            price = Money::new(cents, product.price.currency);
        }
        if let Some(ref s) = value.sku {
            sku = s.clone();
        }
        if let Some(ref img) = value.image {
            image = Some(img.clone());
        }
    }

    let mut values: Vec<&str> = pairs.iter().map(|(_, v)| v.as_str()).collect();
    values.sort();
    let id = format!("{}-{}", product.id, values.join("-"));

    ResolvedVariant {
        id: VariantId::new(id),
        sku,
        price,
        image,
        available: product.in_stock && values_available(product, pairs),
        option_values: pairs.to_vec(),
    }
}

/// Every selected value that the product declares must be orderable.
fn values_available(product: &Product, pairs: &[(String, String)]) -> bool {
    pairs.iter().all(|(name, value)| {
        product
            .variant_options
            .iter()
            .find(|a| &a.name == name)
            .and_then(|a| a.value(value))
            .map(|v| v.available)
            // Undeclared values carry no availability signal; don't block.
            .unwrap_or(true)
    })
}
