//! Storefront domain types and logic for kitform.
//!
//! This crate is the pure-domain half of the storefront:
//!
//! - **Catalog**: static product fixtures, option axes, variant resolution
//! - **Cart**: the owned session cart with derived totals and quote state
//! - **Wizard**: the 4-step build-enquiry form state machine
//! - **Checkout**: order totals and payment-session request construction
//!
//! All network I/O lives behind traits ([`shipping::QuoteService`],
//! [`wizard::EnquirySink`]) implemented by the gateway crate, so everything
//! here is synchronously testable with in-memory fakes.
//!
//! # Example
//!
//! ```rust,ignore
//! use kitform_commerce::prelude::*;
//!
//! let catalog = Catalog::with_fixtures();
//! let kit = catalog.by_slug("classic-4-module").unwrap();
//!
//! let mut selection = SelectedOptions::new();
//! selection.insert("finish".into(), "stainless".into());
//! let variant = resolve_variant(kit, &selection).unwrap();
//!
//! let mut cart = CartStore::new();
//! cart.add_item(CartLineItem::new(
//!     variant.id.as_str(),
//!     kit.name.clone(),
//!     variant.price,
//! ))?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod shipping;
pub mod wizard;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        resolve_variant, AxisValue, Catalog, Dimensions, Product, ProductKind, ProductVariant,
        ResolvedVariant, SelectedOptions, ShipClass, VariantAxis,
    };

    // Cart
    pub use crate::cart::{CartLineItem, CartStore, ShippingAddress, MAX_QUANTITY_PER_ITEM};

    // Shipping
    pub use crate::shipping::{QuoteRequestOptions, QuoteService, ShippingQuote};

    // Checkout
    pub use crate::checkout::{
        order_total, CheckoutDraft, CheckoutSessionRequest, InsuranceTier, PaymentMethod,
        SessionItem,
    };

    // Wizard
    pub use crate::wizard::{
        BaseKit, Budget, BuildEnquiry, BuildWizard, EnquirySink, Finish, FridgeType,
        InstallationPreference, ProjectType, Timeline, WizardPhase, WizardStep,
    };
}
