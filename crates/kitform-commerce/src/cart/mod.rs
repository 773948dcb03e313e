//! Shopping cart module.
//!
//! The owned session cart, its line items, and the shipping address.

mod address;
mod store;

pub use address::ShippingAddress;
pub use store::{CartLineItem, CartStore, MAX_QUANTITY_PER_ITEM};
