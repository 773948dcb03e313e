//! Checkout module.
//!
//! Total computation and payment-session request construction.

mod session;
mod totals;

pub use session::{CheckoutDraft, CheckoutSessionRequest, SessionItem};
pub use totals::{order_total, InsuranceTier, PaymentMethod};
