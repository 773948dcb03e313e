//! Order total computation.
//!
//! Pure functions over integer cents. Percentage surcharges apply to the
//! goods subtotal only, never to shipping, and round once at application.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payment method, with its card-processing surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Direct deposit; no surcharge.
    #[default]
    BankTransfer,
    /// 2.5% surcharge.
    CreditCard,
    /// 3.5% surcharge.
    PayPal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank-transfer",
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::PayPal => "paypal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bank-transfer" => Some(PaymentMethod::BankTransfer),
            "credit-card" => Some(PaymentMethod::CreditCard),
            "paypal" => Some(PaymentMethod::PayPal),
            _ => None,
        }
    }

    /// Surcharge rate as a percentage of the goods subtotal.
    pub fn surcharge_percent(&self) -> f64 {
        match self {
            PaymentMethod::BankTransfer => 0.0,
            PaymentMethod::CreditCard => 2.5,
            PaymentMethod::PayPal => 3.5,
        }
    }
}

/// Optional transit-insurance add-on, a flat fee per order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InsuranceTier {
    #[default]
    None,
    /// Covers damage in transit up to $2,000.
    Standard,
    /// Covers damage and loss, full order value.
    Premium,
}

impl InsuranceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceTier::None => "none",
            InsuranceTier::Standard => "standard",
            InsuranceTier::Premium => "premium",
        }
    }

    /// Flat fee in cents.
    pub fn fee_cents(&self) -> i64 {
        match self {
            InsuranceTier::None => 0,
            InsuranceTier::Standard => 490,
            InsuranceTier::Premium => 1490,
        }
    }
}

/// Compute the order total.
///
/// `shipping` is the selected quote's price; `None` contributes zero (the
/// submit control is separately blocked until a quote is selected).
pub fn order_total(
    subtotal: Money,
    shipping: Option<Money>,
    method: PaymentMethod,
    insurance: InsuranceTier,
) -> Result<Money, CommerceError> {
    let currency = subtotal.currency;
    let shipping = shipping.unwrap_or_else(|| Money::zero(currency));
    let surcharge = subtotal.percentage(method.surcharge_percent());
    let insurance = Money::new(insurance.fee_cents(), currency);

    subtotal
        .try_add(&shipping)
        .and_then(|t| t.try_add(&surcharge))
        .and_then(|t| t.try_add(&insurance))
        .ok_or(CommerceError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn aud(cents: i64) -> Money {
        Money::new(cents, Currency::AUD)
    }

    #[test]
    fn test_credit_card_surcharge_on_subtotal_only() {
        // $100 goods + $10 shipping + 2.5% of $100 = $112.50
        let total = order_total(
            aud(10000),
            Some(aud(1000)),
            PaymentMethod::CreditCard,
            InsuranceTier::None,
        )
        .unwrap();
        assert_eq!(total.amount_cents, 11250);
        assert_eq!(total.display(), "$112.50");
    }

    #[test]
    fn test_paypal_surcharge() {
        let total = order_total(
            aud(10000),
            None,
            PaymentMethod::PayPal,
            InsuranceTier::None,
        )
        .unwrap();
        assert_eq!(total.amount_cents, 10350);
    }

    #[test]
    fn test_no_shipping_contributes_zero() {
        let total = order_total(
            aud(5000),
            None,
            PaymentMethod::BankTransfer,
            InsuranceTier::None,
        )
        .unwrap();
        assert_eq!(total.amount_cents, 5000);
    }

    #[test]
    fn test_insurance_is_flat_fee() {
        let total = order_total(
            aud(10000),
            Some(aud(1500)),
            PaymentMethod::BankTransfer,
            InsuranceTier::Premium,
        )
        .unwrap();
        assert_eq!(total.amount_cents, 10000 + 1500 + 1490);
    }

    #[test]
    fn test_surcharge_rounds_to_nearest_cent() {
        // 2.5% of $33.33 = 83.325c -> 83c
        let total = order_total(
            aud(3333),
            None,
            PaymentMethod::CreditCard,
            InsuranceTier::None,
        )
        .unwrap();
        assert_eq!(total.amount_cents, 3333 + 83);
    }

    #[test]
    fn test_payment_method_round_trip() {
        assert_eq!(
            PaymentMethod::from_str("credit-card"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(PaymentMethod::from_str("cash"), None);
    }
}
