//! Shipping address.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A delivery address.
///
/// Street, suburb, state, and postcode must all be non-empty before a quote
/// request is permitted. Country defaults to domestic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingAddress {
    /// Street address.
    pub street: String,
    /// Suburb / city.
    pub suburb: String,
    /// State or territory code (e.g., "NSW").
    pub state: String,
    /// Postcode.
    pub postcode: String,
    /// Country code.
    pub country: String,
}

impl ShippingAddress {
    pub fn new(
        street: impl Into<String>,
        suburb: impl Into<String>,
        state: impl Into<String>,
        postcode: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            suburb: suburb.into(),
            state: state.into(),
            postcode: postcode.into(),
            country: "AU".to_string(),
        }
    }

    /// Check that all four required fields are filled.
    pub fn is_complete(&self) -> bool {
        !self.street.trim().is_empty()
            && !self.suburb.trim().is_empty()
            && !self.state.trim().is_empty()
            && !self.postcode.trim().is_empty()
    }

    /// Validate for quoting; the error names the missing fields.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut missing = Vec::new();
        if self.street.trim().is_empty() {
            missing.push("street");
        }
        if self.suburb.trim().is_empty() {
            missing.push("suburb");
        }
        if self.state.trim().is_empty() {
            missing.push("state");
        }
        if self.postcode.trim().is_empty() {
            missing.push("postcode");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::IncompleteAddress(missing.join(", ")))
        }
    }

    /// Whether delivery is international.
    pub fn is_international(&self) -> bool {
        !self.country.eq_ignore_ascii_case("AU")
    }

    /// Format as a single display line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {} {} {}",
            self.street, self.suburb, self.state, self.postcode
        )
    }
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self {
            street: String::new(),
            suburb: String::new(),
            state: String::new(),
            postcode: String::new(),
            country: "AU".to_string(),
        }
    }
}
