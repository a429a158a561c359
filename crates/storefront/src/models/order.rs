//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use penny_black_core::{
    OrderId, OrderStatus, PaymentMethod, Phone, PhoneError, Pincode, PincodeError,
};

use crate::models::cart::CartLine;
use crate::totals::OrderTotals;

/// Errors from shipping-address validation.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// A required field was left blank.
    #[error("missing {0}")]
    MissingField(&'static str),

    /// The contact number failed validation.
    #[error(transparent)]
    Phone(#[from] PhoneError),

    /// The PIN code failed validation.
    #[error(transparent)]
    Pincode(#[from] PincodeError),
}

/// A validated delivery address.
///
/// Construct through [`ShippingAddress::new`], which is the checkout
/// form's validation: required fields non-blank, phone and PIN code
/// pattern-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name.
    pub full_name: String,
    /// Street address.
    pub line1: String,
    /// Apartment / landmark, optional.
    pub line2: Option<String>,
    /// City or town.
    pub city: String,
    /// State or union territory.
    pub state: String,
    /// Six-digit postal PIN code.
    pub pincode: Pincode,
    /// Ten-digit contact number.
    pub phone: Phone,
}

impl ShippingAddress {
    /// Validate raw form fields into an address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] naming the first field that failed.
    pub fn new(
        full_name: &str,
        line1: &str,
        line2: Option<&str>,
        city: &str,
        state: &str,
        pincode: &str,
        phone: &str,
    ) -> Result<Self, AddressError> {
        Ok(Self {
            full_name: required("full name", full_name)?,
            line1: required("address line", line1)?,
            line2: line2
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned),
            city: required("city", city)?,
            state: required("state", state)?,
            pincode: Pincode::parse(pincode)?,
            phone: Phone::parse(phone)?,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, AddressError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AddressError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// A recorded order.
///
/// Everything except `status` is a snapshot frozen at checkout: the
/// lines, address, and totals stay as the shopper confirmed them even as
/// the catalog moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Client-generated `ORD-<millis>` id.
    pub id: OrderId,
    /// Cart lines at checkout.
    pub items: Vec<CartLine>,
    /// Delivery address at checkout.
    pub address: ShippingAddress,
    /// Computed totals at checkout.
    pub totals: OrderTotals,
    /// How the order was paid.
    pub payment_method: PaymentMethod,
    /// Lifecycle status; the only mutable field.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_address_accepts_complete_input() {
        let address = ShippingAddress::new(
            "Meera Pillai",
            "14 Mint Street",
            Some("Near GPO"),
            "Chennai",
            "Tamil Nadu",
            "600001",
            "+91 98765 43210",
        )
        .unwrap();
        assert_eq!(address.pincode.as_str(), "600001");
        assert_eq!(address.phone.as_str(), "9876543210");
        assert_eq!(address.line2.as_deref(), Some("Near GPO"));
    }

    #[test]
    fn test_address_blank_line2_becomes_none() {
        let address = ShippingAddress::new(
            "Meera Pillai",
            "14 Mint Street",
            Some("   "),
            "Chennai",
            "Tamil Nadu",
            "600001",
            "9876543210",
        )
        .unwrap();
        assert_eq!(address.line2, None);
    }

    #[test]
    fn test_address_rejects_blank_required_fields() {
        let err = ShippingAddress::new(
            "  ",
            "14 Mint Street",
            None,
            "Chennai",
            "Tamil Nadu",
            "600001",
            "9876543210",
        )
        .unwrap_err();
        assert_eq!(err, AddressError::MissingField("full name"));
    }

    #[test]
    fn test_address_rejects_bad_pincode_and_phone() {
        let err = ShippingAddress::new(
            "Meera",
            "14 Mint Street",
            None,
            "Chennai",
            "Tamil Nadu",
            "60001",
            "9876543210",
        )
        .unwrap_err();
        assert!(matches!(err, AddressError::Pincode(_)));

        let err = ShippingAddress::new(
            "Meera",
            "14 Mint Street",
            None,
            "Chennai",
            "Tamil Nadu",
            "600001",
            "12345",
        )
        .unwrap_err();
        assert!(matches!(err, AddressError::Phone(_)));
    }
}
