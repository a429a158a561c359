//! Contact detail types for shipping addresses.
//!
//! Checkout validates the phone number and PIN code before an order can be
//! constructed, so both are parse-validated newtypes rather than raw
//! strings on the address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The number is not ten digits after stripping any country prefix.
    #[error("phone number must be 10 digits")]
    WrongLength,
    /// The number does not start with a valid Indian mobile digit.
    #[error("phone number must start with 6, 7, 8 or 9")]
    InvalidLeadingDigit,
    /// The input contains something other than digits and separators.
    #[error("phone number contains invalid characters")]
    InvalidCharacter,
}

/// An Indian mobile number: ten digits, leading digit 6-9.
///
/// Parsing is forgiving about how people type numbers: spaces and dashes
/// are ignored, and a `+91`, `91` or leading-zero trunk prefix is
/// stripped. The stored form is always the bare ten digits.
///
/// ## Examples
///
/// ```
/// use penny_black_core::Phone;
///
/// let phone = Phone::parse("+91 98765 43210").unwrap();
/// assert_eq!(phone.as_str(), "9876543210");
/// assert!(Phone::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from user input.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] describing the first failed check.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let stripped = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let mut digits = String::with_capacity(stripped.len());
        for c in stripped.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c != ' ' && c != '-' {
                return Err(PhoneError::InvalidCharacter);
            }
        }

        // Strip the country code or trunk zero people habitually include.
        let digits = digits
            .strip_prefix("91")
            .filter(|rest| rest.len() == 10)
            .or_else(|| digits.strip_prefix('0').filter(|rest| rest.len() == 10))
            .unwrap_or(&digits);

        if digits.len() != 10 {
            return Err(PhoneError::WrongLength);
        }
        if !matches!(digits.chars().next(), Some('6'..='9')) {
            return Err(PhoneError::InvalidLeadingDigit);
        }

        Ok(Self(digits.to_owned()))
    }

    /// Returns the bare ten-digit number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a [`Pincode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    /// The input string is empty.
    #[error("PIN code cannot be empty")]
    Empty,
    /// The code is not exactly six digits.
    #[error("PIN code must be 6 digits")]
    WrongLength,
    /// The code contains a non-digit character.
    #[error("PIN code must contain only digits")]
    InvalidCharacter,
    /// Indian PIN codes never start with zero.
    #[error("PIN code cannot start with 0")]
    LeadingZero,
}

/// An Indian postal PIN code: six digits, leading digit 1-9.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Parse a `Pincode` from user input.
    ///
    /// # Errors
    ///
    /// Returns a [`PincodeError`] describing the first failed check.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PincodeError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(PincodeError::InvalidCharacter);
        }
        if trimmed.len() != 6 {
            return Err(PincodeError::WrongLength);
        }
        if trimmed.starts_with('0') {
            return Err(PincodeError::LeadingZero);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the six-digit code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Pincode {
    type Err = PincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
