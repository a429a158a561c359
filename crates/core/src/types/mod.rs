//! Core types for Penny Black.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use contact::{Phone, PhoneError, Pincode, PincodeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Currency, Money, MoneyError};
pub use status::*;
