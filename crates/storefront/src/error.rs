//! Unified error handling.
//!
//! Every failure a surface can see is an `AppError`. Callers that talk
//! to people (the CLI, or anything rendering notifications) use
//! [`AppError::user_message`], which maps each failure to the short
//! transient text the shopper should see and keeps internal detail
//! (storage paths, serde messages) out of it. The structured error
//! remains available for logs.

use thiserror::Error;

use penny_black_core::MoneyError;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::models::cart::CartError;
use crate::models::order::AddressError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::orders::OrderError;
use crate::services::wallet::WalletError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage read/write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Money arithmetic failed.
    #[error("money error: {0}")]
    Money(#[from] MoneyError),

    /// Catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation rejected.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Shipping address failed validation.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Wallet operation rejected.
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Order lookup or status change rejected.
    #[error("order error: {0}")]
    Order(#[from] OrderError),

    /// Checkout precondition failed.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// The transient, user-facing line for this failure.
    ///
    /// Internal failures (storage, hashing, arithmetic) all collapse to
    /// the same generic sentence; everything actionable names what the
    /// user can fix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Money(_) | Self::Config(_) => {
                "Something went wrong. Please try again.".to_owned()
            }
            Self::Catalog(CatalogError::UnknownItem(_)) => {
                "That item is not in the catalogue.".to_owned()
            }
            Self::Cart(err) => match err {
                CartError::Catalog(_) => "That item is not in the catalogue.".to_owned(),
                CartError::InsufficientStock {
                    title, available, ..
                } => {
                    format!("Only {available} of \"{title}\" left in stock.")
                }
                CartError::LineNotFound(_) => "That item is not in your cart.".to_owned(),
            },
            Self::Address(err) => match err {
                AddressError::MissingField(field) => format!("Please fill in the {field}."),
                AddressError::Phone(_) => "Enter a valid 10-digit mobile number.".to_owned(),
                AddressError::Pincode(_) => "Enter a valid 6-digit PIN code.".to_owned(),
            },
            Self::Wallet(err) => match err {
                WalletError::InvalidDepositAmount { min, max } => {
                    format!("Deposits must be between {min} and {max}.")
                }
                WalletError::InsufficientBalance { .. } => {
                    "Insufficient wallet balance. Add money or pay online.".to_owned()
                }
            },
            Self::Order(err) => match err {
                OrderError::UnknownOrder(_) => "Order not found.".to_owned(),
                OrderError::InvalidTransition { to, .. } => {
                    format!("This order cannot be marked {to}.")
                }
            },
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty.".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "Enter a valid email address.".to_owned(),
                AuthError::InvalidCredentials => "Invalid email or password.".to_owned(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists.".to_owned()
                }
                AuthError::WeakPassword(msg) => format!("{msg}."),
                AuthError::EmptyName => "Please enter a name.".to_owned(),
                AuthError::PasswordHash => "Something went wrong. Please try again.".to_owned(),
                AuthError::NotSignedIn => "Sign in to continue.".to_owned(),
                AuthError::Forbidden => "You do not have permission to do that.".to_owned(),
            },
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
