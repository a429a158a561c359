//! Integration tests for Penny Black.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p penny-black-integration-tests
//! ```
//!
//! Everything runs hermetically: state is the in-memory store (or a
//! temporary directory for the durability tests) plus the sample
//! catalog. No servers, no fixtures.
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to order, both payment methods
//! - `wallet_ledger` - Deposit/debit properties of the ledger
//! - `order_lifecycle` - Status transitions and the admin gate
//! - `store_durability` - File-backed persistence across reopens

#![cfg_attr(not(test), forbid(unsafe_code))]

use penny_black_core::Role;
use penny_black_storefront::AppState;
use penny_black_storefront::models::order::ShippingAddress;
use penny_black_storefront::models::user::User;

/// Demo customer credentials shared by the tests.
pub const CUSTOMER_EMAIL: &str = "asha@example.in";
/// Demo customer password.
pub const CUSTOMER_PASSWORD: &str = "penny-red-1841";

/// Fresh in-memory state with a registered, signed-in customer.
#[must_use]
pub fn signed_in_customer() -> (AppState, User) {
    let state = AppState::in_memory();
    let user = state
        .auth()
        .register("Asha Venkatesan", CUSTOMER_EMAIL, CUSTOMER_PASSWORD)
        .expect("register demo customer");
    state
        .auth()
        .login(CUSTOMER_EMAIL, CUSTOMER_PASSWORD)
        .expect("sign in demo customer");
    (state, user)
}

/// Fresh in-memory state with a customer account and a signed-in admin.
///
/// Returns `(state, customer, admin)`; the active session belongs to
/// the admin.
#[must_use]
pub fn signed_in_admin() -> (AppState, User, User) {
    let state = AppState::in_memory();
    let customer = state
        .auth()
        .register("Asha Venkatesan", CUSTOMER_EMAIL, CUSTOMER_PASSWORD)
        .expect("register demo customer");
    let admin = state
        .auth()
        .create_user("Store Admin", "admin@pennyblack.in", "inverted-jenny", Role::Admin)
        .expect("create admin");
    state
        .auth()
        .login("admin@pennyblack.in", "inverted-jenny")
        .expect("sign in admin");
    (state, customer, admin)
}

/// The delivery address used across tests.
#[must_use]
pub fn test_address() -> ShippingAddress {
    ShippingAddress::new(
        "Asha Venkatesan",
        "12 Marine Drive",
        None,
        "Mumbai",
        "Maharashtra",
        "400002",
        "9876543210",
    )
    .expect("test address is valid")
}
