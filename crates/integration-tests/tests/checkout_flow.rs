//! End-to-end checkout flows against seeded in-memory state.

use penny_black_core::{ItemId, Money, OrderStatus, PaymentMethod, TransactionKind};
use penny_black_integration_tests::{signed_in_customer, test_address};
use penny_black_storefront::AppError;
use penny_black_storefront::services::auth::AuthError;
use penny_black_storefront::services::checkout::CheckoutError;
use penny_black_storefront::services::wallet::WalletError;

// Sample catalog prices used below: item 2 is Rs.15, item 4 is Rs.25.

#[test]
fn wallet_checkout_end_to_end() {
    let (state, user) = signed_in_customer();

    state.carts().add(ItemId::new(2), 2).expect("add stamps");
    state.carts().add(ItemId::new(4), 1).expect("add one more");
    state
        .wallet()
        .deposit(user.id, Money::rupees(500))
        .expect("fund wallet");

    let order = state
        .checkout()
        .place_order(user.id, test_address(), PaymentMethod::Wallet)
        .expect("place order");

    // 2 x 15 + 25 = 55 subtotal; 3 items ship for the Rs.25 floor.
    assert_eq!(order.totals.subtotal, Money::rupees(55));
    assert_eq!(order.totals.shipping, Money::rupees(25));
    assert_eq!(order.totals.total, Money::rupees(80));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.payment_method, PaymentMethod::Wallet);
    assert!(order.id.as_str().starts_with("ORD-"));

    // Balance dropped by exactly the total.
    let account = state.wallet().account(user.id).expect("account");
    assert_eq!(account.balance, Money::rupees(420));

    // Exactly one purchase entry, negative, alongside the deposit.
    let ledger = state.wallet().transactions(user.id).expect("ledger");
    assert_eq!(ledger.len(), 2);
    let purchase = ledger.last().expect("purchase entry");
    assert_eq!(purchase.kind, TransactionKind::Purchase);
    assert_eq!(purchase.amount, Money::rupees(-80));
    assert!(purchase.description.contains(order.id.as_str()));

    // Cart cleared, order recorded.
    assert!(state.carts().current().expect("cart").is_empty());
    let orders = state.orders().list(user.id).expect("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders.first().expect("first").id, order.id);
}

#[test]
fn online_checkout_records_order_without_ledger_entry() {
    let (state, user) = signed_in_customer();
    state.carts().add(ItemId::new(5), 1).expect("add");

    let order = state
        .checkout()
        .place_order(user.id, test_address(), PaymentMethod::Online)
        .expect("place order");

    assert_eq!(order.payment_method, PaymentMethod::Online);
    assert!(state.wallet().transactions(user.id).expect("ledger").is_empty());
    assert_eq!(
        state.wallet().account(user.id).expect("account").balance,
        Money::rupees(0)
    );
    assert_eq!(state.orders().list(user.id).expect("orders").len(), 1);
}

#[test]
fn insufficient_balance_leaves_cart_and_wallet_untouched() {
    let (state, user) = signed_in_customer();

    state.carts().add(ItemId::new(1), 1).expect("add"); // Rs.200
    state
        .wallet()
        .deposit(user.id, Money::rupees(100))
        .expect("fund");

    let err = state
        .checkout()
        .place_order(user.id, test_address(), PaymentMethod::Wallet)
        .expect_err("should reject");
    assert!(matches!(
        err,
        AppError::Wallet(WalletError::InsufficientBalance { .. })
    ));

    assert_eq!(state.carts().current().expect("cart").item_count(), 1);
    assert_eq!(
        state.wallet().account(user.id).expect("account").balance,
        Money::rupees(100)
    );
    assert!(state.orders().list(user.id).expect("orders").is_empty());
}

#[test]
fn empty_cart_is_rejected_before_any_write() {
    let (state, user) = signed_in_customer();
    state
        .wallet()
        .deposit(user.id, Money::rupees(500))
        .expect("fund");

    let err = state
        .checkout()
        .place_order(user.id, test_address(), PaymentMethod::Wallet)
        .expect_err("empty cart");
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
    assert_eq!(
        state.wallet().account(user.id).expect("account").balance,
        Money::rupees(500)
    );
}

#[test]
fn orders_accumulate_newest_first() {
    let (state, user) = signed_in_customer();
    state
        .wallet()
        .deposit(user.id, Money::rupees(1_000))
        .expect("fund");

    state.carts().add(ItemId::new(2), 1).expect("add");
    state
        .checkout()
        .place_order(user.id, test_address(), PaymentMethod::Wallet)
        .expect("first order");

    state.carts().add(ItemId::new(4), 2).expect("add");
    let second = state
        .checkout()
        .place_order(user.id, test_address(), PaymentMethod::Wallet)
        .expect("second order");

    let orders = state.orders().list(user.id).expect("orders");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders.first().expect("newest").id, second.id);
}

#[test]
fn browsing_works_signed_out_but_the_wallet_does_not() {
    let state = penny_black_storefront::AppState::in_memory();

    // The cart is session-global and usable before sign-in.
    state.carts().add(ItemId::new(2), 1).expect("add");
    assert_eq!(state.carts().current().expect("cart").item_count(), 1);

    // Anything per-user requires a session.
    let err = state.auth().current_user().expect_err("signed out");
    assert!(matches!(err, AppError::Auth(AuthError::NotSignedIn)));
}
