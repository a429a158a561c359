//! Order status lifecycle and the admin gate.

use penny_black_core::{ItemId, Money, OrderStatus, PaymentMethod};
use penny_black_integration_tests::{
    CUSTOMER_EMAIL, CUSTOMER_PASSWORD, signed_in_admin, test_address,
};
use penny_black_storefront::AppError;
use penny_black_storefront::services::AuthService;
use penny_black_storefront::services::auth::AuthError;
use penny_black_storefront::services::orders::OrderError;

#[test]
fn admin_walks_an_order_to_delivery() {
    let (state, customer, _admin) = signed_in_admin();

    // The customer shops in their own session first.
    state
        .auth()
        .login(CUSTOMER_EMAIL, CUSTOMER_PASSWORD)
        .expect("customer session");
    state.carts().add(ItemId::new(2), 1).expect("add");
    state
        .wallet()
        .deposit(customer.id, Money::rupees(100))
        .expect("fund");
    let order = state
        .checkout()
        .place_order(customer.id, test_address(), PaymentMethod::Wallet)
        .expect("order");

    let shipped = state
        .orders()
        .set_status(customer.id, &order.id, OrderStatus::Shipped)
        .expect("ship");
    assert_eq!(shipped.status, OrderStatus::Shipped);

    let delivered = state
        .orders()
        .set_status(customer.id, &order.id, OrderStatus::Delivered)
        .expect("deliver");
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // Delivered is terminal.
    let err = state
        .orders()
        .set_status(customer.id, &order.id, OrderStatus::Cancelled)
        .expect_err("terminal");
    assert!(matches!(
        err,
        AppError::Order(OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Cancelled,
        })
    ));
}

#[test]
fn skipping_straight_to_delivered_is_rejected() {
    let (state, customer, _admin) = signed_in_admin();
    state.carts().add(ItemId::new(2), 1).expect("add");
    let order = state
        .checkout()
        .place_order(customer.id, test_address(), PaymentMethod::Online)
        .expect("order");

    let err = state
        .orders()
        .set_status(customer.id, &order.id, OrderStatus::Delivered)
        .expect_err("no skipping");
    assert!(matches!(
        err,
        AppError::Order(OrderError::InvalidTransition { .. })
    ));

    // The stored order is unchanged.
    assert_eq!(
        state
            .orders()
            .get(customer.id, &order.id)
            .expect("order")
            .status,
        OrderStatus::Processing
    );
}

#[test]
fn cancellation_is_allowed_until_delivery() {
    let (state, customer, _admin) = signed_in_admin();

    state.carts().add(ItemId::new(4), 1).expect("add");
    let first = state
        .checkout()
        .place_order(customer.id, test_address(), PaymentMethod::Online)
        .expect("order");
    state
        .orders()
        .set_status(customer.id, &first.id, OrderStatus::Cancelled)
        .expect("cancel from processing");

    state.carts().add(ItemId::new(4), 1).expect("add");
    let second = state
        .checkout()
        .place_order(customer.id, test_address(), PaymentMethod::Online)
        .expect("order");
    state
        .orders()
        .set_status(customer.id, &second.id, OrderStatus::Shipped)
        .expect("ship");
    state
        .orders()
        .set_status(customer.id, &second.id, OrderStatus::Cancelled)
        .expect("cancel from shipped");
}

#[test]
fn the_admin_gate_is_role_based() {
    let (state, customer, admin) = signed_in_admin();

    assert!(AuthService::require_admin(&admin).is_ok());
    assert!(matches!(
        AuthService::require_admin(&customer),
        Err(AuthError::Forbidden)
    ));

    // Unknown orders surface as such, not as silent no-ops.
    let err = state
        .orders()
        .set_status(
            customer.id,
            &penny_black_core::OrderId::from("ORD-404"),
            OrderStatus::Shipped,
        )
        .expect_err("unknown order");
    assert!(matches!(err, AppError::Order(OrderError::UnknownOrder(_))));
}
