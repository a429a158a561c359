//! Checkout: turn the cart into an order.

use std::time::Duration;

use chrono::Utc;
use tracing::info;

use penny_black_core::{OrderId, OrderStatus, PaymentMethod, UserId};

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::models::order::{Order, ShippingAddress};
use crate::services::cart::CartService;
use crate::services::orders::OrderService;
use crate::services::wallet::WalletService;
use crate::storage::KeyValueStore;
use crate::totals::OrderTotals;

/// Errors specific to checkout.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// Builds and records orders from the current cart.
pub struct CheckoutService<'a> {
    store: &'a dyn KeyValueStore,
    catalog: &'a CatalogStore,
    delay: Duration,
}

impl<'a> CheckoutService<'a> {
    /// Create a checkout service. `delay` simulates payment-gateway
    /// latency and is zero in tests.
    #[must_use]
    pub const fn new(
        store: &'a dyn KeyValueStore,
        catalog: &'a CatalogStore,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            catalog,
            delay,
        }
    }

    /// Place an order for the current cart contents.
    ///
    /// Wallet payments debit the deposit account for the grand total
    /// before the order is written; an insufficient balance aborts the
    /// whole checkout with nothing persisted. Online payment is a
    /// placeholder that records the order without a ledger entry.
    ///
    /// Once the wallet debit lands there is no rollback path: the order
    /// write and cart clear are treated as already committed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`], wallet errors, or storage
    /// errors.
    pub fn place_order(
        &self,
        user: UserId,
        address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order> {
        let carts = CartService::new(self.store, self.catalog);
        let cart = carts.current()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }

        let totals = OrderTotals::compute(&cart)?;

        // Simulated gateway latency.
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let placed_at = Utc::now();
        let id = OrderId::generate(placed_at);

        if payment_method == PaymentMethod::Wallet {
            WalletService::new(self.store).debit(user, totals.total, format!("Order {id}"))?;
        }

        let order = Order {
            id,
            items: cart.lines,
            address,
            totals,
            payment_method,
            status: OrderStatus::Processing,
            created_at: placed_at,
        };

        OrderService::new(self.store).record(user, &order)?;
        carts.clear()?;

        info!(
            order = %order.id,
            user = %user,
            total = %totals.total,
            method = %payment_method,
            "order placed"
        );
        Ok(order)
    }
}
