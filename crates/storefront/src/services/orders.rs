//! Order history service.

use tracing::info;

use penny_black_core::{OrderId, OrderStatus, UserId};

use crate::error::Result;
use crate::models::order::Order;
use crate::storage::{KeyValueStore, keys};

/// Errors from order lookups and status changes.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No order with the given id in this user's history.
    #[error("order {0} not found")]
    UnknownOrder(OrderId),

    /// The requested status change is not an allowed transition.
    #[error("order cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
}

/// Per-user order history, newest order first.
pub struct OrderService<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> OrderService<'a> {
    /// Create an order service over a store.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All orders for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored history cannot be read.
    pub fn list(&self, user: UserId) -> Result<Vec<Order>> {
        Ok(self.store.get(&keys::orders(user))?.unwrap_or_default())
    }

    /// One order by id.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnknownOrder`] if the id is not in the
    /// user's history.
    pub fn get(&self, user: UserId, id: &OrderId) -> Result<Order> {
        self.list(user)?
            .into_iter()
            .find(|order| &order.id == id)
            .ok_or_else(|| OrderError::UnknownOrder(id.clone()).into())
    }

    /// Prepend a freshly placed order to the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted.
    pub fn record(&self, user: UserId, order: &Order) -> Result<()> {
        let mut orders = self.list(user)?;
        orders.insert(0, order.clone());
        self.store.put(&keys::orders(user), &orders)?;
        Ok(())
    }

    /// Move an order to a new status, enforcing the allowed transitions.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnknownOrder`] for a missing id and
    /// [`OrderError::InvalidTransition`] for a disallowed move; the
    /// stored history is untouched on failure.
    pub fn set_status(&self, user: UserId, id: &OrderId, next: OrderStatus) -> Result<Order> {
        let mut orders = self.list(user)?;
        let order = orders
            .iter_mut()
            .find(|order| &order.id == id)
            .ok_or_else(|| OrderError::UnknownOrder(id.clone()))?;

        if !order.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: next,
            }
            .into());
        }

        let from = order.status;
        order.status = next;
        let updated = order.clone();
        self.store.put(&keys::orders(user), &orders)?;

        info!(order = %updated.id, user = %user, %from, to = %next, "order status changed");
        Ok(updated)
    }
}
