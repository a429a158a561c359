//! Cart persistence service.

use penny_black_core::ItemId;
use tracing::debug;

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::models::cart::{Cart, CartCommand};
use crate::storage::{KeyValueStore, keys};
use crate::totals::OrderTotals;

/// Loads the cart, applies commands, and persists the whole snapshot
/// back on every successful mutation.
pub struct CartService<'a> {
    store: &'a dyn KeyValueStore,
    catalog: &'a CatalogStore,
}

impl<'a> CartService<'a> {
    /// Create a cart service over a store and catalog.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore, catalog: &'a CatalogStore) -> Self {
        Self { store, catalog }
    }

    /// The current cart; absent storage means an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored snapshot cannot be read.
    pub fn current(&self) -> Result<Cart> {
        Ok(self.store.get(keys::CART)?.unwrap_or_default())
    }

    /// Apply one command and persist the resulting snapshot.
    ///
    /// A rejected command (unknown item, insufficient stock) leaves the
    /// persisted cart exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns cart or storage errors.
    pub fn apply(&self, command: CartCommand) -> Result<Cart> {
        let cart = self.current()?;
        let next = cart.apply(command, self.catalog)?;
        self.store.put(keys::CART, &next)?;
        debug!(lines = next.lines.len(), items = next.item_count(), "cart updated");
        Ok(next)
    }

    /// Merge `quantity` units of an item into the cart.
    ///
    /// # Errors
    ///
    /// Returns cart or storage errors.
    pub fn add(&self, item_id: ItemId, quantity: u32) -> Result<Cart> {
        self.apply(CartCommand::Add { item_id, quantity })
    }

    /// Set the quantity of an existing line (clamped to stock; zero or
    /// less removes the line).
    ///
    /// # Errors
    ///
    /// Returns cart or storage errors.
    pub fn update(&self, item_id: ItemId, quantity: i64) -> Result<Cart> {
        self.apply(CartCommand::Update { item_id, quantity })
    }

    /// Drop a line.
    ///
    /// # Errors
    ///
    /// Returns cart or storage errors.
    pub fn remove(&self, item_id: ItemId) -> Result<Cart> {
        self.apply(CartCommand::Remove { item_id })
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns cart or storage errors.
    pub fn clear(&self) -> Result<Cart> {
        self.apply(CartCommand::Clear)
    }

    /// Totals for the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns storage or arithmetic errors.
    pub fn totals(&self) -> Result<OrderTotals> {
        Ok(OrderTotals::compute(&self.current()?)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::cart::CartError;
    use crate::storage::MemoryStore;
    use penny_black_core::Money;

    fn fixtures() -> (MemoryStore, CatalogStore) {
        (MemoryStore::new(), CatalogStore::sample())
    }

    #[test]
    fn test_mutations_persist_whole_snapshots() {
        let (store, catalog) = fixtures();
        let carts = CartService::new(&store, &catalog);

        carts.add(ItemId::new(2), 2).unwrap();
        carts.add(ItemId::new(4), 1).unwrap();

        // A fresh service over the same store sees the persisted cart.
        let reloaded = CartService::new(&store, &catalog).current().unwrap();
        assert_eq!(reloaded.lines.len(), 2);
        assert_eq!(reloaded.item_count(), 3);
    }

    #[test]
    fn test_rejected_add_leaves_snapshot_untouched() {
        let (store, catalog) = fixtures();
        let carts = CartService::new(&store, &catalog);

        carts.add(ItemId::new(10), 3).unwrap(); // stock is exactly 3
        let err = carts.add(ItemId::new(10), 1).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Cart(CartError::InsufficientStock { .. })
        ));

        assert_eq!(carts.current().unwrap().item_count(), 3);
    }

    #[test]
    fn test_removing_last_line_persists_an_empty_cart() {
        let (store, catalog) = fixtures();
        let carts = CartService::new(&store, &catalog);

        carts.add(ItemId::new(2), 1).unwrap();
        carts.remove(ItemId::new(2)).unwrap();

        assert!(carts.current().unwrap().is_empty());
        // The key holds an explicit empty cart, not nothing.
        let raw = store.read(keys::CART).unwrap().unwrap();
        assert_eq!(raw, r#"{"lines":[]}"#);
    }

    #[test]
    fn test_totals_follow_the_current_cart() {
        let (store, catalog) = fixtures();
        let carts = CartService::new(&store, &catalog);

        assert_eq!(carts.totals().unwrap().total, Money::rupees(0));

        carts.add(ItemId::new(2), 2).unwrap(); // 2 x Rs.15
        let totals = carts.totals().unwrap();
        assert_eq!(totals.subtotal, Money::rupees(30));
        assert_eq!(totals.shipping, Money::rupees(25));
        assert_eq!(totals.total, Money::rupees(55));
    }
}
