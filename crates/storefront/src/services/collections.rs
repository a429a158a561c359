//! Personal collection service.
//!
//! Collectors keep a per-user set of catalog items ("my collection"),
//! stored as a list of item ids.

use tracing::debug;

use penny_black_core::{ItemId, UserId};

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::storage::{KeyValueStore, keys};

/// Per-user collection of catalog item ids.
pub struct CollectionService<'a> {
    store: &'a dyn KeyValueStore,
    catalog: &'a CatalogStore,
}

impl<'a> CollectionService<'a> {
    /// Create a collection service over a store and catalog.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore, catalog: &'a CatalogStore) -> Self {
        Self { store, catalog }
    }

    /// The user's collection in the order items were added.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be read.
    pub fn list(&self, user: UserId) -> Result<Vec<ItemId>> {
        Ok(self.store.get(&keys::collections(user))?.unwrap_or_default())
    }

    /// Add an item to the collection. Adding an item twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a catalog error for unknown items.
    pub fn add(&self, user: UserId, item_id: ItemId) -> Result<Vec<ItemId>> {
        self.catalog.get(item_id)?;

        let mut items = self.list(user)?;
        if !items.contains(&item_id) {
            items.push(item_id);
            self.store.put(&keys::collections(user), &items)?;
            debug!(user = %user, item = %item_id, "added to collection");
        }
        Ok(items)
    }

    /// Remove an item from the collection. Removing an absent item is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn remove(&self, user: UserId, item_id: ItemId) -> Result<Vec<ItemId>> {
        let mut items = self.list(user)?;
        items.retain(|id| *id != item_id);
        self.store.put(&keys::collections(user), &items)?;
        Ok(items)
    }
}
