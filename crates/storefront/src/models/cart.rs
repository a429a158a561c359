//! Cart domain types and mutation rules.
//!
//! Cart mutations are a tagged union of commands applied by a pure
//! transition function: [`Cart::apply`] takes the current cart and a
//! [`CartCommand`] and returns the next cart without touching storage or
//! any UI concern. The service layer persists whatever `apply` returns;
//! a rejected command therefore never leaves a half-written snapshot.

use serde::{Deserialize, Serialize};

use penny_black_core::{ItemId, Money};

use crate::catalog::{CatalogError, CatalogItem, CatalogStore};

/// Errors from cart mutations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The referenced catalog item does not exist.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The requested quantity exceeds what is in stock.
    #[error("requested {requested} of \"{title}\" but only {available} in stock")]
    InsufficientStock {
        /// Item that ran short.
        item_id: ItemId,
        /// Item title, for the user-facing message.
        title: String,
        /// Quantity the cart would have held.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// The command targets an item that is not in the cart.
    #[error("item {0} is not in the cart")]
    LineNotFound(ItemId),
}

/// One cart row: a snapshot of a catalog item plus a quantity.
///
/// The title and unit price are copied at add time so the cart keeps
/// displaying what the shopper saw even if the catalog changes under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog item this line references.
    pub item_id: ItemId,
    /// Title at add time.
    pub title: String,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Units in the cart; always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn snapshot(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            item_id: item.id,
            title: item.title.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    /// Price of the whole line (`unit_price` x `quantity`).
    ///
    /// # Errors
    ///
    /// Returns [`penny_black_core::MoneyError::Overflow`] on overflow.
    pub fn line_total(&self) -> Result<Money, penny_black_core::MoneyError> {
        self.unit_price.checked_mul_units(self.quantity)
    }
}

/// A cart: an ordered list of lines, unique per catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
}

/// A requested cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Merge `quantity` units of an item into the cart.
    Add {
        /// Item to add.
        item_id: ItemId,
        /// Units to add.
        quantity: u32,
    },
    /// Set the quantity of an existing line. A requested quantity of
    /// zero or less removes the line; anything above stock is clamped.
    Update {
        /// Line to change.
        item_id: ItemId,
        /// Requested quantity (may be non-positive).
        quantity: i64,
    },
    /// Drop a line. Dropping an absent line is a no-op.
    Remove {
        /// Line to drop.
        item_id: ItemId,
    },
    /// Empty the cart.
    Clear,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a catalog item.
    #[must_use]
    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Apply a command, returning the next cart state.
    ///
    /// Pure: `self` is untouched, the catalog is only consulted for
    /// stock and snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] and leaves no partial mutation behind.
    pub fn apply(&self, command: CartCommand, catalog: &CatalogStore) -> Result<Self, CartError> {
        let mut next = self.clone();
        match command {
            CartCommand::Add { item_id, quantity } => next.add(item_id, quantity, catalog)?,
            CartCommand::Update { item_id, quantity } => next.update(item_id, quantity, catalog)?,
            CartCommand::Remove { item_id } => {
                next.lines.retain(|line| line.item_id != item_id);
            }
            CartCommand::Clear => next.lines.clear(),
        }
        Ok(next)
    }

    fn add(&mut self, item_id: ItemId, quantity: u32, catalog: &CatalogStore) -> Result<(), CartError> {
        let item = catalog.get(item_id)?;
        let existing = self.line(item_id).map_or(0, |line| line.quantity);
        let requested = existing.saturating_add(quantity);

        if requested > item.stock {
            return Err(CartError::InsufficientStock {
                item_id,
                title: item.title,
                requested,
                available: item.stock,
            });
        }

        match self.lines.iter_mut().find(|line| line.item_id == item_id) {
            Some(line) => line.quantity = requested,
            None => self.lines.push(CartLine::snapshot(&item, requested)),
        }
        Ok(())
    }

    fn update(&mut self, item_id: ItemId, quantity: i64, catalog: &CatalogStore) -> Result<(), CartError> {
        if self.line(item_id).is_none() {
            return Err(CartError::LineNotFound(item_id));
        }

        let stock = catalog.available_stock(item_id)?;
        let clamped = u32::try_from(quantity.max(0))
            .unwrap_or(u32::MAX)
            .min(stock);

        if clamped == 0 {
            self.lines.retain(|line| line.item_id != item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = clamped;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use penny_black_core::ItemId;

    fn catalog() -> CatalogStore {
        CatalogStore::sample()
    }

    // Sample item 10 has stock 3; item 2 has stock 200.
    const SCARCE: ItemId = ItemId::new(10);
    const PLENTIFUL: ItemId = ItemId::new(2);

    #[test]
    fn test_add_appends_a_snapshot_line() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: PLENTIFUL,
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap();

        let line = cart.line(PLENTIFUL).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.title, catalog.get(PLENTIFUL).unwrap().title);
        assert_eq!(line.unit_price, catalog.get(PLENTIFUL).unwrap().price);
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: PLENTIFUL,
                    quantity: 3,
                },
                &catalog,
            )
            .unwrap()
            .apply(
                CartCommand::Add {
                    item_id: PLENTIFUL,
                    quantity: 4,
                },
                &catalog,
            )
            .unwrap();

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.line(PLENTIFUL).unwrap().quantity, 7);
    }

    #[test]
    fn test_add_beyond_stock_rejects_and_changes_nothing() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: SCARCE,
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap();

        let err = cart
            .apply(
                CartCommand::Add {
                    item_id: SCARCE,
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CartError::InsufficientStock {
                requested: 4,
                available: 3,
                ..
            }
        ));
        // The original cart is untouched.
        assert_eq!(cart.line(SCARCE).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_unknown_item() {
        let catalog = catalog();
        let err = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: ItemId::new(404),
                    quantity: 1,
                },
                &catalog,
            )
            .unwrap_err();
        assert!(matches!(err, CartError::Catalog(_)));
    }

    #[test]
    fn test_update_clamps_to_stock() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: SCARCE,
                    quantity: 1,
                },
                &catalog,
            )
            .unwrap()
            .apply(
                CartCommand::Update {
                    item_id: SCARCE,
                    quantity: 50,
                },
                &catalog,
            )
            .unwrap();

        assert_eq!(cart.line(SCARCE).unwrap().quantity, 3);
    }

    #[test]
    fn test_update_to_zero_removes_the_line() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: PLENTIFUL,
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap()
            .apply(
                CartCommand::Update {
                    item_id: PLENTIFUL,
                    quantity: 0,
                },
                &catalog,
            )
            .unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_negative_also_removes() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: PLENTIFUL,
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap()
            .apply(
                CartCommand::Update {
                    item_id: PLENTIFUL,
                    quantity: -3,
                },
                &catalog,
            )
            .unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_missing_line() {
        let catalog = catalog();
        let err = Cart::empty()
            .apply(
                CartCommand::Update {
                    item_id: PLENTIFUL,
                    quantity: 1,
                },
                &catalog,
            )
            .unwrap_err();
        assert_eq!(err, CartError::LineNotFound(PLENTIFUL));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Remove {
                    item_id: PLENTIFUL,
                },
                &catalog,
            )
            .unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: PLENTIFUL,
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap()
            .apply(
                CartCommand::Add {
                    item_id: SCARCE,
                    quantity: 1,
                },
                &catalog,
            )
            .unwrap()
            .apply(CartCommand::Clear, &catalog)
            .unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let catalog = catalog();
        let cart = Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: PLENTIFUL,
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap()
            .apply(
                CartCommand::Add {
                    item_id: SCARCE,
                    quantity: 1,
                },
                &catalog,
            )
            .unwrap();

        assert_eq!(cart.item_count(), 3);
    }
}
