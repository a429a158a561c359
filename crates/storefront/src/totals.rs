//! Order-total computation.
//!
//! Pure functions over a cart: no storage, no clocks, safe to recompute
//! on every display. Shipping is banded by item count in groups of five
//! with a floor, so small orders pay the minimum and bulk orders pay per
//! band.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use penny_black_core::{Currency, Money, MoneyError};

use crate::models::cart::Cart;

/// Items per shipping band.
const BAND_SIZE: u32 = 5;
/// Fee charged per (started) band, in rupees.
const FEE_PER_BAND: i64 = 15;
/// Minimum fee for any non-empty order, in rupees.
const MINIMUM_FEE: i64 = 25;

/// Snapshot of the money arithmetic for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Banded shipping fee.
    pub shipping: Money,
    /// `subtotal + shipping`.
    pub total: Money,
    /// Total units across all lines.
    pub item_count: u32,
}

impl OrderTotals {
    /// Compute totals for the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] if a line total or the sum overflows, or if
    /// cart lines disagree on currency.
    pub fn compute(cart: &Cart) -> Result<Self, MoneyError> {
        let mut subtotal = Money::zero(Currency::INR);
        for line in &cart.lines {
            subtotal = subtotal.checked_add(line.line_total()?)?;
        }

        let item_count = cart.item_count();
        let shipping = shipping_cost(item_count);
        let total = subtotal.checked_add(shipping)?;

        Ok(Self {
            subtotal,
            shipping,
            total,
            item_count,
        })
    }
}

/// Shipping fee for an order of `item_count` units.
///
/// Zero items ship for zero; otherwise the fee is
/// `max(25, ceil(item_count / 5) * 15)` rupees.
#[must_use]
pub fn shipping_cost(item_count: u32) -> Money {
    if item_count == 0 {
        return Money::zero(Currency::INR);
    }
    let bands = i64::from(item_count.div_ceil(BAND_SIZE));
    let fee = (bands * FEE_PER_BAND).max(MINIMUM_FEE);
    Money::inr(Decimal::from(fee))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::models::cart::CartCommand;
    use penny_black_core::ItemId;

    #[test]
    fn test_shipping_zero_items_is_free() {
        assert_eq!(shipping_cost(0), Money::rupees(0));
    }

    #[test]
    fn test_shipping_floor_applies_to_small_orders() {
        // One band (1-5 items) would cost 15, but the floor is 25.
        for n in 1..=5 {
            assert_eq!(shipping_cost(n), Money::rupees(25), "n={n}");
        }
        // Two bands would cost 30, above the floor.
        assert_eq!(shipping_cost(6), Money::rupees(30));
    }

    #[test]
    fn test_shipping_matches_formula_for_all_small_counts() {
        for n in 1u32..=100 {
            let bands = i64::from(n.div_ceil(5));
            let expected = (bands * 15).max(25);
            assert_eq!(shipping_cost(n), Money::rupees(expected), "n={n}");
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(shipping_cost(10), Money::rupees(30));
        assert_eq!(shipping_cost(11), Money::rupees(45));
        assert_eq!(shipping_cost(15), Money::rupees(45));
        assert_eq!(shipping_cost(16), Money::rupees(60));
    }

    #[test]
    fn test_worked_example_two_hundred_fifty() {
        // Two items at Rs.100 and one at Rs.25: subtotal 225, count 3,
        // shipping max(25, ceil(3/5)*15) = 25, total 250.
        use crate::catalog::{CatalogItem, ItemCategory, PostalCircle};
        use rust_decimal::Decimal;

        let catalog = CatalogStore::new([
            CatalogItem {
                id: ItemId::new(1),
                title: "Hundred".to_owned(),
                description: String::new(),
                category: ItemCategory::Stamp,
                postal_circle: PostalCircle::Delhi,
                year: 2020,
                price: Money::inr(Decimal::from(100)),
                stock: 10,
            },
            CatalogItem {
                id: ItemId::new(2),
                title: "TwentyFive".to_owned(),
                description: String::new(),
                category: ItemCategory::Stamp,
                postal_circle: PostalCircle::Delhi,
                year: 2020,
                price: Money::inr(Decimal::from(25)),
                stock: 10,
            },
        ]);

        let cart = crate::models::cart::Cart::empty()
            .apply(
                CartCommand::Add {
                    item_id: ItemId::new(1),
                    quantity: 2,
                },
                &catalog,
            )
            .unwrap()
            .apply(
                CartCommand::Add {
                    item_id: ItemId::new(2),
                    quantity: 1,
                },
                &catalog,
            )
            .unwrap();

        let totals = OrderTotals::compute(&cart).unwrap();
        assert_eq!(totals.subtotal, Money::rupees(225));
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.shipping, Money::rupees(25));
        assert_eq!(totals.total, Money::rupees(250));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = OrderTotals::compute(&Cart::empty()).unwrap();
        assert_eq!(totals.subtotal, Money::rupees(0));
        assert_eq!(totals.shipping, Money::rupees(0));
        assert_eq!(totals.total, Money::rupees(0));
        assert_eq!(totals.item_count, 0);
    }
}
