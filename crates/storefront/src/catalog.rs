//! Catalog of philatelic items.
//!
//! The catalog is sample data held in memory, loaded once at startup the
//! same way static site content is. Stock figures are a soft ceiling
//! consulted by cart mutations - checkout does not decrement them, and
//! nothing about them is transactional.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use penny_black_core::{ItemId, Money};

/// Errors from catalog lookups.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// No item with the given id.
    #[error("no catalog item with id {0}")]
    UnknownItem(ItemId),
}

/// What kind of philatelic product an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// A single postage stamp.
    Stamp,
    /// A postally used or commemorative cover.
    Cover,
    /// A miniature or full sheet.
    Sheet,
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stamp => write!(f, "stamp"),
            Self::Cover => write!(f, "cover"),
            Self::Sheet => write!(f, "sheet"),
        }
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stamp" => Ok(Self::Stamp),
            "cover" => Ok(Self::Cover),
            "sheet" => Ok(Self::Sheet),
            _ => Err(format!("invalid item category: {s}")),
        }
    }
}

/// Regional postal administration a release belongs to, used as a
/// browse facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostalCircle {
    Delhi,
    Maharashtra,
    TamilNadu,
    WestBengal,
    Karnataka,
    Gujarat,
    Rajasthan,
    Kerala,
}

impl PostalCircle {
    /// Human-readable circle name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Delhi => "Delhi",
            Self::Maharashtra => "Maharashtra",
            Self::TamilNadu => "Tamil Nadu",
            Self::WestBengal => "West Bengal",
            Self::Karnataka => "Karnataka",
            Self::Gujarat => "Gujarat",
            Self::Rajasthan => "Rajasthan",
            Self::Kerala => "Kerala",
        }
    }
}

impl std::fmt::Display for PostalCircle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PostalCircle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delhi" => Ok(Self::Delhi),
            "maharashtra" => Ok(Self::Maharashtra),
            "tamil_nadu" => Ok(Self::TamilNadu),
            "west_bengal" => Ok(Self::WestBengal),
            "karnataka" => Ok(Self::Karnataka),
            "gujarat" => Ok(Self::Gujarat),
            "rajasthan" => Ok(Self::Rajasthan),
            "kerala" => Ok(Self::Kerala),
            _ => Err(format!("invalid postal circle: {s}")),
        }
    }
}

/// A purchasable catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Catalog id.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Short description for listings.
    pub description: String,
    /// Product kind.
    pub category: ItemCategory,
    /// Issuing circle, used as a browse facet.
    pub postal_circle: PostalCircle,
    /// Year of issue.
    pub year: u16,
    /// Unit price.
    pub price: Money,
    /// Units available; a soft ceiling for cart quantities.
    pub stock: u32,
}

/// In-memory catalog with interior mutability for admin restocks.
#[derive(Debug)]
pub struct CatalogStore {
    items: RwLock<BTreeMap<ItemId, CatalogItem>>,
}

impl CatalogStore {
    /// Build a catalog from a set of items.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let items = items.into_iter().map(|item| (item.id, item)).collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// The sample catalog the storefront ships with.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(sample_items())
    }

    /// Fetch one item by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if the id is not present.
    pub fn get(&self, id: ItemId) -> Result<CatalogItem, CatalogError> {
        self.read_items()
            .get(&id)
            .cloned()
            .ok_or(CatalogError::UnknownItem(id))
    }

    /// Units available for an item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if the id is not present.
    pub fn available_stock(&self, id: ItemId) -> Result<u32, CatalogError> {
        self.read_items()
            .get(&id)
            .map(|item| item.stock)
            .ok_or(CatalogError::UnknownItem(id))
    }

    /// All items ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<CatalogItem> {
        self.read_items().values().cloned().collect()
    }

    /// Items issued by a circle.
    #[must_use]
    pub fn by_circle(&self, circle: PostalCircle) -> Vec<CatalogItem> {
        self.read_items()
            .values()
            .filter(|item| item.postal_circle == circle)
            .cloned()
            .collect()
    }

    /// Items of a category.
    #[must_use]
    pub fn by_category(&self, category: ItemCategory) -> Vec<CatalogItem> {
        self.read_items()
            .values()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over titles.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CatalogItem> {
        let needle = query.to_lowercase();
        self.read_items()
            .values()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Set the stock for an item (admin operation) and return the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if the id is not present.
    pub fn restock(&self, id: ItemId, stock: u32) -> Result<CatalogItem, CatalogError> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let item = items.get_mut(&id).ok_or(CatalogError::UnknownItem(id))?;
        item.stock = stock;
        Ok(item.clone())
    }

    fn read_items(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<ItemId, CatalogItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::sample()
    }
}

fn item(
    id: i32,
    title: &str,
    description: &str,
    category: ItemCategory,
    postal_circle: PostalCircle,
    year: u16,
    price_paise: i64,
    stock: u32,
) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        category,
        postal_circle,
        year,
        price: Money::inr(Decimal::new(price_paise, 2)),
        stock,
    }
}

/// Sample releases covering every category and most circles.
fn sample_items() -> Vec<CatalogItem> {
    vec![
        item(
            1,
            "Mahatma Gandhi 150th Anniversary Miniature Sheet",
            "Se-tenant miniature sheet issued for the 150th birth anniversary.",
            ItemCategory::Sheet,
            PostalCircle::Delhi,
            2019,
            20000,
            25,
        ),
        item(
            2,
            "Indian Peacock Definitive",
            "National bird definitive from the birds of India series.",
            ItemCategory::Stamp,
            PostalCircle::Delhi,
            2017,
            1500,
            200,
        ),
        item(
            3,
            "1947 Independence First Day Cover",
            "Reprint cover with the Jai Hind cachet and first-day cancel.",
            ItemCategory::Cover,
            PostalCircle::Maharashtra,
            1997,
            12500,
            12,
        ),
        item(
            4,
            "Srinivasa Ramanujan Commemorative",
            "Single stamp honouring the mathematician's 125th birth year.",
            ItemCategory::Stamp,
            PostalCircle::TamilNadu,
            2012,
            2500,
            80,
        ),
        item(
            5,
            "Bengal Tiger Wildlife Series",
            "Wildlife conservation issue featuring the Royal Bengal tiger.",
            ItemCategory::Stamp,
            PostalCircle::WestBengal,
            2020,
            4000,
            60,
        ),
        item(
            6,
            "Darjeeling Himalayan Railway Sheet",
            "Mountain railways of India miniature sheet, UNESCO series.",
            ItemCategory::Sheet,
            PostalCircle::WestBengal,
            2021,
            15000,
            18,
        ),
        item(
            7,
            "Mysore Dasara Special Cover",
            "Special cover released during the Dasara festivities.",
            ItemCategory::Cover,
            PostalCircle::Karnataka,
            2018,
            7500,
            30,
        ),
        item(
            8,
            "Rani ki Vav Heritage Stamp",
            "Stepwell of Patan from the UNESCO world heritage series.",
            ItemCategory::Stamp,
            PostalCircle::Gujarat,
            2016,
            500,
            150,
        ),
        item(
            9,
            "Desert Festival Jaisalmer Cover",
            "Camel-borne mail carried cover from the desert festival.",
            ItemCategory::Cover,
            PostalCircle::Rajasthan,
            2023,
            9900,
            8,
        ),
        item(
            10,
            "Kathakali Dance Forms Sheet",
            "Classical dance forms sheetlet featuring Kathakali.",
            ItemCategory::Sheet,
            PostalCircle::Kerala,
            2015,
            11000,
            3,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = CatalogStore::sample();
        assert_eq!(catalog.list().len(), 10);
        let first = catalog.get(ItemId::new(1)).unwrap();
        assert_eq!(
            first.title,
            "Mahatma Gandhi 150th Anniversary Miniature Sheet"
        );
    }

    #[test]
    fn test_unknown_item() {
        let catalog = CatalogStore::sample();
        assert_eq!(
            catalog.get(ItemId::new(999)),
            Err(CatalogError::UnknownItem(ItemId::new(999)))
        );
    }

    #[test]
    fn test_facet_filters() {
        let catalog = CatalogStore::sample();
        let bengal = catalog.by_circle(PostalCircle::WestBengal);
        assert_eq!(bengal.len(), 2);
        assert!(
            bengal
                .iter()
                .all(|i| i.postal_circle == PostalCircle::WestBengal)
        );

        let covers = catalog.by_category(ItemCategory::Cover);
        assert!(!covers.is_empty());
        assert!(covers.iter().all(|i| i.category == ItemCategory::Cover));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = CatalogStore::sample();
        let hits = catalog.search("railway");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().id, ItemId::new(6));
    }

    #[test]
    fn test_restock_updates_stock() {
        let catalog = CatalogStore::sample();
        let updated = catalog.restock(ItemId::new(10), 40).unwrap();
        assert_eq!(updated.stock, 40);
        assert_eq!(catalog.available_stock(ItemId::new(10)).unwrap(), 40);
    }

    #[test]
    fn test_circle_parse_roundtrip() {
        let circle: PostalCircle = "tamil_nadu".parse().unwrap();
        assert_eq!(circle, PostalCircle::TamilNadu);
        assert_eq!(circle.to_string(), "Tamil Nadu");
    }
}
