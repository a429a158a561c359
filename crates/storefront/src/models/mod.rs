//! Domain types, separate from persistence and services.

pub mod cart;
pub mod order;
pub mod user;
pub mod wallet;

pub use cart::{Cart, CartCommand, CartError, CartLine};
pub use order::{AddressError, Order, ShippingAddress};
pub use user::{Session, User, UserRecord};
pub use wallet::{Transaction, WalletAccount};
