//! Penny Black Storefront - the marketplace library.
//!
//! Everything the philately marketplace does happens here: catalog
//! browsing, the cart, order totals, the wallet/deposit account, order
//! history, personal collections, and accounts. There is no server in
//! this system - surfaces (currently the CLI) call straight into these
//! services.
//!
//! # Architecture
//!
//! State flows one way: surfaces build commands, domain types in
//! [`models`] apply them as pure transitions, and [`services`] persist
//! the resulting snapshots through the [`storage`] seam. The
//! [`catalog`] is in-memory sample data; durable state is JSON blobs in
//! a key-value store namespaced by user id.
//!
//! # Modules
//!
//! - [`catalog`] - Sample catalog with postal-circle and category facets
//! - [`config`] - Environment-driven configuration
//! - [`error`] - `AppError` and user-facing failure messages
//! - [`models`] - Domain types: cart, order, wallet, user
//! - [`services`] - Storage-backed operations over the domain types
//! - [`state`] - `AppState` wiring config, store, and catalog together
//! - [`storage`] - The key-value store seam and its backends
//! - [`totals`] - Pure order-total computation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod totals;

pub use error::{AppError, Result};
pub use state::AppState;
