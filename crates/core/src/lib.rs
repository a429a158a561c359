//! Penny Black Core - Shared types library.
//!
//! This crate provides common types used across all Penny Black components:
//! - `storefront` - The marketplace library (catalog, cart, wallet, orders)
//! - `cli` - Command-line shell for customers and administrators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clocks.
//! Anything that needs a timestamp takes one as an argument, which keeps the
//! crate usable from tests without fixture machinery.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, contact details,
//!   and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
