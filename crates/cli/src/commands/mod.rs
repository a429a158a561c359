//! Command handlers, grouped by surface.

pub mod admin;
pub mod seed;
pub mod shop;
