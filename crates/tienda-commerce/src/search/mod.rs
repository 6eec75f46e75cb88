//! Catalog search module.
//!
//! Category selection plus free-text matching over the in-memory catalog.

mod filter;

pub use filter::{normalize, CategoryFilter, ProductFilter, ALL_CATEGORIES};
