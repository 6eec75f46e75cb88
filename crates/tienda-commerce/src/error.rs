//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart mutations themselves never fail; these cover the catalog and the
/// catalog-driven paths into the cart.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product is marked as sold and cannot be added.
    #[error("Product already sold: {0}")]
    ProductSold(ProductId),

    /// The catalog could not be read.
    #[error("Catalog could not be loaded: {0}")]
    CatalogLoad(String),

    /// The catalog was read but is not valid JSON of the expected shape.
    #[error("Catalog is malformed: {0}")]
    CatalogFormat(#[from] serde_json::Error),
}
