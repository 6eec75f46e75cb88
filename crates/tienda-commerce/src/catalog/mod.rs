//! Product catalog module.
//!
//! Contains the product record, the loaded catalog, and the catalog page view.

mod catalog;
mod product;
mod view;

pub use catalog::Catalog;
pub use product::{Product, ProductStatus};
pub use view::{
    add_product, CatalogView, CategoryButton, ProductCard, ALL_CATEGORIES_LABEL, NO_RESULTS_MESSAGE,
};
