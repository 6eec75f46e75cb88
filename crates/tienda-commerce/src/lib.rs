//! Storefront domain types and the cart state manager.
//!
//! This crate provides:
//!
//! - **Catalog**: products loaded from a static JSON file, and the catalog page view
//! - **Search**: category and free-text filters
//! - **Cart**: the persisted, observable cart and its snapshots
//! - **Checkout**: the checkout page view and the pre-filled order link
//!
//! # Example
//!
//! ```rust
//! use tienda_commerce::prelude::*;
//! use tienda_store::MemoryBackend;
//!
//! let catalog = Catalog::new(vec![
//!     Product::new("cas-001", "Kind of Blue", "cassette", Clp::new(3000)),
//! ]);
//!
//! let backend = MemoryBackend::new();
//! let mut cart = CartManager::new(backend.connect());
//! add_product(&mut cart, &catalog, &ProductId::new("cas-001")).unwrap();
//!
//! let view = CheckoutView::from_snapshot(&cart.snapshot(), Some(&catalog), &OrderLinks::default());
//! assert_eq!(view.total.display(), "$3.000");
//! assert!(view.order_link.starts_with("https://wa.me/"));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Clp;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Clp;

    // Catalog
    pub use crate::catalog::{add_product, Catalog, CatalogView, Product, ProductCard, ProductStatus};

    // Search
    pub use crate::search::{CategoryFilter, ProductFilter};

    // Cart
    pub use crate::cart::{CartItem, CartManager, CartSnapshot, Subscription};

    // Checkout
    pub use crate::checkout::{order_link, storage_notice, CheckoutLine, CheckoutView, OrderLine, OrderLinks};
}
