//! Catalog page view and the add-to-cart path from it.

use crate::cart::{CartManager, CartSnapshot};
use crate::catalog::Catalog;
use crate::ids::ProductId;
use crate::search::{CategoryFilter, ProductFilter};
use crate::CommerceError;
use serde::Serialize;
use tienda_store::KeyValueStore;

/// Label of the "every category" filter button.
pub const ALL_CATEGORIES_LABEL: &str = "Todas";

/// Shown when no product passes the filters.
pub const NO_RESULTS_MESSAGE: &str = "No hay productos que coincidan con la búsqueda.";

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub artist: Option<String>,
    pub price: String,
    pub image_url: String,
    /// Sold products are shown with a badge and can't be added.
    pub sold: bool,
    /// Units of this product already in the cart.
    pub in_cart: u32,
}

/// A category filter button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryButton {
    pub filter: CategoryFilter,
    pub label: String,
    pub active: bool,
}

/// Everything the catalog page shows for one filter state and cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub categories: Vec<CategoryButton>,
    pub cards: Vec<ProductCard>,
    /// Cart badge: total quantity in the cart.
    pub cart_count: u64,
}

impl CatalogView {
    /// Build the view.
    pub fn build(catalog: &Catalog, filter: &ProductFilter, cart: &CartSnapshot) -> Self {
        let mut categories = vec![CategoryButton {
            active: *filter.category() == CategoryFilter::All,
            filter: CategoryFilter::All,
            label: ALL_CATEGORIES_LABEL.to_string(),
        }];
        categories.extend(catalog.categories().into_iter().map(|category| {
            let filter_for = CategoryFilter::Only(category.clone());
            CategoryButton {
                active: *filter.category() == filter_for,
                label: category.label(),
                filter: filter_for,
            }
        }));

        let cards = catalog
            .search(filter)
            .into_iter()
            .map(|product| ProductCard {
                id: product.id.clone(),
                name: product.name.clone(),
                artist: product.artist.clone(),
                price: product.unit_price.display(),
                image_url: product.image_url.clone(),
                sold: !product.is_available(),
                in_cart: cart.quantity_of(&product.id),
            })
            .collect();

        Self {
            categories,
            cards,
            cart_count: cart.item_count(),
        }
    }

    /// Message to show instead of cards, if nothing matched.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(NO_RESULTS_MESSAGE)
    }
}

/// Add one unit of a catalog product to the cart.
///
/// The cart records the product's current name and price. Unknown and sold
/// products are rejected without touching the cart.
pub fn add_product<S: KeyValueStore>(
    cart: &mut CartManager<S>,
    catalog: &Catalog,
    id: &ProductId,
) -> Result<CartSnapshot, CommerceError> {
    let product = catalog
        .get(id)
        .ok_or_else(|| CommerceError::ProductNotFound(id.clone()))?;
    if !product.is_available() {
        return Err(CommerceError::ProductSold(id.clone()));
    }
    Ok(cart.add_item(product.id.clone(), product.name.clone(), product.unit_price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, ProductStatus};
    use crate::money::Clp;
    use tienda_store::MemoryBackend;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("a", "Kind of Blue", "cassette", Clp::new(3000)),
            Product::new("b", "Abbey Road", "vinilo", Clp::new(15000))
                .with_status(ProductStatus::Sold),
        ])
    }

    #[test]
    fn test_build_view() {
        let backend = MemoryBackend::new();
        let mut cart = CartManager::new(backend.connect());
        cart.add_item("a", "Kind of Blue", Clp::new(3000));

        let view = CatalogView::build(&catalog(), &ProductFilter::new(), &cart.snapshot());

        let labels: Vec<_> = view.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Todas", "Cassette", "Vinilo"]);
        assert!(view.categories[0].active);
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.cards[0].price, "$3.000");
        assert_eq!(view.cards[0].in_cart, 1);
        assert!(view.cards[1].sold);
        assert_eq!(view.cart_count, 1);
        assert_eq!(view.empty_message(), None);
    }

    #[test]
    fn test_no_results() {
        let filter = ProductFilter::new().with_text("coltrane");
        let view = CatalogView::build(&catalog(), &filter, &CartSnapshot::default());

        assert!(view.cards.is_empty());
        assert_eq!(view.empty_message(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_active_category() {
        let filter = ProductFilter::new().with_category(CategoryFilter::only("vinilo"));
        let view = CatalogView::build(&catalog(), &filter, &CartSnapshot::default());

        let active: Vec<_> = view
            .categories
            .iter()
            .filter(|c| c.active)
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(active, vec!["Vinilo"]);
    }

    #[test]
    fn test_add_product() {
        let backend = MemoryBackend::new();
        let mut cart = CartManager::new(backend.connect());
        let catalog = catalog();

        let snapshot = add_product(&mut cart, &catalog, &ProductId::new("a")).unwrap();
        assert_eq!(snapshot.total, Clp::new(3000));

        let sold = add_product(&mut cart, &catalog, &ProductId::new("b"));
        assert!(matches!(sold, Err(CommerceError::ProductSold(_))));

        let missing = add_product(&mut cart, &catalog, &ProductId::new("zzz"));
        assert!(matches!(missing, Err(CommerceError::ProductNotFound(_))));

        assert_eq!(cart.snapshot().item_count(), 1);
    }
}
