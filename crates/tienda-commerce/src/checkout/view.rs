//! Checkout page view.

use crate::cart::CartSnapshot;
use crate::catalog::Catalog;
use crate::checkout::{OrderLine, OrderLinks};
use crate::ids::ProductId;
use crate::money::Clp;
use serde::Serialize;

/// Name shown for a line whose product can't be resolved.
pub const FALLBACK_PRODUCT_NAME: &str = "Producto";

/// Message shown in place of lines when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Tu carrito está vacío.";

/// Warning shown when cart changes can't be persisted.
pub const STORAGE_UNAVAILABLE_WARNING: &str =
    "El almacenamiento local no está disponible. El carrito podría no guardarse.";

/// Non-blocking notice for the page when persistence is off.
pub fn storage_notice(storage_available: bool) -> Option<&'static str> {
    (!storage_available).then_some(STORAGE_UNAVAILABLE_WARNING)
}

/// A rendered checkout line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    pub id: ProductId,
    /// `"name xN"` for N > 1, otherwise just the name.
    pub label: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Clp,
    pub line_total: Clp,
}

/// Everything the checkout page shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutView {
    pub lines: Vec<CheckoutLine>,
    pub total: Clp,
    pub item_count: u64,
    pub order_link: String,
}

impl CheckoutView {
    /// Build the view.
    ///
    /// Names and prices come from the snapshot's denormalized copy first,
    /// then from `catalog`, and finally fall back to
    /// [`FALLBACK_PRODUCT_NAME`] and zero. The total is the sum of the
    /// resolved lines, so a price filled in from the catalog counts toward it.
    pub fn from_snapshot(
        snapshot: &CartSnapshot,
        catalog: Option<&Catalog>,
        links: &OrderLinks,
    ) -> Self {
        let lines: Vec<CheckoutLine> = snapshot
            .items
            .iter()
            .map(|item| {
                let product = catalog.and_then(|c| c.get(&item.id));
                let name = item
                    .name
                    .clone()
                    .or_else(|| product.map(|p| p.name.clone()))
                    .unwrap_or_else(|| FALLBACK_PRODUCT_NAME.to_string());
                let unit_price = item
                    .unit_price
                    .or_else(|| product.map(|p| p.unit_price))
                    .unwrap_or_default();
                let label = if item.quantity > 1 {
                    format!("{} x{}", name, item.quantity)
                } else {
                    name.clone()
                };

                CheckoutLine {
                    id: item.id.clone(),
                    label,
                    name,
                    quantity: item.quantity,
                    unit_price,
                    line_total: unit_price.line_total(item.quantity),
                }
            })
            .collect();

        let detail: Vec<OrderLine> = lines
            .iter()
            .map(|line| OrderLine {
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        let total: Clp = lines.iter().map(|line| line.line_total).sum();

        Self {
            order_link: links.link(&detail, total),
            total,
            item_count: snapshot.item_count(),
            lines,
        }
    }

    /// Check if there is nothing to check out.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::catalog::Product;

    fn snapshot(items: Vec<CartItem>) -> CartSnapshot {
        CartSnapshot {
            total: items.iter().map(CartItem::line_total).sum(),
            items,
            last_updated: None,
        }
    }

    #[test]
    fn test_empty_cart() {
        let view = CheckoutView::from_snapshot(&CartSnapshot::default(), None, &OrderLinks::default());

        assert!(view.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.order_link, "https://wa.me/56976449957");
    }

    #[test]
    fn test_labels_and_totals() {
        let mut a = CartItem::new("A", "Tape", Clp::new(3000));
        a.quantity = 2;
        let b = CartItem::new("B", "Tape2", Clp::new(5000));
        let view = CheckoutView::from_snapshot(&snapshot(vec![a, b]), None, &OrderLinks::default());

        let labels: Vec<_> = view.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Tape x2", "Tape2"]);
        assert_eq!(view.lines[0].line_total, Clp::new(6000));
        assert_eq!(view.total, Clp::new(11000));
        assert_eq!(view.item_count, 3);
        assert!(view.order_link.contains("?text="));
    }

    #[test]
    fn test_missing_fields_resolve_from_catalog() {
        let legacy = CartItem {
            id: ProductId::new("A"),
            name: None,
            unit_price: None,
            quantity: 1,
        };
        let catalog = Catalog::new(vec![Product::new("A", "Kind of Blue", "cassette", Clp::new(4000))]);

        let view = CheckoutView::from_snapshot(
            &snapshot(vec![legacy]),
            Some(&catalog),
            &OrderLinks::default(),
        );

        assert_eq!(view.lines[0].name, "Kind of Blue");
        assert_eq!(view.lines[0].unit_price, Clp::new(4000));
    }

    #[test]
    fn test_catalog_filled_price_counts_toward_total() {
        let legacy = CartItem {
            id: ProductId::new("A"),
            name: None,
            unit_price: None,
            quantity: 2,
        };
        let cart = snapshot(vec![legacy]);
        assert_eq!(cart.total, Clp::ZERO);
        let catalog = Catalog::new(vec![Product::new("A", "Kind of Blue", "cassette", Clp::new(4000))]);

        let view = CheckoutView::from_snapshot(&cart, Some(&catalog), &OrderLinks::default());

        let lines_sum: Clp = view.lines.iter().map(|l| l.line_total).sum();
        assert_eq!(lines_sum, Clp::new(8000));
        assert_eq!(view.total, lines_sum);

        let (_, encoded) = view.order_link.split_once("?text=").unwrap();
        let message = urlencoding::decode(encoded).unwrap();
        assert!(message.contains("- Kind of Blue x2: $8.000"));
        assert!(message.ends_with("Total: $8.000"));
    }

    #[test]
    fn test_snapshot_values_win_over_catalog() {
        let item = CartItem::new("A", "Old name", Clp::new(3000));
        let catalog = Catalog::new(vec![Product::new("A", "New name", "cassette", Clp::new(9000))]);

        let view = CheckoutView::from_snapshot(
            &snapshot(vec![item]),
            Some(&catalog),
            &OrderLinks::default(),
        );

        assert_eq!(view.lines[0].name, "Old name");
        assert_eq!(view.lines[0].unit_price, Clp::new(3000));
    }

    #[test]
    fn test_unresolvable_line_is_zero_priced() {
        let orphan = CartItem {
            id: ProductId::new("gone"),
            name: None,
            unit_price: None,
            quantity: 2,
        };
        let view = CheckoutView::from_snapshot(
            &snapshot(vec![orphan]),
            Some(&Catalog::default()),
            &OrderLinks::default(),
        );

        assert_eq!(view.lines[0].label, "Producto x2");
        assert_eq!(view.lines[0].line_total, Clp::ZERO);
    }

    #[test]
    fn test_storage_notice() {
        assert_eq!(storage_notice(true), None);
        assert_eq!(storage_notice(false), Some(STORAGE_UNAVAILABLE_WARNING));
    }
}
