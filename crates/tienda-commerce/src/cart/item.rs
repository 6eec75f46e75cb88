//! Cart line and snapshot types.

use crate::ids::ProductId;
use crate::money::Clp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line in the cart.
///
/// `name` and `unit_price` are copied from the catalog when the product is
/// first added and are not refreshed afterwards. Lines restored from the
/// legacy storage format may lack them; a missing price counts as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Product name at add time.
    pub name: Option<String>,
    /// Unit price at add time.
    pub unit_price: Option<Clp>,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Create a line with quantity 1.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Clp) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            unit_price: Some(unit_price),
            quantity: 1,
        }
    }

    /// Unit price times quantity; zero when the price is unknown.
    pub fn line_total(&self) -> Clp {
        self.unit_price.unwrap_or_default().line_total(self.quantity)
    }
}

/// An immutable copy of the cart.
///
/// Returned by every manager operation and passed to observers. Holding or
/// modifying a snapshot never affects the manager.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Lines in insertion order.
    pub items: Vec<CartItem>,
    /// Sum of all line totals.
    pub total: Clp,
    /// When the cart last changed, if ever.
    pub last_updated: Option<DateTime<Utc>>,
}

impl CartSnapshot {
    /// Total quantity across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product ID.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Quantity of a product in the cart (0 if absent).
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |i| i.quantity)
    }

    /// Total computed from the lines, independent of the stored `total`.
    pub fn recomputed_total(&self) -> Clp {
        recompute_total(&self.items)
    }
}

pub(crate) fn recompute_total(items: &[CartItem]) -> Clp {
    items.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let mut item = CartItem::new("a", "Tape", Clp::new(3000));
        item.quantity = 3;
        assert_eq!(item.line_total(), Clp::new(9000));

        item.unit_price = None;
        assert_eq!(item.line_total(), Clp::ZERO);
    }

    #[test]
    fn test_snapshot_counts() {
        let mut a = CartItem::new("a", "Tape", Clp::new(3000));
        a.quantity = 2;
        let b = CartItem::new("b", "Tape2", Clp::new(5000));
        let snapshot = CartSnapshot {
            total: Clp::new(11000),
            items: vec![a, b],
            last_updated: None,
        };

        assert_eq!(snapshot.item_count(), 3);
        assert_eq!(snapshot.quantity_of(&ProductId::new("a")), 2);
        assert_eq!(snapshot.quantity_of(&ProductId::new("zzz")), 0);
        assert_eq!(snapshot.recomputed_total(), snapshot.total);
    }
}
