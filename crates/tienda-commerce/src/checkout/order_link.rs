//! Messaging deep link carrying the order summary.

use crate::money::Clp;
use serde::{Deserialize, Serialize};

/// Contact number orders are sent to.
pub const DEFAULT_CONTACT_PHONE: &str = "56976449957";

const LINK_BASE: &str = "https://wa.me";
const GREETING: &str = "Hola, quiero hacer el siguiente pedido:";

/// One line of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio_clp")]
    pub unit_price: Clp,
}

/// Builds order links for a contact number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLinks {
    phone: String,
}

impl Default for OrderLinks {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT_PHONE)
    }
}

impl OrderLinks {
    /// Links to `phone` (international format, digits only).
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    /// Bare link to the contact, without a message.
    pub fn contact_link(&self) -> String {
        format!("{LINK_BASE}/{}", self.phone)
    }

    /// The plain-text order message.
    pub fn message(&self, detail: &[OrderLine], total: Clp) -> String {
        let lines: Vec<String> = detail
            .iter()
            .map(|line| {
                format!(
                    "- {} x{}: {}",
                    line.name,
                    line.quantity,
                    line.unit_price.line_total(line.quantity)
                )
            })
            .collect();
        format!("{GREETING}\n{}\nTotal: {}", lines.join("\n"), total)
    }

    /// Link with the order message pre-filled, or the bare contact link when
    /// there is nothing to order.
    pub fn link(&self, detail: &[OrderLine], total: Clp) -> String {
        if detail.is_empty() {
            return self.contact_link();
        }
        let message = self.message(detail, total);
        format!(
            "{}?text={}",
            self.contact_link(),
            urlencoding::encode(&message)
        )
    }
}

/// Order link to the default contact.
pub fn order_link(detail: &[OrderLine], total: Clp) -> String {
    OrderLinks::default().link(detail, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> Vec<OrderLine> {
        vec![
            OrderLine {
                name: "Tape".to_string(),
                quantity: 2,
                unit_price: Clp::new(3000),
            },
            OrderLine {
                name: "Tape2".to_string(),
                quantity: 1,
                unit_price: Clp::new(5000),
            },
        ]
    }

    #[test]
    fn test_empty_detail_gives_contact_link() {
        assert_eq!(order_link(&[], Clp::ZERO), "https://wa.me/56976449957");
    }

    #[test]
    fn test_message_text() {
        let message = OrderLinks::default().message(&detail(), Clp::new(11000));
        assert_eq!(
            message,
            "Hola, quiero hacer el siguiente pedido:\n- Tape x2: $6.000\n- Tape2 x1: $5.000\nTotal: $11.000"
        );
    }

    #[test]
    fn test_link_is_percent_encoded() {
        let link = order_link(&detail(), Clp::new(11000));

        assert!(link.starts_with("https://wa.me/56976449957?text=Hola%2C%20quiero"));
        assert!(link.contains("%0A-%20Tape%20x2%3A%20%246.000"));
        assert!(link.ends_with("Total%3A%20%2411.000"));

        let (_, encoded) = link.split_once("?text=").unwrap();
        assert_eq!(
            urlencoding::decode(encoded).unwrap(),
            OrderLinks::default().message(&detail(), Clp::new(11000))
        );
    }

    #[test]
    fn test_custom_phone() {
        let links = OrderLinks::new("56911111111");
        assert_eq!(links.link(&[], Clp::ZERO), "https://wa.me/56911111111");
    }

    #[test]
    fn test_order_line_wire_names() {
        let line: OrderLine =
            serde_json::from_str(r#"{"nombre": "Tape", "cantidad": 2, "precio_clp": 3000}"#)
                .unwrap();
        assert_eq!(line.quantity, 2);
    }
}
