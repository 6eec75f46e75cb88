//! Stored cart layout.
//!
//! Current format, written on every change:
//!
//! ```json
//! { "items": [{ "id": "a", "nombre": "Tape", "precio": 3000, "cantidad": 2 }],
//!   "total": 6000,
//!   "actualizado": "2026-10-16T12:00:00.000Z" }
//! ```
//!
//! Older pages stored a bare array of lines, sometimes with only `id` and
//! `cantidad`. Both shapes are read; only the current one is written. The
//! stored `total` is never trusted on read.

use crate::cart::item::recompute_total;
use crate::cart::CartItem;
use crate::ids::ProductId;
use crate::money::Clp;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cart state as held by the manager and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct CartState {
    pub items: Vec<CartItem>,
    pub total: Clp,
    pub last_updated: Option<DateTime<Utc>>,
}

impl CartState {
    /// Parse a stored payload in either format.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        let (items, actualizado) = match serde_json::from_str::<StoredPayload>(raw)? {
            StoredPayload::Legacy(items) => (items, None),
            StoredPayload::Current { items, actualizado } => (items, actualizado),
        };

        let mut state = Self {
            items: merge_lines(items),
            total: Clp::ZERO,
            last_updated: actualizado.as_deref().and_then(parse_timestamp),
        };
        state.total = recompute_total(&state.items);
        Ok(state)
    }

    /// Serialize in the current format.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let payload = StoredCartRef {
            items: self.items.iter().map(StoredLineRef::from).collect(),
            total: self.total,
            actualizado: self
                .last_updated
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        };
        serde_json::to_string(&payload)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Legacy(Vec<StoredLine>),
    Current {
        items: Vec<StoredLine>,
        #[serde(default)]
        actualizado: Option<String>,
    },
}

#[derive(Deserialize)]
struct StoredLine {
    id: ProductId,
    #[serde(default)]
    nombre: Option<String>,
    #[serde(default)]
    precio: Option<Clp>,
    #[serde(default)]
    cantidad: Option<u32>,
}

#[derive(Serialize)]
struct StoredCartRef<'a> {
    items: Vec<StoredLineRef<'a>>,
    total: Clp,
    actualizado: Option<String>,
}

#[derive(Serialize)]
struct StoredLineRef<'a> {
    id: &'a ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    nombre: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    precio: Option<Clp>,
    cantidad: u32,
}

impl<'a> From<&'a CartItem> for StoredLineRef<'a> {
    fn from(item: &'a CartItem) -> Self {
        Self {
            id: &item.id,
            nombre: item.name.as_deref(),
            precio: item.unit_price,
            cantidad: item.quantity,
        }
    }
}

/// Restore the cart invariants on stored lines: a missing quantity means 1,
/// zero-quantity lines are dropped, and repeated ids fold into the first
/// occurrence.
fn merge_lines(lines: Vec<StoredLine>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(lines.len());
    for line in lines {
        let quantity = line.cantidad.unwrap_or(1);
        if quantity == 0 {
            debug!(id = %line.id, "dropping stored line with zero quantity");
            continue;
        }
        match items.iter_mut().find(|i| i.id == line.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => items.push(CartItem {
                id: line.id,
                name: line.nombre,
                unit_price: line.precio,
                quantity,
            }),
        }
    }
    items
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(error) => {
            debug!(raw, %error, "ignoring unparseable cart timestamp");
            None
        }
    }
}
