//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::money::Clp;
use serde::{Deserialize, Deserializer, Serialize};

/// Product availability.
///
/// Only `"vendido"` (or `"sold"`) marks a product as sold. Any other value,
/// including unknown ones such as `"reservado"`, reads as available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum ProductStatus {
    /// Product can be added to the cart.
    #[default]
    #[serde(rename = "disponible")]
    Available,
    /// Product is sold; shown but not purchasable.
    #[serde(rename = "vendido")]
    Sold,
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("vendido") || s.eq_ignore_ascii_case("sold") => {
                ProductStatus::Sold
            }
            _ => ProductStatus::Available,
        })
    }
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "disponible",
            ProductStatus::Sold => "vendido",
        }
    }
}

/// A product in the catalog.
///
/// Field names on the wire follow the static catalog file
/// (`nombre`, `precio_clp`, `estado`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Performing artist, for music releases.
    #[serde(rename = "artista", default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Free-text description.
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category used by the catalog filters.
    #[serde(rename = "categoria")]
    pub category: CategoryId,
    /// Unit price.
    #[serde(rename = "precio_clp")]
    pub unit_price: Clp,
    /// Image URL or path.
    #[serde(rename = "imagen", default)]
    pub image_url: String,
    /// Availability.
    #[serde(rename = "estado", default)]
    pub status: ProductStatus,
}

impl Product {
    /// Create an available product with no artist, description or image.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<CategoryId>,
        unit_price: Clp,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: None,
            description: None,
            category: category.into(),
            unit_price,
            image_url: String::new(),
            status: ProductStatus::Available,
        }
    }

    /// Set the artist.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    /// Check if the product can be added to the cart.
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }
}
