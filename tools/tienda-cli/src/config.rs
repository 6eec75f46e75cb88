//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tienda_store::is_valid_key;
use tienda_commerce::cart::DEFAULT_STORAGE_KEY;
use tienda_commerce::checkout::DEFAULT_CONTACT_PHONE;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["tienda.toml", ".tienda.toml", "tienda.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TiendaConfig {
    /// Cart persistence.
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order link settings.
    #[serde(default)]
    pub order: OrderConfig,
}

impl TiendaConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Problems that would make the CLI misbehave, as readable messages.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.store.storage_key.trim().is_empty() {
            problems.push("store.storage_key must not be empty".to_string());
        } else if !is_valid_key(&self.store.storage_key) {
            problems.push(format!(
                "store.storage_key may only use letters, digits, '-', '_' and '.' (not leading), got '{}'",
                self.store.storage_key
            ));
        }
        if self.order.phone.is_empty() || !self.order.phone.chars().all(|c| c.is_ascii_digit()) {
            problems.push(format!(
                "order.phone must be digits only in international format, got '{}'",
                self.order.phone
            ));
        }
        if self.catalog.path.as_os_str().is_empty() {
            problems.push("catalog.path must not be empty".to_string());
        }

        problems
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Where and under which key the cart is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding persisted values, relative to the config file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".tienda")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the product JSON file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/productos.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Order link settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Contact number orders are sent to.
    #[serde(default = "default_phone")]
    pub phone: String,
}

fn default_phone() -> String {
    DEFAULT_CONTACT_PHONE.to_string()
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            phone: default_phone(),
        }
    }
}

/// Generate a default tienda.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Tienda storefront configuration

[store]
data_dir = ".tienda"
storage_key = "{DEFAULT_STORAGE_KEY}"

[catalog]
path = "data/productos.json"

[order]
phone = "{DEFAULT_CONTACT_PHONE}"
"#
    )
}
