//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tienda_commerce::cart::CartManager;
use tienda_commerce::catalog::Catalog;
use tienda_commerce::checkout::OrderLinks;
use tienda_store::{FileStore, KeyValueStore, MemoryBackend};
use tracing::warn;

use crate::config::{TiendaConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Shown when the catalog file can't be read or parsed.
pub const CATALOG_LOAD_ERROR: &str = "Error al cargar los productos.";

/// Cart manager over whichever store could be opened.
pub type Cart = CartManager<Box<dyn KeyValueStore>>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: TiendaConfig,
    /// File the configuration was read from, if any.
    pub config_file: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_file) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (TiendaConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (TiendaConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_file,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(TiendaConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match TiendaConfig::load(&config_path) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => warn!(path = %config_path.display(), error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory paths in the config are relative to.
    fn base_dir(&self) -> PathBuf {
        self.config_file
            .as_deref()
            .and_then(Path::parent)
            .map(|p| if p.as_os_str().is_empty() { self.cwd.clone() } else { self.cwd.join(p) })
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a config path relative to the config file's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Open the persisted cart.
    ///
    /// Falls back to an in-memory store when the data directory can't be
    /// opened. The flag is `true` in that case: changes are lost on exit.
    pub fn open_cart(&self) -> (Cart, bool) {
        let dir = self.resolve_path(&self.config.store.data_dir);
        let key = self.config.store.storage_key.clone();

        match FileStore::open(&dir) {
            Ok(store) => {
                let store: Box<dyn KeyValueStore> = Box::new(store);
                (CartManager::with_key(store, key), false)
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cart directory unavailable; using a temporary cart");
                let store: Box<dyn KeyValueStore> = Box::new(MemoryBackend::new().connect());
                (CartManager::with_key(store, key), true)
            }
        }
    }

    /// Load the catalog named in the config.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.resolve_path(&self.config.catalog.path);
        Catalog::load(&path).context(CATALOG_LOAD_ERROR)
    }

    /// Order link builder for the configured contact.
    pub fn order_links(&self) -> OrderLinks {
        OrderLinks::new(self.config.order.phone.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_commerce::Clp;

    fn context_in(dir: &Path) -> Context {
        Context {
            config: TiendaConfig::default(),
            config_file: Some(dir.join("tienda.toml")),
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join("tienda.toml"),
            "[store]\nstorage_key = \"otro\"\n",
        )
        .unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.storage_key, "otro");
        assert_eq!(path, dir.path().join("tienda.toml"));
    }

    #[test]
    fn test_resolve_path_is_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        assert_eq!(
            ctx.resolve_path(Path::new("data/productos.json")),
            dir.path().join("data/productos.json")
        );
        assert_eq!(ctx.resolve_path(Path::new("/abs")), PathBuf::from("/abs"));
    }

    #[test]
    fn test_cart_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        let (mut cart, ephemeral) = ctx.open_cart();
        assert!(!ephemeral);
        assert!(cart.storage_available());
        cart.add_item("1", "Disco", Clp::new(10_000));
        drop(cart);

        let (cart, _) = ctx.open_cart();
        assert_eq!(cart.snapshot().item_count(), 1);
        assert_eq!(cart.snapshot().total, Clp::new(10_000));
    }

    #[test]
    fn test_unopenable_dir_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut ctx = context_in(dir.path());
        ctx.config.store.data_dir = blocker.join("carts");

        let (cart, ephemeral) = ctx.open_cart();
        assert!(ephemeral);
        assert!(cart.snapshot().is_empty());
    }

    #[test]
    fn test_missing_catalog_reports_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        let err = ctx.load_catalog().unwrap_err();
        assert_eq!(err.to_string(), CATALOG_LOAD_ERROR);
    }
}
