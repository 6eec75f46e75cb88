//! Key-value persistence for the storefront cart.
//!
//! Provides a small storage abstraction modelled on browser local storage:
//!
//! - **`KeyValueStore`**: string keys to string values, plus an optional change feed
//! - **`MemoryBackend`**: shared in-memory store; each connection behaves like a tab
//! - **`FileStore`**: one file per key under a directory
//! - **`PersistentStore`**: the fail-soft adapter the cart manager talks to
//!
//! # Example
//!
//! ```rust
//! use tienda_store::{MemoryBackend, PersistentStore};
//!
//! let backend = MemoryBackend::new();
//! let mut storage = PersistentStore::new(backend.connect());
//! assert!(storage.is_available());
//!
//! storage.save("carrito", r#"{"items":[]}"#);
//! assert_eq!(storage.load("carrito").as_deref(), Some(r#"{"items":[]}"#));
//! ```

mod adapter;
mod error;
mod events;
mod file;
mod kv;
mod memory;

pub use adapter::{PersistentStore, PROBE_KEY};
pub use error::StoreError;
pub use events::{StorageEvent, StorageEvents};
pub use file::{is_valid_key, FileStore};
pub use kv::KeyValueStore;
pub use memory::{MemoryBackend, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FileStore, KeyValueStore, MemoryBackend, MemoryStore, PersistentStore, StorageEvent,
        StorageEvents, StoreError,
    };
}
