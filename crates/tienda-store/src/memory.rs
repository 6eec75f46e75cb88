//! Shared in-memory store with per-connection change feeds.

use crate::{KeyValueStore, StorageEvent, StorageEvents, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{self, UnboundedSender};

/// In-memory storage shared by any number of connections.
///
/// Each [`MemoryStore`] obtained from [`MemoryBackend::connect`] plays the
/// part of one browser tab: writes through it are visible to every other
/// connection, and every *other* connection that called `watch` receives a
/// [`StorageEvent`]. The writer is never notified of its own writes.
///
/// # Example
///
/// ```rust
/// use tienda_store::{KeyValueStore, MemoryBackend};
///
/// let backend = MemoryBackend::new();
/// let tab_a = backend.connect();
/// let tab_b = backend.connect();
/// let mut feed = tab_b.watch().unwrap();
///
/// tab_a.set("carrito", "[]").unwrap();
/// assert_eq!(tab_b.get("carrito").unwrap().as_deref(), Some("[]"));
/// assert_eq!(feed.drain().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
    next_connection: u64,
    watchers: Vec<(u64, UnboundedSender<StorageEvent>)>,
}

impl Inner {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn publish(&mut self, origin: u64, event: StorageEvent) {
        self.watchers
            .retain(|(id, tx)| *id == origin || tx.send(event.clone()).is_ok());
    }
}

impl MemoryBackend {
    /// Create an empty backend with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend that rejects writes past `bytes` (keys plus values).
    pub fn with_quota(bytes: usize) -> Self {
        let backend = Self::new();
        backend.lock().quota = Some(bytes);
        backend
    }

    /// Open a new connection.
    pub fn connect(&self) -> MemoryStore {
        let mut inner = self.lock();
        inner.next_connection += 1;
        MemoryStore {
            backend: self.clone(),
            id: inner.next_connection,
        }
    }

    /// Switch the whole backend off or on.
    ///
    /// While disabled every operation fails with [`StoreError::Unavailable`].
    pub fn set_disabled(&self, disabled: bool) {
        self.lock().disabled = disabled;
    }

    /// Write a value without notifying anyone, e.g. to seed a test fixture.
    pub fn seed(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().entries.insert(key.into(), value.into());
    }

    /// Read a value directly, bypassing the disabled switch.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Check if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One connection to a [`MemoryBackend`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    backend: MemoryBackend,
    id: u64,
}

impl MemoryStore {
    /// Remove every key, notifying other connections with a keyless event.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.enabled()?;
        inner.entries.clear();
        inner.publish(
            self.id,
            StorageEvent {
                key: None,
                old_value: None,
                new_value: None,
            },
        );
        Ok(())
    }

    fn enabled(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let inner = self.backend.lock();
        if inner.disabled {
            return Err(StoreError::Unavailable);
        }
        Ok(inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.enabled()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.enabled()?;

        if let Some(quota) = inner.quota {
            let needed = inner.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        let old_value = inner.entries.insert(key.to_string(), value.to_string());
        inner.publish(
            self.id,
            StorageEvent {
                key: Some(key.to_string()),
                old_value,
                new_value: Some(value.to_string()),
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.enabled()?;
        if let Some(old_value) = inner.entries.remove(key) {
            inner.publish(
                self.id,
                StorageEvent {
                    key: Some(key.to_string()),
                    old_value: Some(old_value),
                    new_value: None,
                },
            );
        }
        Ok(())
    }

    fn watch(&self) -> Option<StorageEvents> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.backend.lock().watchers.push((self.id, tx));
        Some(StorageEvents::new(rx))
    }
}
