//! Fail-soft persistence adapter.

use crate::KeyValueStore;
use tracing::{debug, warn};

/// Key used for the availability probe.
pub const PROBE_KEY: &str = "__tienda_probe__";

/// Wraps a [`KeyValueStore`] so that no storage failure ever reaches the caller.
///
/// Availability is probed once at construction with a throwaway write and
/// delete. Any later read or write failure logs a warning and switches
/// persistence off for the rest of the adapter's life; from then on `load`
/// returns `None` and `save` returns `false` without touching the backend.
#[derive(Debug)]
pub struct PersistentStore<S> {
    store: S,
    available: bool,
}

impl<S> PersistentStore<S> {
    /// Whether persistence is currently enabled.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Switch persistence off after a failure detected above this layer,
    /// such as a value that no longer parses.
    pub fn mark_unavailable(&mut self, key: &str, reason: &dyn std::fmt::Display) {
        warn!(key, error = %reason, "disabling persistence");
        self.available = false;
    }
}

impl<S: KeyValueStore> PersistentStore<S> {
    /// Wrap a store and probe it.
    pub fn new(store: S) -> Self {
        let mut adapter = Self {
            store,
            available: false,
        };
        adapter.probe();
        adapter
    }

    /// Re-run the write/delete probe and update availability.
    pub fn probe(&mut self) -> bool {
        let result = self
            .store
            .set(PROBE_KEY, "1")
            .and_then(|()| self.store.remove(PROBE_KEY));

        self.available = match result {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "storage is not available; cart changes will not be saved");
                false
            }
        };
        self.available
    }

    /// Read a raw value.
    ///
    /// Returns `None` when the key is absent, when persistence is disabled, or
    /// when the read fails (which also disables persistence).
    pub fn load(&mut self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }

        match self.store.get(key) {
            Ok(value) => value,
            Err(error) => {
                self.mark_unavailable(key, &error);
                None
            }
        }
    }

    /// Write a raw value. Returns `false` if nothing was persisted.
    pub fn save(&mut self, key: &str, value: &str) -> bool {
        if !self.available {
            debug!(key, "persistence disabled; skipping save");
            return false;
        }

        match self.store.set(key, value) {
            Ok(()) => true,
            Err(error) => {
                self.mark_unavailable(key, &error);
                false
            }
        }
    }
}
