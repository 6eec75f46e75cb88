//! The cart state manager.

use crate::cart::item::recompute_total;
use crate::cart::observer::ObserverRegistry;
use crate::cart::persisted::CartState;
use crate::cart::{CartItem, CartSnapshot, Subscription};
use crate::ids::ProductId;
use crate::money::Clp;
use chrono::{SubsecRound, Utc};
use tienda_store::{KeyValueStore, PersistentStore, StorageEvent, StorageEvents};
use tracing::{debug, warn};

/// Storage key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "carrito";

/// Owner of the cart.
///
/// Every mutation follows the same sequence: update the in-memory lines,
/// recompute the total and stamp the time, persist, then broadcast a fresh
/// snapshot to every observer. Persistence failures never surface here; the
/// cart keeps working in memory and [`storage_available`](Self::storage_available)
/// turns false.
///
/// Changes written by another manager sharing the same backend arrive
/// through the store's change feed and are applied by
/// [`sync_storage_events`](Self::sync_storage_events). Two managers writing
/// at the same moment race at the storage layer: the last write wins and
/// quantities are not merged.
///
/// # Example
///
/// ```rust
/// use tienda_commerce::prelude::*;
/// use tienda_store::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// let mut cart = CartManager::new(backend.connect());
///
/// cart.add_item("A", "Tape", Clp::new(3000));
/// cart.add_item("B", "Tape2", Clp::new(5000));
/// let snapshot = cart.add_item("A", "Tape", Clp::new(3000));
///
/// assert_eq!(snapshot.items[0].quantity, 2);
/// assert_eq!(snapshot.total, Clp::new(11000));
/// ```
pub struct CartManager<S> {
    storage: PersistentStore<S>,
    storage_key: String,
    state: CartState,
    observers: ObserverRegistry,
    storage_events: Option<StorageEvents>,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Create a manager persisting under [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create a manager persisting under `storage_key`, hydrating from
    /// whatever is stored there.
    pub fn with_key(store: S, storage_key: impl Into<String>) -> Self {
        let storage_events = store.watch();
        let mut manager = Self {
            storage: PersistentStore::new(store),
            storage_key: storage_key.into(),
            state: CartState::default(),
            observers: ObserverRegistry::default(),
            storage_events,
        };
        manager.state = manager.hydrate();
        manager
    }

    /// Current cart contents.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.state.items.clone(),
            total: self.state.total,
            last_updated: self.state.last_updated,
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing line only has its quantity incremented; the name and price
    /// recorded when it was first added are kept.
    pub fn add_item(
        &mut self,
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Clp,
    ) -> CartSnapshot {
        let id = id.into();
        match self.state.items.iter_mut().find(|i| i.id == id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.state.items.push(CartItem::new(id, name, unit_price)),
        }
        self.commit("add")
    }

    /// Remove one unit of a product, dropping the line when it reaches zero.
    ///
    /// Removing a product that isn't in the cart changes nothing: no stamp,
    /// no write, no broadcast.
    pub fn remove_one(&mut self, id: &ProductId) -> CartSnapshot {
        let Some(index) = self.state.items.iter().position(|i| &i.id == id) else {
            return self.snapshot();
        };

        if self.state.items[index].quantity > 1 {
            self.state.items[index].quantity -= 1;
        } else {
            self.state.items.remove(index);
        }
        self.commit("remove_one")
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartSnapshot {
        self.state.items.clear();
        self.commit("clear")
    }

    /// Register an observer called with a fresh snapshot after every change,
    /// including changes arriving from other managers.
    pub fn subscribe(&self, observer: impl Fn(&CartSnapshot) + 'static) -> Subscription {
        self.observers.subscribe(observer)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Whether changes are being persisted.
    pub fn storage_available(&self) -> bool {
        self.storage.is_available()
    }

    /// Key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Apply changes made by other writers to the shared store.
    ///
    /// Drains the store's change feed; if any event concerns this cart's key,
    /// the cart is re-hydrated and observers are notified once. Returns
    /// whether a reload happened.
    pub fn sync_storage_events(&mut self) -> bool {
        let Some(events) = &mut self.storage_events else {
            return false;
        };
        let relevant = events
            .drain()
            .iter()
            .any(|event| event.concerns(&self.storage_key));

        if relevant {
            self.reload_from_storage();
        }
        relevant
    }

    /// Apply a single change notification delivered by the caller's own
    /// event loop. Events for other keys are ignored.
    pub fn handle_storage_event(&mut self, event: &StorageEvent) -> bool {
        if !event.concerns(&self.storage_key) {
            return false;
        }
        self.reload_from_storage();
        true
    }

    fn reload_from_storage(&mut self) {
        if !self.storage.is_available() {
            debug!(key = %self.storage_key, "storage disabled; ignoring external change");
            return;
        }
        self.state = self.hydrate();
        debug!(
            key = %self.storage_key,
            items = self.state.items.len(),
            "cart reloaded after external change"
        );
        self.broadcast();
    }

    /// Read the stored cart. Absent means empty; anything unreadable also
    /// means empty and disables persistence.
    fn hydrate(&mut self) -> CartState {
        let Some(raw) = self.storage.load(&self.storage_key) else {
            return CartState::default();
        };
        if raw.trim().is_empty() {
            return CartState::default();
        }

        match CartState::decode(&raw) {
            Ok(state) => state,
            Err(error) => {
                warn!(key = %self.storage_key, %error, "stored cart is corrupted; starting empty");
                self.storage.mark_unavailable(&self.storage_key, &error);
                CartState::default()
            }
        }
    }

    fn commit(&mut self, operation: &'static str) -> CartSnapshot {
        self.state.total = recompute_total(&self.state.items);
        // stored with millisecond precision
        self.state.last_updated = Some(Utc::now().trunc_subsecs(3));
        debug!(
            operation,
            items = self.state.items.len(),
            total = self.state.total.pesos(),
            "cart updated"
        );
        self.persist();
        self.broadcast()
    }

    fn persist(&mut self) {
        match self.state.encode() {
            Ok(raw) => {
                self.storage.save(&self.storage_key, &raw);
            }
            Err(error) => {
                warn!(key = %self.storage_key, %error, "failed to serialize cart");
            }
        }
    }

    fn broadcast(&self) -> CartSnapshot {
        let snapshot = self.snapshot();
        self.observers.notify(&snapshot);
        snapshot
    }
}

impl<S> std::fmt::Debug for CartManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("storage_key", &self.storage_key)
            .field("storage_available", &self.storage.is_available())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
