//! Observer registry for cart changes.

use crate::cart::CartSnapshot;
use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use tracing::warn;

type Observer = Rc<dyn Fn(&CartSnapshot)>;

#[derive(Default)]
struct Slots {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

/// Set of observers notified after every cart change.
///
/// Invocation order is unspecified; observers must not depend on running
/// before or after one another.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    slots: Rc<RefCell<Slots>>,
}

impl ObserverRegistry {
    pub fn subscribe(&self, observer: impl Fn(&CartSnapshot) + 'static) -> Subscription {
        let mut slots = self.slots.borrow_mut();
        slots.next_id += 1;
        let id = slots.next_id;
        slots.observers.push((id, Rc::new(observer)));
        Subscription {
            id,
            slots: Rc::downgrade(&self.slots),
        }
    }

    /// Call every observer with `snapshot`.
    ///
    /// A panicking observer is logged and skipped; the remaining observers
    /// still run. Observers may subscribe or unsubscribe while being called;
    /// such changes apply from the next broadcast.
    pub fn notify(&self, snapshot: &CartSnapshot) {
        let observers: Vec<Observer> = self
            .slots
            .borrow()
            .observers
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();

        for observer in observers {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| observer(snapshot))) {
                warn!(
                    reason = panic_reason(payload.as_ref()),
                    "cart observer panicked; continuing broadcast"
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().observers.len()
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

/// Handle returned by [`CartManager::subscribe`](crate::cart::CartManager::subscribe).
///
/// Dropping the handle leaves the observer registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    slots: Weak<RefCell<Slots>>,
}

impl Subscription {
    /// Remove the observer. Returns `false` if it was already gone
    /// (or the manager no longer exists).
    pub fn unsubscribe(self) -> bool {
        let Some(slots) = self.slots.upgrade() else {
            return false;
        };
        let mut slots = slots.borrow_mut();
        let before = slots.observers.len();
        slots.observers.retain(|(id, _)| *id != self.id);
        slots.observers.len() < before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_every_observer_runs() {
        let registry = ObserverRegistry::default();
        let calls = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let calls = Rc::clone(&calls);
            let _subscription = registry.subscribe(move |_| calls.set(calls.get() + 1));
        }
        registry.notify(&CartSnapshot::default());

        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let registry = ObserverRegistry::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = registry.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(subscription.unsubscribe());
        registry.notify(&CartSnapshot::default());

        assert_eq!(calls.get(), 0);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let registry = ObserverRegistry::default();
        let calls = Rc::new(Cell::new(0));

        let before = Rc::clone(&calls);
        let _a = registry.subscribe(move |_| before.set(before.get() + 1));
        let _b = registry.subscribe(|_| panic!("render failed"));
        let after = Rc::clone(&calls);
        let _c = registry.subscribe(move |_| after.set(after.get() + 1));

        registry.notify(&CartSnapshot::default());

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let registry = ObserverRegistry::default();
        let subscription = registry.subscribe(|_| {});
        drop(registry);

        assert!(!subscription.unsubscribe());
    }
}
