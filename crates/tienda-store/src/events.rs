//! Storage change notifications.

use tokio::sync::mpsc::UnboundedReceiver;

/// A change made to the store by another connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Key that changed. `None` when the whole store was cleared.
    pub key: Option<String>,
    /// Value before the change.
    pub old_value: Option<String>,
    /// Value after the change. `None` for removals.
    pub new_value: Option<String>,
}

impl StorageEvent {
    /// Whether this event can affect the value stored under `key`.
    ///
    /// A clear (no key) concerns every key.
    pub fn concerns(&self, key: &str) -> bool {
        self.key.as_deref().map_or(true, |k| k == key)
    }
}

/// Receiving end of a connection's change feed.
#[derive(Debug)]
pub struct StorageEvents {
    rx: UnboundedReceiver<StorageEvent>,
}

impl StorageEvents {
    pub(crate) fn new(rx: UnboundedReceiver<StorageEvent>) -> Self {
        Self { rx }
    }

    /// Take every event delivered so far without blocking.
    ///
    /// Needs no async runtime.
    pub fn drain(&mut self) -> Vec<StorageEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(key: Option<&str>) -> StorageEvent {
        StorageEvent {
            key: key.map(str::to_string),
            old_value: None,
            new_value: None,
        }
    }

    #[test]
    fn test_concerns_matching_key() {
        assert!(event(Some("carrito")).concerns("carrito"));
        assert!(!event(Some("favoritos")).concerns("carrito"));
    }

    #[test]
    fn test_clear_concerns_every_key() {
        assert!(event(None).concerns("carrito"));
    }

    #[test]
    fn test_drain_takes_everything_delivered() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let mut feed = StorageEvents::new(rx);
        assert!(feed.drain().is_empty());

        tx.send(event(Some("carrito"))).unwrap();
        tx.send(event(None)).unwrap();
        assert_eq!(feed.drain(), vec![event(Some("carrito")), event(None)]);
        assert!(feed.drain().is_empty());

        // a closed channel drains to nothing instead of blocking
        drop(tx);
        assert!(feed.drain().is_empty());
    }
}
