//! Two managers sharing one backend, standing in for two open tabs.

use std::cell::RefCell;
use std::rc::Rc;

use tienda_commerce::cart::DEFAULT_STORAGE_KEY;
use tienda_commerce::prelude::*;
use tienda_store::{KeyValueStore, MemoryBackend, MemoryStore, StorageEvent};

fn two_tabs() -> (MemoryBackend, CartManager<MemoryStore>, CartManager<MemoryStore>) {
    let backend = MemoryBackend::new();
    let a = CartManager::new(backend.connect());
    let b = CartManager::new(backend.connect());
    (backend, a, b)
}

#[test]
fn test_tabs_converge_after_write() {
    let (_backend, mut a, mut b) = two_tabs();

    a.add_item("A", "Tape", Clp::new(3000));
    a.add_item("A", "Tape", Clp::new(3000));

    assert!(b.snapshot().is_empty());
    assert!(b.sync_storage_events());
    assert_eq!(b.snapshot(), a.snapshot());

    b.remove_one(&ProductId::new("A"));
    assert!(a.sync_storage_events());
    assert_eq!(a.snapshot().items[0].quantity, 1);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_writer_does_not_reload_itself() {
    let (_backend, mut a, _b) = two_tabs();

    a.add_item("A", "Tape", Clp::new(3000));

    assert!(!a.sync_storage_events());
}

#[test]
fn test_sync_notifies_observers_once() {
    let (_backend, mut a, mut b) = two_tabs();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _subscription = b.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.item_count()));

    a.add_item("A", "Tape", Clp::new(3000));
    a.add_item("B", "Tape2", Clp::new(5000));
    a.add_item("B", "Tape2", Clp::new(5000));
    b.sync_storage_events();

    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn test_unrelated_keys_are_ignored() {
    let backend = MemoryBackend::new();
    let other_tab = backend.connect();
    let mut cart = CartManager::new(backend.connect());

    other_tab.set("favoritos", "[]").unwrap();

    assert!(!cart.sync_storage_events());
}

#[test]
fn test_store_clear_empties_other_tabs() {
    let backend = MemoryBackend::new();
    let mut a = CartManager::new(backend.connect());
    let other_tab = backend.connect();
    a.add_item("A", "Tape", Clp::new(3000));

    other_tab.clear().unwrap();

    assert!(a.sync_storage_events());
    assert!(a.snapshot().is_empty());
    assert_eq!(a.snapshot().total, Clp::ZERO);
}

#[test]
fn test_last_write_wins() {
    let (_backend, mut a, mut b) = two_tabs();

    // both tabs add the same product before either syncs
    a.add_item("A", "Tape", Clp::new(3000));
    b.add_item("A", "Tape", Clp::new(3000));

    a.sync_storage_events();
    b.sync_storage_events();

    // b wrote last; its quantity replaces a's instead of adding to it
    assert_eq!(a.snapshot().items[0].quantity, 1);
    assert_eq!(b.snapshot().items[0].quantity, 1);
}

#[test]
fn test_corrupted_external_write_disables_persistence() {
    let backend = MemoryBackend::new();
    let mut cart = CartManager::new(backend.connect());
    let other_tab = backend.connect();
    cart.add_item("A", "Tape", Clp::new(3000));

    other_tab.set(DEFAULT_STORAGE_KEY, "{oops").unwrap();

    assert!(cart.sync_storage_events());
    assert!(cart.snapshot().is_empty());
    assert!(!cart.storage_available());
}

#[test]
fn test_handle_storage_event_directly() {
    let backend = MemoryBackend::new();
    let writer = backend.connect();
    let mut cart = CartManager::new(backend.connect());

    writer
        .set(
            DEFAULT_STORAGE_KEY,
            r#"[{"id": "A", "nombre": "Tape", "precio": 3000, "cantidad": 2}]"#,
        )
        .unwrap();

    let unrelated = StorageEvent {
        key: Some("favoritos".to_string()),
        old_value: None,
        new_value: None,
    };
    assert!(!cart.handle_storage_event(&unrelated));
    assert!(cart.snapshot().is_empty());

    let ours = StorageEvent {
        key: Some(DEFAULT_STORAGE_KEY.to_string()),
        old_value: None,
        new_value: None,
    };
    assert!(cart.handle_storage_event(&ours));
    assert_eq!(cart.snapshot().total, Clp::new(6000));
}

#[test]
fn test_legacy_payload_hydrates_with_recomputed_total() {
    let backend = MemoryBackend::new();
    backend.seed(
        DEFAULT_STORAGE_KEY,
        r#"[{"id": "A", "nombre": "Tape", "precio": 3000, "cantidad": 2},
            {"id": "B", "nombre": "Tape2", "precio": 5000}]"#,
    );

    let cart = CartManager::new(backend.connect());
    let snapshot = cart.snapshot();

    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[1].quantity, 1);
    assert_eq!(snapshot.total, Clp::new(11000));
    assert!(cart.storage_available());
}

#[test]
fn test_stored_total_is_not_trusted() {
    let backend = MemoryBackend::new();
    backend.seed(
        DEFAULT_STORAGE_KEY,
        r#"{"items": [{"id": "A", "nombre": "Tape", "precio": 3000, "cantidad": 1}], "total": 1, "actualizado": null}"#,
    );

    let cart = CartManager::new(backend.connect());

    assert_eq!(cart.snapshot().total, Clp::new(3000));
}
