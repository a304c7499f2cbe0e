//! Tests for LockRegistry
//!
//! These tests verify:
//! - One lock instance per collection name
//! - Distinct names get distinct locks
//! - A held lock blocks only its own collection
//! - Concurrent first use still yields a single lock

use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use scribe::storage::LockRegistry;

#[test]
fn test_acquire_same_name_returns_same_lock() {
    let registry = LockRegistry::new();

    let first = registry.acquire("users");
    let second = registry.acquire("users");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_acquire_different_names_returns_different_locks() {
    let registry = LockRegistry::new();

    let users = registry.acquire("users");
    let orders = registry.acquire("orders");

    assert!(!Arc::ptr_eq(&users, &orders));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_new_registry_is_empty() {
    let registry = LockRegistry::new();
    assert!(registry.is_empty());
}

#[test]
fn test_registries_do_not_share_locks() {
    let a = LockRegistry::new();
    let b = LockRegistry::new();

    let lock_a = a.acquire("users");
    let _guard = lock_a.lock();

    // Same name in another registry is a different lock
    let lock_b = b.acquire("users");
    assert!(lock_b.try_lock().is_some());
}

#[test]
fn test_held_lock_blocks_same_collection() {
    let registry = Arc::new(LockRegistry::new());
    let (tx, rx) = mpsc::channel();

    let holder = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            let lock = registry.acquire("users");
            let _guard = lock.lock();
            tx.send(()).unwrap();
            thread::sleep(Duration::from_millis(50));
        })
    };

    rx.recv().unwrap();

    let start = Instant::now();
    let lock = registry.acquire("users");
    let _guard = lock.lock();
    assert!(start.elapsed() >= Duration::from_millis(40));

    holder.join().unwrap();
}

#[test]
fn test_held_lock_does_not_block_registry_or_other_collections() {
    let registry = LockRegistry::new();

    let users = registry.acquire("users");
    let _guard = users.lock();

    // The registry itself is free while a collection lock is held
    let orders = registry.acquire("orders");
    assert!(orders.try_lock().is_some());
    assert!(registry.acquire("users").try_lock().is_none());
}

#[test]
fn test_concurrent_first_acquire_yields_one_lock() {
    let registry = Arc::new(LockRegistry::new());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.acquire("users")
            })
        })
        .collect();

    let locks: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(locks.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(registry.len(), 1);
}
