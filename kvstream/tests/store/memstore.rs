//! Integration tests for MemStore

use kvstream::{BackingStore, MemStore, OpenMode, StoreError, StreamBuffer};
use std::sync::Arc;

#[test]
fn test_write_then_read() {
    let store = MemStore::new();

    assert!(!store.has("test/path").unwrap());
    assert_eq!(store.write("test/path", b"hello world", true).unwrap(), 11);

    assert!(store.has("test/path").unwrap());
    assert_eq!(store.read("test/path").unwrap(), b"hello world");
}

#[test]
fn test_overwrite_replaces_whole_object() {
    let store = MemStore::new();
    store.insert("test/path", "a long initial value");

    store.write("test/path", b"short", true).unwrap();

    assert_eq!(store.read("test/path").unwrap(), b"short");
}

#[test]
fn test_write_without_overwrite() {
    let store = MemStore::new();

    store.write("test/path", b"first", false).unwrap();
    let result = store.write("test/path", b"second", false);

    match result {
        Err(StoreError::AlreadyExists(key)) => assert_eq!(key, "test/path"),
        _ => panic!("Expected AlreadyExists error"),
    }
    assert_eq!(store.get("test/path").unwrap(), b"first");
}

#[test]
fn test_read_not_found() {
    let store = MemStore::new();

    let result = store.read("nonexistent");
    match result {
        Err(StoreError::NotFound(key)) => assert_eq!(key, "nonexistent"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_helpers() {
    let store = MemStore::new();
    assert!(store.is_empty());

    store.insert("path1", "one");
    store.insert("path2", "two");
    assert_eq!(store.len(), 2);

    assert_eq!(store.remove("path1").unwrap(), b"one");
    assert!(!store.has("path1").unwrap());

    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_shared_between_threads() {
    let store = Arc::new(MemStore::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let key = format!("thread/{i}");
                let mut stream = StreamBuffer::new(&key, &store);
                assert!(stream.open(OpenMode::Exclusive.into()).unwrap());
                stream.write(key.as_bytes()).unwrap();
                stream.close().unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 4);
    assert_eq!(store.get("thread/2").unwrap(), b"thread/2");
}
