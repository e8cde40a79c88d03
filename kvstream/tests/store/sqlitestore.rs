//! Integration tests for SqliteStore

use kvstream::{BackingStore, OpenMode, SqliteStore, StoreError, StreamBuffer, Whence};

#[test]
fn test_write_then_read() {
    let store = SqliteStore::open_in_memory().unwrap();

    assert!(!store.has("k").unwrap());
    assert_eq!(store.write("k", b"hello", true).unwrap(), 5);

    assert!(store.has("k").unwrap());
    assert_eq!(store.read("k").unwrap(), b"hello");
}

#[test]
fn test_write_without_overwrite() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.write("k", b"first", false).unwrap();

    match store.write("k", b"second", false) {
        Err(StoreError::AlreadyExists(key)) => assert_eq!(key, "k"),
        other => panic!("Expected AlreadyExists, got {other:?}"),
    }
    assert_eq!(store.read("k").unwrap(), b"first");
}

#[test]
fn test_read_not_found() {
    let store = SqliteStore::open_in_memory().unwrap();

    assert!(matches!(store.read("missing"), Err(StoreError::NotFound(_))));
}

#[test]
fn test_empty_object_exists() {
    let store = SqliteStore::open_in_memory().unwrap();

    store.write("k", b"", true).unwrap();

    assert!(store.has("k").unwrap());
    assert!(store.read("k").unwrap().is_empty());
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("objects.db");

    {
        let store = SqliteStore::open(&db_path).unwrap();
        let mut stream = StreamBuffer::new("doc", &store);
        assert!(stream.open(OpenMode::Write.into()).unwrap());
        stream.write(b"0123456789").unwrap();
        stream.close().unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    let mut stream = StreamBuffer::new("doc", &store);
    assert!(stream.open(OpenMode::ReadPlus.into()).unwrap());
    stream.seek(3, Whence::Start).unwrap();
    stream.write(b"XY").unwrap();
    stream.close().unwrap();

    assert_eq!(store.read("doc").unwrap(), b"012XY56789");
}
