use kvstream::{MemStore, OpenMode, StreamBuffer, StreamError};
use std::io::{Read, Seek, SeekFrom, Write};

#[test]
fn std_copy_into_stream() {
    let store = MemStore::new();
    let mut stream = StreamBuffer::new("copy", &store);
    assert!(stream.open(OpenMode::Write.into()).unwrap());

    let mut source: &[u8] = b"copied through std::io";
    let n = std::io::copy(&mut source, &mut stream).unwrap();
    stream.close().unwrap();

    assert_eq!(n, 22);
    assert_eq!(store.get("copy").unwrap(), b"copied through std::io");
}

#[test]
fn std_read_to_string_after_seek() {
    let store = MemStore::new();
    store.insert("k", "header:body");
    let mut stream = StreamBuffer::new("k", &store);
    assert!(stream.open(OpenMode::Read.into()).unwrap());

    let pos = Seek::seek(&mut stream, SeekFrom::Start(7)).unwrap();
    let mut body = String::new();
    stream.read_to_string(&mut body).unwrap();

    assert_eq!(pos, 7);
    assert_eq!(body, "body");
}

#[test]
fn std_write_all_and_flush() {
    let store = MemStore::new();
    let mut stream = StreamBuffer::new("k", &store);
    assert!(stream.open(OpenMode::WritePlus.into()).unwrap());

    stream.write_all(b"abc").unwrap();
    Write::flush(&mut stream).unwrap();

    assert_eq!(store.get("k").unwrap(), b"abc");
    assert!(!stream.is_dirty());
}

#[test]
fn std_seek_refuses_negative_target() {
    let store = MemStore::new();
    store.insert("k", "abc");
    let mut stream = StreamBuffer::new("k", &store);
    assert!(stream.open(OpenMode::Read.into()).unwrap());
    Seek::seek(&mut stream, SeekFrom::Start(1)).unwrap();

    let err = Seek::seek(&mut stream, SeekFrom::End(-4)).unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert_eq!(stream.tell(), 1);
    assert_eq!(Seek::seek(&mut stream, SeekFrom::End(-1)).unwrap(), 2);
    assert_eq!(stream.stream_position().unwrap(), 2);
}

#[test]
fn std_errors_carry_kind() {
    let store = MemStore::new();
    store.insert("k", "abc");
    let mut stream = StreamBuffer::new("k", &store);
    assert!(stream.open(OpenMode::Read.into()).unwrap());

    let err = stream.write_all(b"x").unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
}

#[test]
fn embedded_io_read_write_seek() {
    use embedded_io::SeekFrom;

    let store = MemStore::new();
    let mut stream = StreamBuffer::new("k", &store);
    assert!(stream.open(OpenMode::WritePlus.into()).unwrap());

    embedded_io::Write::write_all(&mut stream, b"embedded").unwrap();
    assert_eq!(embedded_io::Seek::seek(&mut stream, SeekFrom::Start(2)).unwrap(), 2);

    let mut buf = [0u8; 3];
    embedded_io::Read::read_exact(&mut stream, &mut buf).unwrap();
    assert_eq!(&buf, b"bed");

    embedded_io::Write::flush(&mut stream).unwrap();
    assert_eq!(store.get("k").unwrap(), b"embedded");

    match embedded_io::Seek::seek(&mut stream, SeekFrom::Current(-100)) {
        Err(StreamError::InvalidPosition(-95)) => {}
        other => panic!("Expected InvalidPosition, got {other:?}"),
    }
}
