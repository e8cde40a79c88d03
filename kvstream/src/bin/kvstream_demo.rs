//! StreamBuffer CLI Demo
//!
//! Appends stdin lines to an object, then reads the whole object back.
//!
//! Usage: `kvstream_demo [KEY] [MODE]` (defaults: `demo.txt`, `a+`).
//! With the `sqlitestore` feature, `KVSTREAM_DB=<path>` persists objects in
//! SQLite between runs. `RUST_LOG=debug` shows the stream lifecycle.

use kvstream::{BackingStore, MemStore, StreamBuffer, StreamMode, Whence};
use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let key = args.next().unwrap_or_else(|| "demo.txt".to_string());
    let mode: StreamMode = args.next().as_deref().unwrap_or("a+").parse()?;

    let store = open_store()?;
    let mut stream = StreamBuffer::new(&key, &*store);
    if !stream.open(mode)? {
        eprintln!("Mode {mode} does not allow opening '{key}'");
        return Ok(());
    }

    println!("Enter text (empty line to quit):");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        stream.write(trimmed.as_bytes())?;
        stream.write(b"\n")?;
    }

    if mode.allows_read() {
        stream.seek(0, Whence::Start)?;
        let content = stream.read(stream.len())?;
        println!("--- {key} ({} bytes) ---", content.len());
        print!("{}", String::from_utf8_lossy(&content));
    }

    stream.close()?;
    println!("Stream closed");
    Ok(())
}

#[cfg(feature = "sqlitestore")]
fn open_store() -> Result<Box<dyn BackingStore>, Box<dyn std::error::Error>> {
    match std::env::var("KVSTREAM_DB") {
        Ok(path) => Ok(Box::new(kvstream::SqliteStore::open(path)?)),
        Err(_) => Ok(Box::new(MemStore::new())),
    }
}

#[cfg(not(feature = "sqlitestore"))]
fn open_store() -> Result<Box<dyn BackingStore>, Box<dyn std::error::Error>> {
    Ok(Box::new(MemStore::new()))
}
