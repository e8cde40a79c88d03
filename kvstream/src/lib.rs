//! Seekable in-memory streams over whole-object key-value stores
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  StreamBuffer (session)             │
//! │  - open mode checks                 │
//! │  - cursor, dirty flag               │
//! │  - read / write / seek in memory    │
//! └─────────────────────────────────────┘
//!          ▲
//!          │ has / read / write, whole objects only
//!          ▼
//! ┌─────────────────────────────────────┐
//! │  BackingStore                       │
//! └─────────────────────────────────────┘
//!      ▲              ▲
//!      │              │
//!   MemStore     SqliteStore (feature "sqlitestore")
//! ```

pub mod buffer;
pub mod config;
pub mod error;
mod io_traits;
pub mod mode;
pub mod store;
pub mod whence;

// Re-export session types for convenience
pub use buffer::StreamBuffer;
pub use config::{GapPolicy, StreamConfig};
pub use error::{Access, StreamError};
pub use whence::{Whence, SEEK_CUR, SEEK_END, SEEK_SET};

// Re-export mode types for convenience
pub use mode::{Capabilities, OpenMode, StreamMode, Translation};

// Re-export store types for convenience
pub use store::{BackingStore, MemStore, StoreError};
#[cfg(feature = "sqlitestore")]
pub use store::SqliteStore;
