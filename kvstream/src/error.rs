//! Stream error types

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// Access kind checked against the session's open mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Errors returned by stream sessions
#[derive(Debug, Error)]
pub enum StreamError {
    /// The open mode of the session does not permit the operation
    #[error("stream for '{key}' does not allow {access}")]
    AccessDenied { key: String, access: Access },

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid open mode: {0:?}")]
    InvalidMode(String),

    /// Not one of `SEEK_SET`, `SEEK_CUR`, `SEEK_END`
    #[error("whence {0} is not supported")]
    InvalidWhence(i32),

    /// Read or write attempted at a negative cursor
    #[error("invalid stream position: {0}")]
    InvalidPosition(i64),

    #[error("stream position overflow")]
    PositionOverflow,

    /// Write past the end while the gap policy rejects gaps
    #[error("write at position {position} is beyond the end of content ({length} bytes)")]
    WriteBeyondEnd { position: i64, length: usize },

    /// Zero-filling up to the cursor would need more memory than available
    #[error("gap up to position {position} is too large to fill (content is {length} bytes)")]
    GapTooLarge { position: i64, length: usize },

    #[error("stream is not open")]
    NotOpen,

    #[error("stream is already open")]
    AlreadyOpen,
}

impl StreamError {
    /// Map to the closest I/O error kind
    #[must_use]
    pub fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Self::AccessDenied { .. } => embedded_io::ErrorKind::PermissionDenied,
            Self::Store(StoreError::NotFound(_)) => embedded_io::ErrorKind::NotFound,
            Self::Store(StoreError::AlreadyExists(_)) => embedded_io::ErrorKind::AlreadyExists,
            Self::InvalidMode(_)
            | Self::InvalidWhence(_)
            | Self::InvalidPosition(_)
            | Self::PositionOverflow
            | Self::WriteBeyondEnd { .. }
            | Self::GapTooLarge { .. } => embedded_io::ErrorKind::InvalidInput,
            Self::Store(StoreError::Backend { .. }) | Self::NotOpen | Self::AlreadyOpen => {
                embedded_io::ErrorKind::Other
            }
        }
    }
}

impl embedded_io::Error for StreamError {
    fn kind(&self) -> embedded_io::ErrorKind {
        StreamError::kind(self)
    }
}

impl From<StreamError> for std::io::Error {
    fn from(err: StreamError) -> Self {
        let kind = match err.kind() {
            embedded_io::ErrorKind::PermissionDenied => std::io::ErrorKind::PermissionDenied,
            embedded_io::ErrorKind::NotFound => std::io::ErrorKind::NotFound,
            embedded_io::ErrorKind::AlreadyExists => std::io::ErrorKind::AlreadyExists,
            embedded_io::ErrorKind::InvalidInput => std::io::ErrorKind::InvalidInput,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
