//! In-memory stream buffer over a backing store
//!
//! A `StreamBuffer` gives POSIX-like stream access (read, write, seek, tell,
//! eof) to one object of a [`BackingStore`]. The store only knows whole
//! objects, so the session keeps the full content in memory:
//!
//! - `open` loads the object once (or truncates it, depending on the mode)
//! - `read`, `write`, `seek` work on the in-memory copy only
//! - `flush` and `close` write the object back, and only if it changed
//!
//! Nothing is flushed implicitly. Call `close` on every path, or use
//! [`StreamBuffer::scoped`] which does it for you.
//!
//! # Example
//!
//! ```
//! use kvstream::{MemStore, OpenMode, StreamBuffer, Whence};
//!
//! let store = MemStore::new();
//! let mut stream = StreamBuffer::new("a", &store);
//! assert!(stream.open(OpenMode::WritePlus.into()).unwrap());
//!
//! stream.write(b"hello").unwrap();
//! stream.seek(0, Whence::Start).unwrap();
//! assert_eq!(stream.read(5).unwrap(), b"hello");
//!
//! stream.close().unwrap();
//! assert_eq!(store.get("a").unwrap(), b"hello");
//! ```

use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::{GapPolicy, StreamConfig};
use crate::error::{Access, StreamError};
use crate::mode::StreamMode;
use crate::store::BackingStore;
use crate::whence::Whence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Constructed, `open` not called yet
    Idle,
    /// `open` was called and did not succeed; the session is unusable
    Rejected,
    Open,
    Closed,
}

/// Stream session over one object of a backing store
pub struct StreamBuffer<'s, S: BackingStore + ?Sized> {
    key: String,
    store: &'s S,
    config: StreamConfig,
    state: State,
    mode: Option<StreamMode>,
    content: Vec<u8>,
    position: i64,
    dirty: bool,
}

impl<'s, S: BackingStore + ?Sized> StreamBuffer<'s, S> {
    #[must_use]
    pub fn new(key: &str, store: &'s S) -> Self {
        Self::with_config(key, store, StreamConfig::default())
    }

    #[must_use]
    pub fn with_config(key: &str, store: &'s S, config: StreamConfig) -> Self {
        Self {
            key: key.to_string(),
            store,
            config,
            state: State::Idle,
            mode: None,
            content: Vec::new(),
            position: 0,
            dirty: false,
        }
    }

    /// Open the session.
    ///
    /// Returns `Ok(false)` if the mode does not permit opening the object in
    /// its current state (existing key with `x`, missing key with `r`). In
    /// that case the store is neither read nor written.
    ///
    /// A truncating mode writes an empty object right away. A mode that may
    /// create the object does not touch the store for a missing key: the
    /// object appears on the first flush.
    ///
    /// # Errors
    ///
    /// - `AlreadyOpen` if `open` was called before on this session
    /// - `Store` if the backing store fails
    pub fn open(&mut self, mode: StreamMode) -> Result<bool, StreamError> {
        if self.state != State::Idle {
            return Err(StreamError::AlreadyOpen);
        }
        self.state = State::Rejected;

        let exists = self.store.has(&self.key)?;
        if (exists && !mode.allows_existing_file_opening())
            || (!exists && !mode.allows_new_file_opening())
        {
            debug!(key = %self.key, %mode, exists, "open rejected by mode");
            return Ok(false);
        }

        let content = if mode.implies_existing_content_deletion() {
            self.store.write(&self.key, b"", true)?;
            Vec::new()
        } else if exists {
            self.store.read(&self.key)?
        } else {
            Vec::new()
        };

        self.content = content;
        self.position = if mode.implies_positioning_cursor_at_the_end() {
            self.end()
        } else {
            0
        };
        self.mode = Some(mode);
        self.dirty = false;
        self.state = State::Open;

        debug!(key = %self.key, %mode, exists, length = self.content.len(), "opened");
        Ok(true)
    }

    /// Read up to `count` bytes at the cursor and advance it.
    ///
    /// Returns fewer bytes near the end of content and none at or past it.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if the mode does not allow reading
    /// - `InvalidPosition` if the cursor is negative
    pub fn read(&mut self, count: usize) -> Result<Vec<u8>, StreamError> {
        self.check(Access::Read)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let chunk = self.available(count)?.to_vec();
        self.advance(chunk.len());
        trace!(key = %self.key, position = self.position, count, got = chunk.len(), "read");
        Ok(chunk)
    }

    /// Read into `buf` at the cursor and advance it.
    ///
    /// # Errors
    ///
    /// Same as [`StreamBuffer::read`].
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        self.check(Access::Read)?;
        if buf.is_empty() {
            return Ok(0);
        }
        let chunk = self.available(buf.len())?;
        let n = chunk.len();
        buf[..n].copy_from_slice(chunk);
        self.advance(n);
        trace!(key = %self.key, position = self.position, got = n, "read_into");
        Ok(n)
    }

    /// Write `data` at the cursor and advance it.
    ///
    /// Bytes under the written range are replaced, bytes after it are kept,
    /// and content grows when the write runs past the end. Nothing reaches
    /// the backing store until `flush` or `close`.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if the mode does not allow writing
    /// - `InvalidPosition` if the cursor is negative
    /// - `WriteBeyondEnd` if the cursor is past the end and the gap policy
    ///   is `Reject`
    /// - `GapTooLarge` if the zero-filled gap cannot be allocated
    /// - `PositionOverflow` if the cursor would overflow
    ///
    /// On error the session state is unchanged.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        self.check(Access::Write)?;
        if data.is_empty() {
            return Ok(0);
        }

        let start = self.cursor()?;
        let written = i64::try_from(data.len()).map_err(|_| StreamError::PositionOverflow)?;
        let new_position = self
            .position
            .checked_add(written)
            .ok_or(StreamError::PositionOverflow)?;

        if start > self.content.len() {
            match self.config.gap_policy {
                GapPolicy::Reject => {
                    return Err(StreamError::WriteBeyondEnd {
                        position: self.position,
                        length: self.content.len(),
                    });
                }
                GapPolicy::ZeroFill => {
                    let additional = start.saturating_add(data.len()) - self.content.len();
                    if self.content.try_reserve(additional).is_err() {
                        warn!(key = %self.key, position = self.position, additional, "gap too large to allocate");
                        return Err(StreamError::GapTooLarge {
                            position: self.position,
                            length: self.content.len(),
                        });
                    }
                    self.content.resize(start, 0);
                }
            }
        }

        // Overwrite what exists under the range, append the rest
        let end = self.content.len().min(start.saturating_add(data.len()));
        let (inside, beyond) = data.split_at(end - start);
        self.content[start..end].copy_from_slice(inside);
        self.content.extend_from_slice(beyond);

        self.position = new_position;
        self.dirty = true;
        trace!(key = %self.key, position = self.position, count = data.len(), length = self.content.len(), "write");
        Ok(data.len())
    }

    /// Move the cursor.
    ///
    /// Positions past the end or below zero are accepted here; `read` and
    /// `write` decide what they mean.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if the session is not open
    /// - `PositionOverflow` if the target does not fit an `i64`
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<(), StreamError> {
        self.check_open()?;
        self.position = self.seek_target(offset, whence)?;
        trace!(key = %self.key, offset, ?whence, position = self.position, "seek");
        Ok(())
    }

    /// Like [`StreamBuffer::seek`], with a raw `SEEK_*` constant.
    ///
    /// # Errors
    ///
    /// `InvalidWhence` for anything but `SEEK_SET`, `SEEK_CUR`, `SEEK_END`.
    pub fn seek_raw(&mut self, offset: i64, whence: i32) -> Result<(), StreamError> {
        self.seek(offset, Whence::try_from(whence)?)
    }

    pub(crate) fn seek_target(&self, offset: i64, whence: Whence) -> Result<i64, StreamError> {
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => self.position,
            Whence::End => self.end(),
        };
        base.checked_add(offset).ok_or(StreamError::PositionOverflow)
    }

    #[must_use]
    pub fn tell(&self) -> i64 {
        self.position
    }

    #[must_use]
    pub fn eof(&self) -> bool {
        self.position >= self.end()
    }

    /// Write the content back to the store if it changed since the last
    /// synchronization.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if the session is not open
    /// - `Store` if the write fails; content and dirty flag are kept, so
    ///   the flush can be retried
    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.check_open()?;
        if !self.dirty {
            return Ok(());
        }

        match self.store.write(&self.key, &self.content, true) {
            Ok(bytes) => {
                self.dirty = false;
                debug!(key = %self.key, bytes, "flushed");
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "flush failed");
                Err(e.into())
            }
        }
    }

    /// Flush if needed and end the session.
    ///
    /// Can be called multiple times. If the flush fails the session stays
    /// open and dirty, and the error is returned.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if the session was never opened
    /// - `Store` if the final flush fails
    pub fn close(&mut self) -> Result<(), StreamError> {
        match self.state {
            State::Closed => return Ok(()),
            State::Idle | State::Rejected => return Err(StreamError::NotOpen),
            State::Open => {}
        }
        if self.dirty {
            self.flush()?;
        }
        self.state = State::Closed;
        self.content = Vec::new();
        debug!(key = %self.key, "closed");
        Ok(())
    }

    /// Open, run `f`, and close on every exit path.
    ///
    /// Returns `Ok(None)` if the mode rejects the open. If `f` fails, the
    /// session is still closed and the error of `f` is returned; a close
    /// failure is then only logged.
    ///
    /// # Errors
    ///
    /// The error of `open`, of `f`, or of the final `close`.
    pub fn scoped<T, E, F>(mut self, mode: StreamMode, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StreamError>,
    {
        if !self.open(mode)? {
            return Ok(None);
        }
        match f(&mut self) {
            Ok(value) => {
                self.close()?;
                Ok(Some(value))
            }
            Err(e) => {
                if let Err(close_err) = self.close() {
                    warn!(key = %self.key, error = %close_err, "close after failure");
                }
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn mode(&self) -> Option<StreamMode> {
        self.mode
    }

    #[must_use]
    pub fn config(&self) -> StreamConfig {
        self.config
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    /// Content changed since the last synchronization with the store
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    fn check_open(&self) -> Result<(), StreamError> {
        if self.state == State::Open {
            Ok(())
        } else {
            Err(StreamError::NotOpen)
        }
    }

    fn check(&self, access: Access) -> Result<(), StreamError> {
        self.check_open()?;
        let allowed = self.mode.is_some_and(|mode| match access {
            Access::Read => mode.allows_read(),
            Access::Write => mode.allows_write(),
        });
        if allowed {
            Ok(())
        } else {
            Err(StreamError::AccessDenied {
                key: self.key.clone(),
                access,
            })
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn end(&self) -> i64 {
        self.content.len() as i64
    }

    /// Cursor as an index into content
    fn cursor(&self) -> Result<usize, StreamError> {
        if self.position < 0 {
            return Err(StreamError::InvalidPosition(self.position));
        }
        usize::try_from(self.position).map_err(|_| StreamError::PositionOverflow)
    }

    fn available(&self, count: usize) -> Result<&[u8], StreamError> {
        if self.position < 0 {
            return Err(StreamError::InvalidPosition(self.position));
        }
        // A cursor beyond usize is beyond the end as well
        let start = usize::try_from(self.position).unwrap_or(usize::MAX);
        if start >= self.content.len() {
            return Ok(&[]);
        }
        let end = self.content.len().min(start.saturating_add(count));
        Ok(&self.content[start..end])
    }

    #[allow(clippy::cast_possible_wrap)]
    fn advance(&mut self, n: usize) {
        self.position += n as i64;
    }
}

impl<S: BackingStore + ?Sized> Drop for StreamBuffer<'_, S> {
    fn drop(&mut self) {
        if self.state == State::Open && self.dirty {
            warn!(key = %self.key, bytes = self.content.len(), "dropping unflushed stream");
        }
    }
}

impl<S: BackingStore + ?Sized> fmt::Debug for StreamBuffer<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBuffer")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("length", &self.content.len())
            .field("position", &self.position)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
