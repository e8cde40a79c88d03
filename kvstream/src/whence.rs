//! Seek origin

use crate::error::StreamError;

pub const SEEK_SET: i32 = 0;
pub const SEEK_CUR: i32 = 1;
pub const SEEK_END: i32 = 2;

/// Origin of a seek offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Whence {
    /// Absolute offset (`SEEK_SET`)
    #[default]
    Start,
    /// Relative to the cursor (`SEEK_CUR`)
    Current,
    /// Relative to the end of content (`SEEK_END`)
    End,
}

impl TryFrom<i32> for Whence {
    type Error = StreamError;

    fn try_from(whence: i32) -> Result<Self, Self::Error> {
        match whence {
            SEEK_SET => Ok(Self::Start),
            SEEK_CUR => Ok(Self::Current),
            SEEK_END => Ok(Self::End),
            other => Err(StreamError::InvalidWhence(other)),
        }
    }
}

impl From<Whence> for i32 {
    fn from(whence: Whence) -> Self {
        match whence {
            Whence::Start => SEEK_SET,
            Whence::Current => SEEK_CUR,
            Whence::End => SEEK_END,
        }
    }
}
