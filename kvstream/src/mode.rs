//! Open modes for stream sessions
//!
//! A mode token follows `fopen` conventions: a base letter (`r`, `w`, `a`,
//! `x`, `c`), an optional `+` for read/write access and an optional
//! translation flag (`b` or `t`). The modifiers may appear in any order after
//! the base letter, so `"r+b"` and `"rb+"` are the same mode.
//!
//! # Capabilities
//!
//! ```text
//! token  read  write  existing  new  truncate  at end
//! r      y     -      y         -    -         -
//! r+     y     y      y         -    -         -
//! w      -     y      y         y    y         -
//! w+     y     y      y         y    y         -
//! a      -     y      y         y    -         y
//! a+     y     y      y         y    -         y
//! x      -     y      -         y    -         -
//! x+     y     y      -         y    -         -
//! c      -     y      y         y    -         -
//! c+     y     y      y         y    -         -
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::StreamError;

/// One of the ten canonical `fopen`-style mode tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// `r`: read an existing object
    Read,
    /// `r+`: read and write an existing object
    ReadPlus,
    /// `w`: write, create or truncate
    Write,
    /// `w+`: read and write, create or truncate
    WritePlus,
    /// `a`: write at the end, create if missing
    Append,
    /// `a+`: read, write at the end, create if missing
    AppendPlus,
    /// `x`: write, the object must not exist yet
    Exclusive,
    /// `x+`: read and write, the object must not exist yet
    ExclusivePlus,
    /// `c`: write, create if missing, keep existing content
    Create,
    /// `c+`: read and write, create if missing, keep existing content
    CreatePlus,
}

/// What a mode permits and what it does at open time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub read: bool,
    pub write: bool,
    pub open_existing: bool,
    pub open_new: bool,
    pub truncate: bool,
    pub cursor_at_end: bool,
}

impl Capabilities {
    const fn new(
        read: bool,
        write: bool,
        open_existing: bool,
        open_new: bool,
        truncate: bool,
        cursor_at_end: bool,
    ) -> Self {
        Self {
            read,
            write,
            open_existing,
            open_new,
            truncate,
            cursor_at_end,
        }
    }
}

impl OpenMode {
    /// All modes, in table order
    pub const ALL: [OpenMode; 10] = [
        OpenMode::Read,
        OpenMode::ReadPlus,
        OpenMode::Write,
        OpenMode::WritePlus,
        OpenMode::Append,
        OpenMode::AppendPlus,
        OpenMode::Exclusive,
        OpenMode::ExclusivePlus,
        OpenMode::Create,
        OpenMode::CreatePlus,
    ];

    /// Capability table lookup
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        //                           read   write  exist  new    trunc  end
        match self {
            Self::Read => Capabilities::new(true, false, true, false, false, false),
            Self::ReadPlus => Capabilities::new(true, true, true, false, false, false),
            Self::Write => Capabilities::new(false, true, true, true, true, false),
            Self::WritePlus => Capabilities::new(true, true, true, true, true, false),
            Self::Append => Capabilities::new(false, true, true, true, false, true),
            Self::AppendPlus => Capabilities::new(true, true, true, true, false, true),
            Self::Exclusive => Capabilities::new(false, true, false, true, false, false),
            Self::ExclusivePlus => Capabilities::new(true, true, false, true, false, false),
            Self::Create => Capabilities::new(false, true, true, true, false, false),
            Self::CreatePlus => Capabilities::new(true, true, true, true, false, false),
        }
    }

    /// Canonical token, without translation flag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadPlus => "r+",
            Self::Write => "w",
            Self::WritePlus => "w+",
            Self::Append => "a",
            Self::AppendPlus => "a+",
            Self::Exclusive => "x",
            Self::ExclusivePlus => "x+",
            Self::Create => "c",
            Self::CreatePlus => "c+",
        }
    }

    const fn from_parts(base: u8, plus: bool) -> Option<Self> {
        Some(match (base, plus) {
            (b'r', false) => Self::Read,
            (b'r', true) => Self::ReadPlus,
            (b'w', false) => Self::Write,
            (b'w', true) => Self::WritePlus,
            (b'a', false) => Self::Append,
            (b'a', true) => Self::AppendPlus,
            (b'x', false) => Self::Exclusive,
            (b'x', true) => Self::ExclusivePlus,
            (b'c', false) => Self::Create,
            (b'c', true) => Self::CreatePlus,
            _ => return None,
        })
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenMode {
    type Err = StreamError;

    /// Parse a bare token. Translation flags are rejected here, use
    /// [`StreamMode`] to accept them.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mode = StreamMode::from_str(token)?;
        if mode.translation().is_some() {
            return Err(StreamError::InvalidMode(token.to_string()));
        }
        Ok(mode.open_mode())
    }
}

impl TryFrom<&str> for OpenMode {
    type Error = StreamError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        token.parse()
    }
}

/// Translation flag of a mode token
///
/// Content is an opaque byte sequence either way; the flag is carried so the
/// mode renders back to the token it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Translation {
    /// `b`
    Binary,
    /// `t`
    Text,
}

/// Parsed open mode of a stream session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamMode {
    open: OpenMode,
    translation: Option<Translation>,
}

impl StreamMode {
    #[must_use]
    pub const fn new(open: OpenMode) -> Self {
        Self {
            open,
            translation: None,
        }
    }

    #[must_use]
    pub const fn with_translation(open: OpenMode, translation: Translation) -> Self {
        Self {
            open,
            translation: Some(translation),
        }
    }

    /// Parse a mode token such as `"r"`, `"w+"` or `"rb+"`
    ///
    /// # Errors
    ///
    /// Returns `InvalidMode` if the token is not a recognized mode.
    pub fn parse(token: &str) -> Result<Self, StreamError> {
        let invalid = || StreamError::InvalidMode(token.to_string());

        let (&base, modifiers) = token.as_bytes().split_first().ok_or_else(invalid)?;
        let mut plus = false;
        let mut translation = None;
        for &ch in modifiers {
            match ch {
                b'+' if !plus => plus = true,
                b'b' if translation.is_none() => translation = Some(Translation::Binary),
                b't' if translation.is_none() => translation = Some(Translation::Text),
                _ => return Err(invalid()),
            }
        }

        let open = OpenMode::from_parts(base, plus).ok_or_else(invalid)?;
        Ok(Self { open, translation })
    }

    #[must_use]
    pub const fn open_mode(&self) -> OpenMode {
        self.open
    }

    #[must_use]
    pub const fn translation(&self) -> Option<Translation> {
        self.translation
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.open.capabilities()
    }

    #[must_use]
    pub const fn allows_read(&self) -> bool {
        self.capabilities().read
    }

    #[must_use]
    pub const fn allows_write(&self) -> bool {
        self.capabilities().write
    }

    #[must_use]
    pub const fn allows_existing_file_opening(&self) -> bool {
        self.capabilities().open_existing
    }

    #[must_use]
    pub const fn allows_new_file_opening(&self) -> bool {
        self.capabilities().open_new
    }

    /// Truncate-on-open
    #[must_use]
    pub const fn implies_existing_content_deletion(&self) -> bool {
        self.capabilities().truncate
    }

    #[must_use]
    pub const fn implies_positioning_cursor_at_the_beginning(&self) -> bool {
        !self.capabilities().cursor_at_end
    }

    #[must_use]
    pub const fn implies_positioning_cursor_at_the_end(&self) -> bool {
        self.capabilities().cursor_at_end
    }

    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self.translation, Some(Translation::Binary))
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        !self.is_binary()
    }
}

impl From<OpenMode> for StreamMode {
    fn from(open: OpenMode) -> Self {
        Self::new(open)
    }
}

impl fmt::Display for StreamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.open.as_str())?;
        match self.translation {
            Some(Translation::Binary) => f.write_str("b"),
            Some(Translation::Text) => f.write_str("t"),
            None => Ok(()),
        }
    }
}

impl FromStr for StreamMode {
    type Err = StreamError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::parse(token)
    }
}

impl TryFrom<&str> for StreamMode {
    type Error = StreamError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        Self::parse(token)
    }
}
