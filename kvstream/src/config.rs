//! Stream session configuration

/// What a write does when the cursor is past the end of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Pad the gap with zero bytes, like a sparse POSIX file
    #[default]
    ZeroFill,
    /// Fail the write with `WriteBeyondEnd`
    Reject,
}

/// Configuration for a stream session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamConfig {
    pub gap_policy: GapPolicy,
}

impl StreamConfig {
    #[must_use]
    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }
}
