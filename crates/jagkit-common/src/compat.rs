//! Bounds policy shared by cursor reads and payload slicing.
//!
//! Archives written by the original tooling were read with two off-by-one
//! habits: a read of `n` bytes was refused unless at least one byte would
//! remain after it, and every payload slice took one byte past its declared
//! size. [`Compatibility::Legacy`] reproduces both. [`Compatibility::Strict`]
//! is the corrected behavior and the default.

use std::ops::Range;

use crate::{Error, Result};

/// Which bounds rules to apply while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Compatibility {
    /// A read may end exactly at the end of the buffer; slices are exact.
    #[default]
    Strict,
    /// A read must leave at least one byte unread (`position + n >= len`
    /// fails); slices take `size + 1` bytes, clamped to the buffer end.
    Legacy,
}

impl Compatibility {
    /// Whether a read of `count` bytes at `position` is allowed in a buffer
    /// of `len` bytes.
    #[inline]
    pub fn allows_read(self, position: usize, count: usize, len: usize) -> bool {
        match position.checked_add(count) {
            Some(end) => match self {
                Compatibility::Strict => end <= len,
                Compatibility::Legacy => end < len,
            },
            None => false,
        }
    }

    /// Resolve the byte range of a payload of `size` bytes starting at
    /// `start` inside a buffer of `len` bytes.
    ///
    /// Strict slices must fit entirely. Legacy slices are clamped the way
    /// the historical reader clamped them, so they never fail.
    pub fn payload_range(self, start: usize, size: usize, len: usize) -> Result<Range<usize>> {
        match self {
            Compatibility::Strict => match start.checked_add(size) {
                Some(end) if end <= len => Ok(start..end),
                _ => Err(Error::Truncated {
                    position: start,
                    needed: size,
                    len,
                }),
            },
            Compatibility::Legacy => {
                let start = start.min(len);
                let end = start.saturating_add(size).saturating_add(1).min(len);
                Ok(start..end)
            }
        }
    }
}
