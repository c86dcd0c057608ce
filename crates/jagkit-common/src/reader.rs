//! Forward-only cursor for big-endian archive fields.
//!
//! This module provides [`ByteCursor`], which reads the 1-, 2-, 3- and
//! 4-byte unsigned integers used throughout JAG archive headers.

use byteorder::{BigEndian, ByteOrder};

use crate::{Compatibility, Error, Result};

/// A cursor over an immutable byte slice.
///
/// Every read is bounds-checked against the cursor's [`Compatibility`]
/// policy. A refused read returns [`Error::Truncated`] and leaves the
/// position where it was.
///
/// # Example
///
/// ```
/// use jagkit_common::ByteCursor;
///
/// let data = [0x00, 0x01, 0x02, 0x03, 0x04];
/// let mut cursor = ByteCursor::new(&data);
///
/// assert_eq!(cursor.read_u16().unwrap(), 0x0001);
/// assert_eq!(cursor.read_u24().unwrap(), 0x020304);
/// assert!(cursor.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
    compatibility: Compatibility,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor with [`Compatibility::Strict`] bounds.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self::with_compatibility(data, Compatibility::Strict)
    }

    /// Create a cursor with an explicit bounds policy.
    #[inline]
    pub const fn with_compatibility(data: &'a [u8], compatibility: Compatibility) -> Self {
        Self {
            data,
            position: 0,
            compatibility,
        }
    }

    /// Get the current position (the caret) in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes after the caret.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if the caret has reached the end of the buffer.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the bounds policy of this cursor.
    #[inline]
    pub const fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    /// Get the whole underlying buffer.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Read `count` bytes and advance the caret.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if !self
            .compatibility
            .allows_read(self.position, count, self.data.len())
        {
            return Err(Error::Truncated {
                position: self.position,
                needed: count,
                len: self.data.len(),
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read an unsigned byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    /// Read a big-endian 24-bit unsigned integer.
    #[inline]
    pub fn read_u24(&mut self) -> Result<u32> {
        self.read_bytes(3).map(BigEndian::read_u24)
    }

    /// Read a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(BigEndian::read_u32)
    }
}
