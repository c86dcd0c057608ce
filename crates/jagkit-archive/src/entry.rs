//! JAG archive entry.

use jagkit_common::hash::hash_name;

/// A decoded entry (file) within a JAG archive.
///
/// Archives key entries by name hash only; the name itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Hash of the entry name.
    hash: u32,
    /// Decoded entry contents.
    data: Vec<u8>,
}

impl Entry {
    /// Create an entry from a raw name hash and its contents.
    pub fn new(hash: u32, data: Vec<u8>) -> Self {
        Self { hash, data }
    }

    /// Create an entry keyed by the hash of `name`.
    pub fn named(name: &str, data: Vec<u8>) -> Self {
        Self::new(hash_name(name), data)
    }

    /// Get the name hash.
    #[inline]
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Get the entry contents.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the size of the contents in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the entry has no contents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
