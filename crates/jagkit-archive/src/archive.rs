//! In-memory JAG archive.

use std::path::Path;

use jagkit_common::hash::hash_name;
use rustc_hash::FxHashMap;

use crate::loader::{self, LoadOptions};
use crate::source::{ByteSource, FileSource};
use crate::{Entry, Error, Result};

/// A fully decoded JAG archive.
///
/// Entries keep the order of the archive's entry table. Lookups go through
/// a hash index that remembers the first entry for each name hash, so a
/// repeated hash always resolves to its earliest entry.
#[derive(Clone, Default)]
pub struct Archive {
    /// Entries in table order
    entries: Vec<Entry>,
    /// Name hash to index of first matching entry
    index: FxHashMap<u32, usize>,
}

impl Archive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an archive from already decoded entries.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.hash()).or_insert(i);
        }

        Self { entries, index }
    }

    /// Load an archive from a file using default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(&FileSource::new(path), &LoadOptions::default())
    }

    /// Decode an archive blob using default options.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        loader::load_archive(bytes)
    }

    /// Fetch every byte from `source` and decode it.
    pub fn load<S: ByteSource>(source: &S, options: &LoadOptions) -> Result<Self> {
        let bytes = source.read_all()?;
        loader::load_archive_with(bytes.as_ref(), options)
    }

    /// Get the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the archive has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all entries in table order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate over entries in table order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Iterate over `(index, entry)` pairs in table order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, &Entry)> + '_ {
        self.entries.iter().enumerate()
    }

    /// Get entry by table index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Find the first entry with the given name hash.
    pub fn get_by_hash(&self, hash: u32) -> Option<&Entry> {
        self.index.get(&hash).map(|&i| &self.entries[i])
    }

    /// Find an entry by name (case-insensitive) and return its contents.
    pub fn lookup(&self, name: &str) -> Option<&[u8]> {
        self.get_by_hash(hash_name(name)).map(Entry::data)
    }

    /// Like [`Archive::lookup`], but a missing entry is an error.
    pub fn require(&self, name: &str) -> Result<&[u8]> {
        self.lookup(name)
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))
    }
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("entries", &self.entries.len())
            .finish()
    }
}
