//! Error types for the archive crate.

use std::fmt;

use thiserror::Error;

/// Where a decompression failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole-archive payload.
    Archive,
    /// The entry at this table index.
    Entry(usize),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Archive => write!(f, "archive payload"),
            Scope::Entry(index) => write!(f, "entry {index}"),
        }
    }
}

/// Field of a per-entry header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Hash,
    DecompressedSize,
    CompressedSize,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeaderField::Hash => "hash",
            HeaderField::DecompressedSize => "decompressed size",
            HeaderField::CompressedSize => "compressed size",
        })
    }
}

/// Errors that can occur when loading or reading JAG archives.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while fetching archive bytes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The 7-byte top-level header could not be read.
    #[error("failed to read archive header: {0}")]
    Header(#[source] jagkit_common::Error),

    /// The declared archive payload runs past the end of the buffer.
    #[error("archive payload out of bounds: {0}")]
    Payload(#[source] jagkit_common::Error),

    /// The entry count could not be read.
    #[error("failed to read number of entries: {0}")]
    EntryCount(#[source] jagkit_common::Error),

    /// A per-entry header field could not be read.
    #[error("failed to read {field} for entry {index}: {source}")]
    EntryHeader {
        index: usize,
        field: HeaderField,
        #[source]
        source: jagkit_common::Error,
    },

    /// The declared entry data runs past the end of the table.
    #[error("data for entry {index} out of bounds: {source}")]
    EntryData {
        index: usize,
        #[source]
        source: jagkit_common::Error,
    },

    /// Decompression error.
    #[error("failed to decompress {scope}: {reason}")]
    Decompression { scope: Scope, reason: String },

    /// Entry not found.
    #[error("entry not found: {0}")]
    EntryNotFound(String),
}

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, Error>;
