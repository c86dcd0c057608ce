//! Entry table decoding.
//!
//! ## Layout
//! ```text
//! [0x00] EntryCount                 (u16 BE)
//! [0x02] EntryHeader × EntryCount   (10 bytes each)
//! [...]  Entry data, concatenated in header order
//! ```
//!
//! ## Entry header (10 bytes)
//! ```text
//! [0x00] NameHash           (u32 BE)
//! [0x04] DecompressedSize   (u24 BE)
//! [0x07] CompressedSize     (u24 BE)
//! ```
//! Equal sizes mean the entry is stored; otherwise the entry is a
//! headerless bzip2 stream of `CompressedSize` bytes.

use std::ops::Range;

use jagkit_common::{ByteCursor, Compatibility};
use tracing::trace;

use crate::decompress::decompress_headerless;
use crate::error::{HeaderField, Scope};
use crate::{Entry, Error, Result};

/// Size of one per-entry header in bytes.
pub(crate) const ENTRY_HEADER_LEN: usize = 10;

/// A per-entry header as stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntryHeader {
    hash: u32,
    decompressed_size: u32,
    compressed_size: u32,
}

impl EntryHeader {
    /// Whether the entry data needs decompressing.
    #[inline]
    fn is_compressed(&self) -> bool {
        self.decompressed_size != self.compressed_size
    }

    fn read(cursor: &mut ByteCursor<'_>, index: usize) -> Result<Self> {
        let hash = cursor
            .read_u32()
            .map_err(field_error(index, HeaderField::Hash))?;
        let decompressed_size = cursor
            .read_u24()
            .map_err(field_error(index, HeaderField::DecompressedSize))?;
        let compressed_size = cursor
            .read_u24()
            .map_err(field_error(index, HeaderField::CompressedSize))?;

        Ok(Self {
            hash,
            decompressed_size,
            compressed_size,
        })
    }
}

fn field_error(index: usize, field: HeaderField) -> impl FnOnce(jagkit_common::Error) -> Error {
    move |source| Error::EntryHeader {
        index,
        field,
        source,
    }
}

/// An entry whose header is parsed but whose data is not decoded yet.
#[derive(Debug, Clone)]
struct PendingEntry {
    index: usize,
    header: EntryHeader,
    range: Range<usize>,
}

/// Decode an entry table into entries, in table order.
///
/// Each index is handled in full (header, data range, decompression)
/// before the next one, so the reported error is always the one at the
/// lowest failing index. The first failure aborts the whole table.
pub(crate) fn read_entries(data: &[u8], compatibility: Compatibility) -> Result<Vec<Entry>> {
    let mut cursor = ByteCursor::with_compatibility(data, compatibility);

    let count = cursor.read_u16().map_err(Error::EntryCount)? as usize;
    let mut data_ptr = cursor.position() + count * ENTRY_HEADER_LEN;

    // Headers are collected up to the first bad one; the entries before it
    // still decode first so their errors take precedence.
    let mut pending = Vec::with_capacity(count);
    let mut stopped = None;
    for index in 0..count {
        match next_pending(&mut cursor, index, data_ptr, compatibility) {
            Ok(entry) => {
                // Stored size, not decoded size, drives the data pointer.
                data_ptr += entry.header.compressed_size as usize;
                pending.push(entry);
            }
            Err(e) => {
                stopped = Some(e);
                break;
            }
        }
    }

    let entries = decode_all(data, &pending)?;
    match stopped {
        Some(e) => Err(e),
        None => Ok(entries),
    }
}

fn next_pending(
    cursor: &mut ByteCursor<'_>,
    index: usize,
    data_ptr: usize,
    compatibility: Compatibility,
) -> Result<PendingEntry> {
    let header = EntryHeader::read(cursor, index)?;
    let range = compatibility
        .payload_range(data_ptr, header.compressed_size as usize, cursor.len())
        .map_err(|source| Error::EntryData { index, source })?;

    Ok(PendingEntry {
        index,
        header,
        range,
    })
}

#[cfg(not(feature = "parallel"))]
fn decode_all(data: &[u8], pending: &[PendingEntry]) -> Result<Vec<Entry>> {
    pending.iter().map(|p| decode_entry(data, p)).collect()
}

#[cfg(feature = "parallel")]
fn decode_all(data: &[u8], pending: &[PendingEntry]) -> Result<Vec<Entry>> {
    use rayon::prelude::*;

    let decoded: Vec<Result<Entry>> = pending.par_iter().map(|p| decode_entry(data, p)).collect();

    // Sequential collect keeps the lowest failing index.
    decoded.into_iter().collect()
}

fn decode_entry(data: &[u8], pending: &PendingEntry) -> Result<Entry> {
    let raw = &data[pending.range.clone()];
    let header = &pending.header;

    let contents = if header.is_compressed() {
        decompress_headerless(raw, header.decompressed_size as usize).map_err(|e| {
            Error::Decompression {
                scope: Scope::Entry(pending.index),
                reason: e.to_string(),
            }
        })?
    } else {
        raw.to_vec()
    };

    trace!(
        index = pending.index,
        hash = header.hash,
        stored = raw.len(),
        size = contents.len(),
        compressed = header.is_compressed(),
        "decoded entry"
    );

    Ok(Entry::new(header.hash, contents))
}
