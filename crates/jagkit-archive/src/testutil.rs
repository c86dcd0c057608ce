//! Archive fixtures for tests.

use jagkit_common::hash::hash_name;

use crate::decompress::compress_headerless;

/// One entry of a fixture table.
pub(crate) struct FixtureEntry {
    hash: u32,
    decompressed_size: usize,
    stored: Vec<u8>,
}

impl FixtureEntry {
    pub(crate) fn stored(name: &str, data: &[u8]) -> Self {
        Self::raw(name, data.len(), data)
    }

    pub(crate) fn compressed(name: &str, data: &[u8]) -> Self {
        let stored = compress_headerless(data);
        assert_ne!(stored.len(), data.len(), "fixture would read as stored");
        Self::raw(name, data.len(), &stored)
    }

    /// Entry with explicit sizes, for malformed tables.
    pub(crate) fn raw(name: &str, decompressed_size: usize, stored: &[u8]) -> Self {
        Self {
            hash: hash_name(name),
            decompressed_size,
            stored: stored.to_vec(),
        }
    }
}

fn push_u24(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&(value as u32).to_be_bytes()[1..]);
}

/// Build an entry table: count, headers, then concatenated data.
pub(crate) fn build_table(entries: &[FixtureEntry]) -> Vec<u8> {
    let mut table = Vec::new();
    table.extend_from_slice(&(entries.len() as u16).to_be_bytes());

    for entry in entries {
        table.extend_from_slice(&entry.hash.to_be_bytes());
        push_u24(&mut table, entry.decompressed_size);
        push_u24(&mut table, entry.stored.len());
    }
    for entry in entries {
        table.extend_from_slice(&entry.stored);
    }

    table
}

/// Wrap a table in a top-level header, compressing it if asked.
pub(crate) fn build_archive(table: &[u8], compress: bool) -> Vec<u8> {
    let payload = if compress {
        compress_headerless(table)
    } else {
        table.to_vec()
    };

    let mut archive = Vec::with_capacity(6 + payload.len());
    push_u24(&mut archive, table.len());
    push_u24(&mut archive, payload.len());
    archive.extend_from_slice(&payload);

    archive
}
