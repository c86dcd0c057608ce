//! Top-level archive decoding.
//!
//! ## Layout
//! ```text
//! [0x00] DecompressedSize   (u24 BE)
//! [0x03] CompressedSize     (u24 BE)
//! [0x06] Payload            (CompressedSize bytes)
//! ```
//! The header region is 7 bytes wide; the payload begins right after the two
//! size fields. When the sizes differ the payload is a headerless bzip2
//! stream that decodes to the entry table, otherwise it is the table itself.

use jagkit_common::{ByteCursor, Compatibility};
use tracing::debug;

use crate::decompress::decompress_headerless;
use crate::error::Scope;
use crate::table::read_entries;
use crate::{Archive, Error, Result};

/// Width of the top-level header region in bytes.
pub(crate) const HEADER_LEN: usize = 7;

/// Options controlling how an archive is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Bounds policy for header reads and payload slices.
    pub compatibility: Compatibility,
}

impl LoadOptions {
    /// Strict decoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoding that reproduces the historical off-by-one bounds.
    pub fn legacy() -> Self {
        Self::new().with_compatibility(Compatibility::Legacy)
    }

    /// Set the bounds policy.
    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }
}

/// The top-level archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArchiveHeader {
    decompressed_size: u32,
    compressed_size: u32,
}

impl ArchiveHeader {
    /// Whether the payload needs decompressing.
    #[inline]
    fn is_compressed(&self) -> bool {
        self.decompressed_size != self.compressed_size
    }

    /// Read the header, returning it with the payload offset.
    fn read(bytes: &[u8], compatibility: Compatibility) -> Result<(Self, usize)> {
        let window = bytes.get(..HEADER_LEN).ok_or(Error::Header(
            jagkit_common::Error::Truncated {
                position: 0,
                needed: HEADER_LEN,
                len: bytes.len(),
            },
        ))?;

        let mut cursor = ByteCursor::with_compatibility(window, compatibility);
        let decompressed_size = cursor.read_u24().map_err(Error::Header)?;
        let compressed_size = cursor.read_u24().map_err(Error::Header)?;

        let header = Self {
            decompressed_size,
            compressed_size,
        };
        Ok((header, cursor.position()))
    }
}

/// Decode an archive blob with default options.
pub fn load_archive(bytes: &[u8]) -> Result<Archive> {
    load_archive_with(bytes, &LoadOptions::default())
}

/// Decode an archive blob.
///
/// Decoding is eager: every entry is decompressed before this returns, and
/// any failure discards the whole archive.
pub fn load_archive_with(bytes: &[u8], options: &LoadOptions) -> Result<Archive> {
    let compatibility = options.compatibility;
    let (header, offset) = ArchiveHeader::read(bytes, compatibility)?;

    let range = compatibility
        .payload_range(offset, header.compressed_size as usize, bytes.len())
        .map_err(Error::Payload)?;
    let payload = &bytes[range];

    debug!(
        decompressed_size = header.decompressed_size,
        compressed_size = header.compressed_size,
        compressed = header.is_compressed(),
        ?compatibility,
        "read archive header"
    );

    let entries = if header.is_compressed() {
        let table = decompress_headerless(payload, header.decompressed_size as usize).map_err(
            |e| Error::Decompression {
                scope: Scope::Archive,
                reason: e.to_string(),
            },
        )?;
        if table.is_empty() {
            return Err(Error::Decompression {
                scope: Scope::Archive,
                reason: "decompressor produced no output".to_string(),
            });
        }
        debug!(size = table.len(), "decompressed archive payload");

        read_entries(&table, compatibility)?
    } else {
        read_entries(payload, compatibility)?
    };

    debug!(entries = entries.len(), "loaded archive");

    Ok(Archive::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeaderField;
    use crate::source::FileSource;
    use crate::testutil::{build_archive, build_table, FixtureEntry};
    use crate::Entry;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn two_entry_table() -> Vec<u8> {
        build_table(&[
            FixtureEntry::stored("A", &[0x41]),
            FixtureEntry::stored("BB", &[0x42, 0x42]),
        ])
    }

    #[test]
    fn test_stored_roundtrip() {
        let bytes = build_archive(&two_entry_table(), false);
        let archive = load_archive(&bytes).unwrap();

        let entries: Vec<_> = archive.enumerate().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (0, &Entry::named("A", vec![0x41])));
        assert_eq!(entries[1], (1, &Entry::named("BB", vec![0x42, 0x42])));
        assert_eq!(archive.lookup("a"), Some(&[0x41u8][..]));
        assert_eq!(archive.lookup("bb"), Some(&[0x42u8, 0x42][..]));
        assert_eq!(archive.lookup("c"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = build_table(&[FixtureEntry::stored("map", b"tiles")]);
        let archive = load_archive(&build_archive(&table, false)).unwrap();

        assert_eq!(archive.lookup("MAP"), archive.lookup("map"));
        assert_eq!(archive.lookup("Map"), Some(&b"tiles"[..]));
    }

    #[test]
    fn test_compressed_archive() {
        let original = b"entry payload that is long enough to be worth compressing".repeat(4);
        let table = build_table(&[
            FixtureEntry::stored("title.dat", b"title"),
            FixtureEntry::compressed("index.dat", &original),
        ]);
        let archive = load_archive(&build_archive(&table, true)).unwrap();

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.lookup("title.dat"), Some(&b"title"[..]));
        assert_eq!(archive.lookup("INDEX.DAT"), Some(&original[..]));
    }

    #[test]
    fn test_compressed_entry_in_stored_archive() {
        let original = vec![0x11u8; 2048];
        let table = build_table(&[FixtureEntry::compressed("logo.tga", &original)]);
        let archive = load_archive(&build_archive(&table, false)).unwrap();

        assert_eq!(archive.lookup("logo.tga"), Some(&original[..]));
    }

    #[test]
    fn test_enumerate_twice() {
        let archive = load_archive(&build_archive(&two_entry_table(), true)).unwrap();

        let first: Vec<_> = archive.enumerate().map(|(i, e)| (i, e.clone())).collect();
        let second: Vec<_> = archive.enumerate().map(|(i, e)| (i, e.clone())).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_short_header() {
        let bytes = build_archive(&two_entry_table(), false);
        for len in 0..HEADER_LEN {
            for options in [LoadOptions::new(), LoadOptions::legacy()] {
                let err = load_archive_with(&bytes[..len], &options).unwrap_err();
                assert!(matches!(err, Error::Header(_)), "len {len}: {err}");
            }
        }
    }

    #[test]
    fn test_payload_out_of_bounds() {
        let mut bytes = build_archive(&two_entry_table(), false);
        bytes.truncate(bytes.len() - 1);

        let err = load_archive(&bytes).unwrap_err();
        assert!(matches!(err, Error::Payload(_)));
    }

    #[test]
    fn test_missing_entry_count() {
        let err = load_archive(&[0, 0, 1, 0, 0, 1, 0]).unwrap_err();
        assert!(matches!(err, Error::EntryCount(_)));
    }

    #[test]
    fn test_corrupt_archive_payload() {
        let mut bytes = vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x10];
        bytes.extend_from_slice(b"garbage garbage!");

        let err = load_archive(&bytes).unwrap_err();
        assert!(matches!(
            err,
            Error::Decompression {
                scope: Scope::Archive,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_decompressed_payload() {
        let err = load_archive(&build_archive(&[], true)).unwrap_err();
        assert!(matches!(
            err,
            Error::Decompression {
                scope: Scope::Archive,
                ..
            }
        ));
    }

    #[test]
    fn test_entry_failure_discards_archive() {
        let table = build_table(&[
            FixtureEntry::stored("A", &[0x41]),
            FixtureEntry::raw("broken", 100, b"definitely not bzip2"),
        ]);

        let err = load_archive(&build_archive(&table, false)).unwrap_err();
        assert!(matches!(
            err,
            Error::Decompression {
                scope: Scope::Entry(1),
                ..
            }
        ));
    }

    #[test]
    fn test_legacy_tolerates_trailing_payload_byte() {
        let mut bytes = build_archive(&two_entry_table(), true);
        bytes.push(0xFF);

        let archive = load_archive_with(&bytes, &LoadOptions::legacy()).unwrap();
        assert_eq!(archive.len(), 2);
        // Inclusive-end slices pull the next entry's first byte along.
        assert_eq!(archive.lookup("a"), Some(&[0x41u8, 0x42][..]));
    }

    #[test]
    fn test_legacy_header_bounds() {
        // Table whose final header field ends exactly at the payload end.
        let table = build_table(&[FixtureEntry::stored("empty", &[])]);
        let bytes = build_archive(&table, false);

        assert_eq!(load_archive(&bytes).unwrap().len(), 1);
        let err = load_archive_with(&bytes, &LoadOptions::legacy()).unwrap_err();
        assert!(matches!(
            err,
            Error::EntryHeader {
                index: 0,
                field: HeaderField::CompressedSize,
                ..
            }
        ));
    }

    #[test]
    fn test_load_from_sources() {
        let bytes = build_archive(&two_entry_table(), true);

        let from_slice = Archive::load(&bytes.as_slice(), &LoadOptions::new()).unwrap();
        assert_eq!(from_slice.lookup("a"), Some(&[0x41u8][..]));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let from_file = Archive::load(&FileSource::new(file.path()), &LoadOptions::new());
        let opened = Archive::open(file.path());

        assert_eq!(from_file.unwrap().entries(), from_slice.entries());
        assert_eq!(opened.unwrap().entries(), from_slice.entries());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Archive::open(dir.path().join("missing.jag")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
