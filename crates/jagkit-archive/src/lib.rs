//! JAG archive reader.
//!
//! A JAG archive is a small, length-prefixed container that maps entry name
//! hashes to byte payloads. Either the whole entry table or individual
//! entries may be compressed with bzip2, always with the stream magic
//! stripped.
//!
//! - 24-bit big-endian size fields throughout
//! - Entries keyed by a multiplicative hash of the upper-cased name
//! - Headerless bzip2 (`BZh1`) at archive and entry level
//!
//! Archives are decoded eagerly: [`Archive::from_bytes`] and
//! [`Archive::open`] return only after every entry has been decompressed.
//!
//! # Example
//!
//! ```no_run
//! use jagkit_archive::Archive;
//!
//! let archive = Archive::open("title.jag")?;
//!
//! for (index, entry) in archive.enumerate() {
//!     println!("{index}: {:#010x} ({} bytes)", entry.hash(), entry.len());
//! }
//!
//! if let Some(data) = archive.lookup("logo.tga") {
//!     std::fs::write("logo.tga", data)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod archive;
mod entry;
mod error;
mod loader;
mod source;
mod table;

pub mod decompress;

#[cfg(test)]
mod testutil;

pub use archive::Archive;
pub use entry::Entry;
pub use error::{Error, HeaderField, Result, Scope};
pub use jagkit_common::Compatibility;
pub use loader::{load_archive, load_archive_with, LoadOptions};
pub use source::{ByteSource, FileSource};
