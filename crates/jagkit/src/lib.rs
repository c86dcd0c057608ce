//! jagkit - JAG archive decoding library.
//!
//! This crate provides a unified interface to the jagkit crates.
//!
//! # Crates
//!
//! - [`jagkit_common`] - Byte cursor, bounds policy and name hashing
//! - [`jagkit_archive`] - Archive loading (entry table + bzip2)
//!
//! # Example
//!
//! ```no_run
//! use jagkit::prelude::*;
//!
//! let bytes = std::fs::read("config.jag")?;
//! let archive = Archive::from_bytes(&bytes)?;
//!
//! if let Some(data) = archive.lookup("loc.dat") {
//!     println!("loc.dat: {} bytes (hash {:#010x})", data.len(), hash_name("loc.dat"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use jagkit_archive as archive;
pub use jagkit_common as common;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use jagkit_archive::{
        load_archive, load_archive_with, Archive, ByteSource, Compatibility, Entry, FileSource,
        LoadOptions,
    };
    pub use jagkit_common::hash::hash_name;
    pub use jagkit_common::ByteCursor;
}

// Re-export commonly used types at the crate root
pub use jagkit_archive::{Archive, Error, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
