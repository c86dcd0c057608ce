//! Byte sources an archive can be loaded from.
//!
//! The loader never touches the filesystem itself. Callers hand it a
//! [`ByteSource`], which yields the complete archive blob in one call.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

/// Capability to read every byte of an archive.
pub trait ByteSource {
    /// Owned or borrowed view of the archive bytes.
    type Bytes: AsRef<[u8]>;

    /// Read the whole archive.
    fn read_all(&self) -> io::Result<Self::Bytes>;
}

impl<'a> ByteSource for &'a [u8] {
    type Bytes = &'a [u8];

    #[inline]
    fn read_all(&self) -> io::Result<Self::Bytes> {
        Ok(*self)
    }
}

/// An archive file on disk, memory-mapped on read.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path this source reads from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    type Bytes = Mmap;

    fn read_all(&self) -> io::Result<Self::Bytes> {
        let file = File::open(&self.path)?;
        // SAFETY: the mapping is read-only and dropped once the archive has
        // been decoded into owned buffers.
        unsafe { Mmap::map(&file) }
    }
}
