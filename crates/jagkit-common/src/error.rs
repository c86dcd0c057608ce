//! Error types for jagkit-common.

use thiserror::Error;

/// Common error type for jagkit operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bounded read or slice would run past the end of the buffer.
    #[error("truncated buffer: needed {needed} bytes at offset {position} of {len}")]
    Truncated {
        position: usize,
        needed: usize,
        len: usize,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
