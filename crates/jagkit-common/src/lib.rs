//! Common utilities for jagkit.
//!
//! This crate provides the foundational pieces used by the archive reader:
//!
//! - [`ByteCursor`] - Forward-only big-endian reads over a byte slice
//! - [`Compatibility`] - Bounds policy for cursor reads and payload slices
//! - [`hash`] - The multiplicative entry name hash

mod compat;
mod error;
mod reader;

pub mod hash;

pub use compat::Compatibility;
pub use error::{Error, Result};
pub use reader::ByteCursor;
