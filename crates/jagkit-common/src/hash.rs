//! Entry name hashing.
//!
//! Archives do not store entry names. Each entry is keyed by a 32-bit hash
//! of its upper-cased name, folded as `acc * 61 + (unit - 32)` with every
//! step wrapping modulo 2^32.

/// Multiplier applied to the accumulator for every code unit.
pub const MULTIPLIER: u32 = 61;

/// Compute the archive key for an entry name.
///
/// The name is upper-cased and folded over its UTF-16 code units, so
/// lookups are case-insensitive. Whitespace is significant.
#[inline]
pub fn hash_name(name: &str) -> u32 {
    name.to_uppercase()
        .encode_utf16()
        .fold(0u32, |acc, unit| {
            acc.wrapping_mul(MULTIPLIER)
                .wrapping_add(u32::from(unit).wrapping_sub(32))
        })
}
