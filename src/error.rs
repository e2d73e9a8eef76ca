//! Error types

use thiserror::Error;

/// The error type for UUID parsing, generation, and conversion operations.
///
/// `validate()` never produces this type, and generation with default arguments cannot fail;
/// errors arise only from malformed strings and out-of-range explicit overrides.
#[derive(Error, Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The string does not match the 8-4-4-4-12 hexadecimal representation.
    #[error("invalid string representation of UUID")]
    Format,

    /// A caller-supplied field value does not fit in its bit width.
    #[error("`{0}` out of range")]
    Range(&'static str),

    /// The source value's version nibble does not match the expected input version.
    #[error("expected a version {expected} UUID, found version {found}")]
    UnsupportedVersion {
        /// The version the operation requires of its input.
        expected: u8,
        /// The version nibble actually found.
        found: u8,
    },
}
