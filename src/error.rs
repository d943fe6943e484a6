//! Error type for the non-secret API boundary.
//!
//! Constant-time functions never return this type; they report their
//! outcome as a `u32` mask. `Error` is produced only where the failure
//! condition is public information (input lengths, a scalar rejected
//! before any secret-dependent processing starts, a point decoding whose
//! outcome the caller chose to branch on).

use thiserror::Error;

/// Errors reported by the validating entry points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The source slice does not have the expected length.
    #[error("invalid input length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The most significant scalar byte is above 127.
    #[error("scalar out of range: top byte is {top:#04x}, maximum is 0x7f")]
    ScalarOutOfRange { top: u8 },

    /// The bytes are not the canonical encoding of a curve point.
    #[error("invalid point encoding")]
    InvalidPoint,
}
