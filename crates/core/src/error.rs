//! Error type shared by every layer of the crate.
//!
//! Wraparound on overflow is the defined behaviour of the integer types and
//! is never reported here.

use thiserror::Error;

use crate::ecdh::Phase;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("division by zero")]
    DivideByZero,

    #[error("invalid digit {ch:?} at position {index}")]
    InvalidDigit { ch: char, index: usize },

    #[error("empty digit string")]
    Empty,

    #[error("byte slice of length {len} does not fit in {max} bytes")]
    InvalidLength { len: usize, max: usize },

    #[error("modulus must be at least 2")]
    InvalidModulus,

    #[error("value has no inverse modulo the given modulus")]
    NotInvertible,

    #[error("point is not on the curve")]
    PointNotOnCurve,

    #[error("private scalar is outside [1, p - 1]")]
    ScalarOutOfRange,

    #[error("public key is the point at infinity")]
    InfinityPublicKey,

    #[error("exchange is in phase {found:?}, expected {expected:?}")]
    Protocol { expected: Phase, found: Phase },
}
