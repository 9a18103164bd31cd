//! Error types for the math crate.

use thiserror::Error;

/// Errors produced by the exact-arithmetic routines.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum MathError {
    /// Matrix width does not fit in a 64-bit row mask.
    #[error("GF(2) matrix width {0} exceeds the 64-bit row limit")]
    WidthTooLarge(u32),

    /// A row has bits set outside the declared matrix width.
    #[error("row {row} ({value:#b}) has bits beyond width {width}")]
    RowOutOfRange {
        /// Position of the offending row.
        row: usize,
        /// The row bitmask.
        value: u64,
        /// Declared matrix width.
        width: u32,
    },

    /// Modular arithmetic with modulus zero.
    #[error("modulus must be non-zero")]
    ZeroModulus,

    /// Value or tolerance is NaN or infinite.
    #[error("continued fraction input must be finite, got x = {x}, max_error = {max_error}")]
    NonFinite {
        /// Value being expanded.
        x: f64,
        /// Requested accuracy.
        max_error: f64,
    },

    /// Tolerance is negative.
    #[error("max_error must be non-negative, got {0}")]
    NegativeTolerance(f64),

    /// A convergent no longer fits in `i64`.
    #[error("continued fraction convergent overflowed after {terms} terms")]
    Overflow {
        /// Number of quotients produced before the overflow.
        terms: usize,
    },

    /// The expansion did not reach the requested accuracy.
    #[error("continued fraction did not reach accuracy {max_error} within {terms} terms")]
    NoConvergence {
        /// Requested accuracy.
        max_error: f64,
        /// Number of quotients produced.
        terms: usize,
    },
}

/// Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;
