//! Error types for the state-vector engine.

use thiserror::Error;

/// Errors produced when building or transforming a [`QState`](crate::QState).
///
/// Every variant except [`StateError::ZeroNorm`] is a usage error: it is
/// reported before any amplitude is read, and since states are immutable the
/// caller's state is untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    /// Range selector with `from > to`.
    #[error("bit range must have 'from' <= 'to', got {from}..={to}")]
    InvalidRange {
        /// Lower end as given.
        from: u32,
        /// Upper end as given.
        to: u32,
    },

    /// A selected bit does not exist in the register.
    #[error("bit {bit} out of range for a {num_bits}-qubit state")]
    BitOutOfRange {
        /// The offending bit.
        bit: u32,
        /// Width of the state.
        num_bits: u32,
    },

    /// Explicit bit list with no entries.
    #[error("bit selector selects no bits")]
    EmptySelector,

    /// An explicit list was given where a contiguous field is required.
    #[error("bits {0:?} do not form a contiguous ascending range")]
    NotARange(Vec<u32>),

    /// A bit is selected twice, or shared by control/target or
    /// input/target sets.
    #[error("bit {bit} is selected more than once")]
    OverlappingBits {
        /// First repeated bit found.
        bit: u32,
    },

    /// Ket literal is not a run of '0'/'1', optionally wrapped in `|...>`.
    #[error("invalid basis state literal '{0}'")]
    InvalidBitString(String),

    /// Register width outside 1..=MAX_QUBITS.
    #[error("number of qubits must be between 1 and {max}, got {num_bits}")]
    InvalidWidth {
        /// Requested width.
        num_bits: u32,
        /// Largest supported width.
        max: u32,
    },

    /// Basis index does not fit in the register.
    #[error("basis state {index} out of range for a {num_bits}-qubit state")]
    IndexOutOfRange {
        /// The offending index.
        index: u64,
        /// Width of the state.
        num_bits: u32,
    },

    /// Two states of different widths were combined.
    #[error("cannot combine a {left}-qubit state with a {right}-qubit state")]
    WidthMismatch {
        /// Width of the receiver.
        left: u32,
        /// Width of the argument.
        right: u32,
    },

    /// Normalization of a state with no probability mass.
    #[error("state has zero total probability and cannot be normalized")]
    ZeroNorm,
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;
