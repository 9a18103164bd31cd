//! Error types for the algorithm drivers.

use qbits::StateError;
use qbits_math::MathError;
use thiserror::Error;

/// Errors produced by the algorithm drivers.
///
/// Failing to find an answer within the attempt budget is not an error;
/// drivers report it as `Ok(None)`.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum AlgoError {
    /// The simulator rejected an operation.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// A classical post-processing step failed.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// The registers the algorithm needs do not fit in a state.
    #[error("{algorithm} needs {needed} qubits, more than the {max} available")]
    TooManyQubits {
        /// Algorithm name.
        algorithm: &'static str,
        /// Qubits required.
        needed: u64,
        /// Largest supported width.
        max: u32,
    },

    /// A register width of zero was requested.
    #[error("{0} needs at least one input bit")]
    NoInputBits(&'static str),

    /// Superdense coding carries exactly two bits.
    #[error("superdense message must be in 0..=3, got {0}")]
    MessageOutOfRange(u64),

    /// Teleportation sends a single qubit.
    #[error("teleportation payload must be a 1-qubit state, got {0} qubits")]
    PayloadWidth(u32),

    /// Shor's algorithm needs a modulus of at least 3.
    #[error("cannot factor {0}")]
    InvalidModulus(u64),
}

/// Result type for algorithm drivers.
pub type AlgoResult<T> = Result<T, AlgoError>;
