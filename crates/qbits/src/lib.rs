//! Sparse state-vector simulation of small quantum registers.
//!
//! A [`QState`] holds only the non-zero amplitudes of an `n`-qubit register
//! (`n ≤ 63`), keyed by basis index. Gates, classical oracles, the quantum
//! Fourier transform and measurement all return new states; nothing is
//! mutated in place.
//!
//! # Example
//!
//! ```rust
//! use qbits::{BitSelector, QState};
//!
//! // Bell pair
//! let bell = QState::from_bits("|00>")?
//!     .hadamard(0)?
//!     .controlled_x(0, 1)?;
//! assert_eq!(bell.to_string(), "0.7071 |00> + 0.7071 |11>");
//!
//! let m = bell.measure_with(BitSelector::All, || 0.9)?;
//! assert_eq!(m.outcome, 0b11);
//! # Ok::<(), qbits::StateError>(())
//! ```
//!
//! # Bit numbering
//!
//! Bit 0 is the least significant bit of a basis index and the rightmost
//! character of a ket literal: `|100>` has bit 2 set.

pub mod bits;
pub mod complex;
pub mod error;
mod gates;
pub mod measure;
mod oracle;
mod qft;
pub mod state;

pub use bits::{BitRange, BitSelector};
pub use complex::{Complex, ComplexExt, FormatOptions, I, ONE, ZERO};
pub use error::{StateError, StateResult};
pub use measure::Measurement;
pub use state::{MAX_QUBITS, QState, ROUND_TO_ZERO, StateAmplitude};
