//! Textbook quantum algorithms on the [`qbits`] simulator.
//!
//! The fixed-size algorithms ([`deutsch`], [`deutsch_jozsa`],
//! [`bernstein_vazirani`], [`superdense`], [`grover_two_bit`]) are plain
//! functions that succeed with certainty. The sampling drivers ([`Simon`],
//! [`PeriodFinder`], [`Shor`]) repeat a circuit until the classical
//! post-processing in [`qbits_math`] pins down an answer, and return
//! `Ok(None)` when their [`config`] budget runs out first.
//!
//! Every probabilistic entry point has a `*_with_rng` form that takes any
//! [`rand::Rng`], so runs can be made reproducible with a seeded generator.
//!
//! # Example
//!
//! ```rust
//! use qbits_algos::{bernstein_vazirani, deutsch_jozsa, hidden_string_function};
//!
//! let hidden = bernstein_vazirani(5, hidden_string_function(0b01101))?;
//! assert_eq!(hidden, 0b01101);
//!
//! let balanced = |x: u64| x & 1;
//! assert!(!deutsch_jozsa(3, balanced)?);
//! # Ok::<(), qbits_algos::AlgoError>(())
//! ```

pub mod config;
pub mod error;
pub mod period;
pub mod shor;
pub mod simon;
pub mod simple;

pub use config::{PeriodFinderConfig, ShorConfig, SimonConfig};
pub use error::{AlgoError, AlgoResult};
pub use period::PeriodFinder;
pub use shor::Shor;
pub use simon::Simon;
pub use simple::{
    bernstein_vazirani, deutsch, deutsch_jozsa, grover_two_bit, hidden_string_function,
    superdense, teleport, teleport_with_rng,
};
