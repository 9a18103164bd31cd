//! `qbits-math` — exact classical arithmetic used to post-process
//! measurement outcomes.
//!
//! Quantum period-finding algorithms only ever hand back classical samples;
//! recovering the answer from them is ordinary (but exact) mathematics:
//!
//! - **Simon's algorithm** collects outcomes `y` with `y · s = 0 (mod 2)` and
//!   solves for the hidden mask `s` via [`find_null_space_mod2`].
//! - **Shor's algorithm** measures an estimate of `k / r` and recovers the
//!   period `r` as the denominator of a [`continued_fraction`] convergent,
//!   checking candidates with [`power_mod`] and combining them with [`lcm`].
//!
//! # Quick start
//!
//! ```rust
//! use qbits_math::{continued_fraction, find_null_space_mod2};
//!
//! let null_space = find_null_space_mod2(&[0b001, 0b111, 0b110, 0b000], 3).unwrap();
//! assert_eq!(null_space, vec![0b110]);
//!
//! let cf = continued_fraction(-std::f64::consts::PI, 1e-6).unwrap();
//! assert_eq!((cf.numerator, cf.denominator), (-355, 113));
//! ```

pub mod error;
pub mod gf2;
pub mod number_theory;

pub use error::{MathError, MathResult};
pub use gf2::find_null_space_mod2;
pub use number_theory::{
    ContinuedFraction, continued_fraction, gcd, lcm, power_mod, power_mod_nonzero,
};
