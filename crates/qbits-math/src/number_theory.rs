//! Integer number theory for order finding.
//!
//! Shor's algorithm reduces factoring to finding the multiplicative order
//! `r` of `a mod n`. The quantum part yields `y / 2^m ≈ k / r`; the routines
//! here turn that estimate back into a candidate `r` and test it.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{MathError, MathResult};

/// Upper bound on the number of quotients in a continued fraction.
///
/// An `f64` carries 53 bits of mantissa, and the denominators of successive
/// convergents grow at least as fast as the Fibonacci numbers, so no useful
/// expansion is longer than this.
const MAX_TERMS: usize = 64;

/// Greatest common divisor (Euclid). `gcd(0, 0) == 0`.
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple. Zero if either argument is zero.
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// `base^exponent mod modulus` by repeated squaring.
///
/// Intermediate products are taken in 128 bits, so any `u64` modulus is safe.
pub fn power_mod(base: u64, exponent: u64, modulus: u64) -> MathResult<u64> {
    let modulus = NonZeroU64::new(modulus).ok_or(MathError::ZeroModulus)?;
    Ok(power_mod_nonzero(base, exponent, modulus))
}

/// [`power_mod`] for a modulus already known to be non-zero.
pub fn power_mod_nonzero(base: u64, exponent: u64, modulus: NonZeroU64) -> u64 {
    let m = u128::from(modulus.get());
    let mut result = 1 % m;
    let mut b = u128::from(base) % m;
    let mut e = exponent;
    while e > 0 {
        if e & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        e >>= 1;
    }
    // result < modulus, which fits in u64
    result as u64
}

/// Best rational approximation found by a continued-fraction expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuedFraction {
    /// Numerator of the final convergent; carries the sign of the input.
    pub numerator: i64,
    /// Denominator of the final convergent; always positive.
    pub denominator: i64,
    /// Quotients `[q0; q1, q2, …]` in the order they were produced.
    pub quotients: Vec<i64>,
}

impl ContinuedFraction {
    /// The convergent as a float.
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Expand `x` as a continued fraction until a convergent lies within
/// `max_error` of it.
///
/// Quotients are truncated toward zero, so a negative `x` produces negative
/// quotients throughout while the denominator stays positive.
///
/// ```rust
/// use qbits_math::continued_fraction;
///
/// let cf = continued_fraction(11.0 / 13.0, 1e-4).unwrap();
/// assert_eq!(cf.numerator, 11);
/// assert_eq!(cf.denominator, 13);
/// assert_eq!(cf.quotients, vec![0, 1, 5, 2]);
/// ```
pub fn continued_fraction(x: f64, max_error: f64) -> MathResult<ContinuedFraction> {
    expand(x, max_error, MAX_TERMS)
}

fn expand(x: f64, max_error: f64, max_terms: usize) -> MathResult<ContinuedFraction> {
    if !x.is_finite() || !max_error.is_finite() {
        return Err(MathError::NonFinite { x, max_error });
    }
    if max_error < 0.0 {
        return Err(MathError::NegativeTolerance(max_error));
    }

    let first = truncate(x, 0)?;
    let mut remainder = x - first as f64;
    let mut quotients = vec![first];
    // (h_{n-2}, k_{n-2}) and (h_{n-1}, k_{n-1})
    let mut two_ago = (1i64, 0i64);
    let mut one_ago = (first, 1i64);

    while (x - one_ago.0 as f64 / one_ago.1 as f64).abs() > max_error {
        if quotients.len() >= max_terms || remainder == 0.0 {
            return Err(MathError::NoConvergence {
                max_error,
                terms: quotients.len(),
            });
        }
        let reciprocal = 1.0 / remainder;
        let q = truncate(reciprocal, quotients.len())?;
        remainder = reciprocal - q as f64;
        quotients.push(q);

        let overflow = || MathError::Overflow {
            terms: quotients.len(),
        };
        let h = q
            .checked_mul(one_ago.0)
            .and_then(|v| v.checked_add(two_ago.0))
            .ok_or_else(overflow)?;
        let k = q
            .checked_mul(one_ago.1)
            .and_then(|v| v.checked_add(two_ago.1))
            .ok_or_else(overflow)?;
        two_ago = one_ago;
        one_ago = (h, k);
    }

    let (mut numerator, mut denominator) = one_ago;
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }
    trace!(x, numerator, denominator, terms = quotients.len(), "continued fraction");
    Ok(ContinuedFraction {
        numerator,
        denominator,
        quotients,
    })
}

/// Integer part of `v`, rounded toward zero.
fn truncate(v: f64, terms: usize) -> MathResult<i64> {
    let t = v.trunc();
    if t.abs() >= i64::MAX as f64 {
        return Err(MathError::Overflow { terms });
    }
    Ok(t as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(18, 12), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(1, 9), 9);
        assert_eq!(lcm(0, 9), 0);
    }

    #[test]
    fn test_power_mod() {
        assert_eq!(power_mod(2, 10, 1000).unwrap(), 24);
        assert_eq!(power_mod(7, 0, 13).unwrap(), 1);
        assert_eq!(power_mod(7, 5, 1).unwrap(), 0);
        assert_eq!(power_mod(3, 4, 35).unwrap(), 81 % 35);
        assert_eq!(
            power_mod(u64::MAX - 1, u64::MAX, u64::MAX).unwrap(),
            u64::MAX - 1
        );
        assert_eq!(power_mod(2, 3, 0), Err(MathError::ZeroModulus));

        let fifteen = NonZeroU64::new(15).unwrap();
        let powers: Vec<u64> = (0..6).map(|x| power_mod_nonzero(7, x, fifteen)).collect();
        assert_eq!(powers, vec![1, 7, 4, 13, 1, 7]);
    }

    #[test]
    fn test_continued_fraction_one_third() {
        let cf = continued_fraction(1.0 / 3.0, 0.0001).unwrap();
        assert_eq!(cf.numerator, 1);
        assert_eq!(cf.denominator, 3);
        assert_eq!(cf.quotients, vec![0, 3]);
    }

    #[test]
    fn test_continued_fraction_pi_stops_at_accuracy() {
        let cf = continued_fraction(PI, 0.000001).unwrap();
        assert_eq!(cf.numerator, 355);
        assert_eq!(cf.denominator, 113);
        assert_eq!(cf.quotients, vec![3, 7, 15, 1]);
    }

    #[test]
    fn test_continued_fraction_negative() {
        let cf = continued_fraction(-PI, 0.000001).unwrap();
        assert_eq!(cf.numerator, -355);
        assert_eq!(cf.denominator, 113);
        assert_eq!(cf.quotients, vec![-3, -7, -15, -1]);
    }

    #[test]
    fn test_continued_fraction_integer_input() {
        let cf = continued_fraction(5.0, 0.0).unwrap();
        assert_eq!((cf.numerator, cf.denominator), (5, 1));
        assert_eq!(cf.quotients, vec![5]);
    }

    #[test]
    fn test_continued_fraction_rejects_bad_input() {
        assert!(matches!(
            continued_fraction(f64::NAN, 0.1),
            Err(MathError::NonFinite { .. })
        ));
        assert_eq!(
            continued_fraction(0.5, -1.0),
            Err(MathError::NegativeTolerance(-1.0))
        );
    }

    #[test]
    fn test_continued_fraction_overflow() {
        // integer part beyond i64
        assert_eq!(
            continued_fraction(1e19, 0.1),
            Err(MathError::Overflow { terms: 0 })
        );
        // first reciprocal beyond i64
        assert_eq!(
            continued_fraction(1e-20, 0.0),
            Err(MathError::Overflow { terms: 1 })
        );
    }

    #[test]
    fn test_continued_fraction_term_limit() {
        assert_eq!(
            expand(PI, 0.0, 3),
            Err(MathError::NoConvergence {
                max_error: 0.0,
                terms: 3
            })
        );
        let cf = expand(PI, 0.000001, 4).unwrap();
        assert_eq!(cf.quotients, vec![3, 7, 15, 1]);
    }
}
