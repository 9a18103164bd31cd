//! Shor's factoring algorithm.
//!
//! Factoring `n` reduces to finding the order `r` of a random `a` modulo
//! `n`: if `r` is even, `gcd(a^{r/2} - 1, n)` is often a proper factor. The
//! order is found with the period-finding circuit on `f(x) = a^x mod n`.

use std::num::NonZeroU64;

use rand::Rng;
use tracing::{debug, instrument};

use qbits_math::{gcd, lcm, power_mod, power_mod_nonzero};

use crate::config::ShorConfig;
use crate::error::{AlgoError, AlgoResult};
use crate::period::PeriodRegisters;

/// Shor's algorithm for one modulus.
///
/// ```rust
/// use qbits_algos::Shor;
///
/// let factor = Shor::new(15).unwrap().factor().unwrap();
/// assert!(matches!(factor, Some(3) | Some(5) | None));
/// ```
#[derive(Debug, Clone)]
pub struct Shor {
    n: u64,
    num_out_bits: u32,
    config: ShorConfig,
}

impl Shor {
    /// Prepare to factor `n`, which must be at least 3.
    pub fn new(n: u64) -> AlgoResult<Self> {
        if n < 3 {
            return Err(AlgoError::InvalidModulus(n));
        }
        // ceil(log2(n))
        let num_out_bits = u64::BITS - (n - 1).leading_zeros();
        PeriodRegisters::new("Shor", num_out_bits)?;
        Ok(Self {
            n,
            num_out_bits,
            config: ShorConfig::default(),
        })
    }

    /// Override the attempt budget.
    #[must_use]
    pub fn with_config(mut self, config: ShorConfig) -> Self {
        self.config = config;
        self
    }

    /// The modulus being factored.
    pub fn modulus(&self) -> u64 {
        self.n
    }

    /// Factor using the thread-local RNG.
    pub fn factor(&self) -> AlgoResult<Option<u64>> {
        self.factor_with_rng(rand::thread_rng())
    }

    /// Find a proper factor of `n`.
    ///
    /// Even moduli return 2 at once. Otherwise random bases `a ∈ [2, n)` are
    /// tried: a base sharing a factor with `n` gives it away directly, and
    /// otherwise an even order `r` is turned into `gcd(a^{r/2} - 1, n)`.
    /// Returns `Ok(None)` if every attempt fails, which is always the case for
    /// a prime `n`.
    #[instrument(skip(self, rng), fields(n = self.n))]
    pub fn factor_with_rng<R: Rng>(&self, mut rng: R) -> AlgoResult<Option<u64>> {
        let n = self.n;
        if n % 2 == 0 {
            return Ok(Some(2));
        }
        for attempt in 0..self.config.factor_attempts {
            let a = rng.gen_range(2..n);
            let d = gcd(a, n);
            if d > 1 {
                debug!(attempt, a, factor = d, "base shares a factor");
                return Ok(Some(d));
            }
            let Some(r) = self.compute_order_with_rng(a, &mut rng)? else {
                continue;
            };
            if r % 2 != 0 {
                debug!(attempt, a, r, "odd order");
                continue;
            }
            // a^{r/2} - 1 mod n
            let x = (power_mod(a, r / 2, n)? + n - 1) % n;
            let d = gcd(x, n);
            debug!(attempt, a, r, candidate = d, "order found");
            if d > 1 && d < n {
                return Ok(Some(d));
            }
        }
        Ok(None)
    }

    /// Order of `a` modulo `n` using the thread-local RNG.
    pub fn compute_order(&self, a: u64) -> AlgoResult<Option<u64>> {
        self.compute_order_with_rng(a, rand::thread_rng())
    }

    /// Smallest `r > 0` with `a^r = 1 mod n`, or `Ok(None)` if the circuit
    /// runs did not reveal it.
    ///
    /// Each run's continued-fraction denominator is tried directly and
    /// folded into a running LCM. At most `2m` runs are made, stopping after
    /// `m` accepted denominators, where `m` is the bit length of `n`.
    #[instrument(skip(self, rng), fields(n = self.n))]
    pub fn compute_order_with_rng<R: Rng>(&self, a: u64, mut rng: R) -> AlgoResult<Option<u64>> {
        let n = self.n;
        let modulus = NonZeroU64::new(n).ok_or(AlgoError::InvalidModulus(n))?;
        let registers = PeriodRegisters::new("Shor", self.num_out_bits)?;
        let output_range = registers.output_range();
        let f = |x: u64| power_mod_nonzero(a, x, modulus);
        let f0 = f(0);
        let is_order = |r: u64| f(r) == f0;

        let mut successes = 0;
        let mut best = 1;
        for attempt in 0..2 * self.num_out_bits {
            if successes == self.num_out_bits {
                break;
            }
            let candidate = registers.sample_denominator(f, &mut rng)?;
            if candidate <= 1 || candidate > output_range {
                continue;
            }
            if is_order(candidate) {
                debug!(attempt, a, r = candidate, "order from single sample");
                return Ok(Some(candidate));
            }
            let combined = lcm(candidate, best);
            if combined <= output_range {
                successes += 1;
                best = combined;
                if is_order(best) {
                    debug!(attempt, a, r = best, "order from combined samples");
                    return Ok(Some(best));
                }
            }
        }
        debug!(a, successes, "order not found");
        Ok(None)
    }
}
