//! Simon's algorithm.
//!
//! Given `f` on `n`-bit inputs with `f(x) = f(y)` exactly when
//! `x ⊕ y ∈ {0, s}`, each circuit run yields a `y` with `y·s = 0 mod 2`.
//! Once the distinct outcomes pin `s` down to a one-dimensional null space
//! over GF(2), `s` is read off and checked classically.

use rand::Rng;
use tracing::{debug, instrument};

use qbits::{BitSelector, MAX_QUBITS, QState};
use qbits_math::find_null_space_mod2;

use crate::config::SimonConfig;
use crate::error::{AlgoError, AlgoResult};

/// Simon's algorithm driver.
///
/// ```rust
/// use qbits_algos::Simon;
///
/// let table = [0b101, 0b010, 0b000, 0b110, 0b000, 0b110, 0b101, 0b010];
/// let simon = Simon::new(move |x: u64| table[x as usize], 3);
/// assert_eq!(simon.find_key().unwrap(), Some(0b110));
/// ```
pub struct Simon<F> {
    f: F,
    num_bits: u32,
    config: SimonConfig,
}

impl<F> Simon<F>
where
    F: Fn(u64) -> u64,
{
    /// Driver for `f` on `num_bits`-bit inputs and outputs.
    pub fn new(f: F, num_bits: u32) -> Self {
        Self {
            f,
            num_bits,
            config: SimonConfig::default(),
        }
    }

    /// Override the sampling budget.
    #[must_use]
    pub fn with_config(mut self, config: SimonConfig) -> Self {
        self.config = config;
        self
    }

    /// Find the key using the thread-local RNG.
    pub fn find_key(&self) -> AlgoResult<Option<u64>> {
        self.find_key_with_rng(rand::thread_rng())
    }

    /// Find the key `s`; `Some(0)` means `f` is one-to-one.
    ///
    /// Returns `Ok(None)` if the budget runs out before the outcomes
    /// determine a single candidate.
    #[instrument(skip(self, rng), fields(num_bits = self.num_bits))]
    pub fn find_key_with_rng<R: Rng>(&self, mut rng: R) -> AlgoResult<Option<u64>> {
        let n = self.num_bits;
        if n == 0 {
            return Err(AlgoError::NoInputBits("Simon"));
        }
        if 2 * u64::from(n) > u64::from(MAX_QUBITS) {
            return Err(AlgoError::TooManyQubits {
                algorithm: "Simon",
                needed: 2 * u64::from(n),
                max: MAX_QUBITS,
            });
        }

        let inputs = BitSelector::range(n, 2 * n - 1);
        let outputs = BitSelector::range(0, n - 1);
        // measurement leaves `prepared` untouched; sample it repeatedly
        let prepared = QState::new(2 * n)?
            .hadamard(inputs.clone())?
            .apply_function(inputs.clone(), outputs, &self.f)?
            .hadamard(inputs.clone())?;

        let budget = self.config.samples_per_bit.saturating_mul(n);
        let mut rows: Vec<u64> = Vec::new();
        let mut samples = 0;
        loop {
            if rows.len() + 1 >= n as usize {
                let null_space = find_null_space_mod2(&rows, n)?;
                match null_space.as_slice() {
                    [] => return Ok(Some(0)),
                    [candidate] => return Ok(Some(self.verify(*candidate))),
                    _ => {}
                }
            }
            if samples >= budget {
                debug!(samples, independent = rows.len(), "Simon budget exhausted");
                return Ok(None);
            }
            samples += 1;
            let y = prepared.measure_with_rng(inputs.clone(), &mut rng)?.outcome;
            if !rows.contains(&y) {
                rows.push(y);
            }
        }
    }

    /// `s` if `f(0) = f(s)`, otherwise 0 (`f` is one-to-one).
    fn verify(&self, candidate: u64) -> u64 {
        let key = if (self.f)(0) == (self.f)(candidate) {
            candidate
        } else {
            0
        };
        debug!(candidate, key, "Simon candidate checked");
        key
    }
}
