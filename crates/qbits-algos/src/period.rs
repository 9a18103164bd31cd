//! Quantum period finding.
//!
//! For `f` with `f(x) = f(x + r)` and `r < 2^m`, the input register holds
//! `2m` bits and the output register `m` bits. A QFT of the input register
//! concentrates the measured value `y` near multiples of `2^{2m} / r`, so the
//! continued-fraction expansion of `y / 2^{2m}` has a denominator dividing
//! `r`. Several such denominators are combined by LCM.

use rand::Rng;
use tracing::{debug, instrument, trace};

use qbits::{BitRange, MAX_QUBITS, QState};
use qbits_math::{continued_fraction, lcm};

use crate::config::PeriodFinderConfig;
use crate::error::{AlgoError, AlgoResult};

/// Registers for a period-finding circuit with `num_out_bits` output bits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodRegisters {
    pub(crate) num_out_bits: u32,
    pub(crate) inputs: BitRange,
    pub(crate) outputs: BitRange,
}

impl PeriodRegisters {
    pub(crate) fn new(algorithm: &'static str, num_out_bits: u32) -> AlgoResult<Self> {
        if num_out_bits == 0 {
            return Err(AlgoError::NoInputBits(algorithm));
        }
        let needed = 3 * u64::from(num_out_bits);
        if needed > u64::from(MAX_QUBITS) {
            return Err(AlgoError::TooManyQubits {
                algorithm,
                needed,
                max: MAX_QUBITS,
            });
        }
        Ok(Self {
            num_out_bits,
            inputs: BitRange::new(num_out_bits, 3 * num_out_bits - 1),
            outputs: BitRange::new(0, num_out_bits - 1),
        })
    }

    pub(crate) fn output_range(&self) -> u64 {
        1 << self.num_out_bits
    }

    /// Tolerance that separates fractions with denominators below
    /// `output_range`.
    fn accuracy(&self) -> f64 {
        let range = self.output_range() as f64;
        1.0 / (2.0 * range * range)
    }

    /// Run the circuit once and return the denominator of the continued
    /// fraction of the measured input value.
    pub(crate) fn sample_denominator<F, R>(&self, f: F, rng: &mut R) -> AlgoResult<u64>
    where
        F: FnMut(u64) -> u64,
        R: Rng,
    {
        let total = self.inputs.to + 1;
        // measuring the output register first shrinks the state before the QFT
        let collapsed = QState::new(total)?
            .hadamard(self.inputs)?
            .apply_function(self.inputs, self.outputs, f)?
            .measure_with_rng(self.outputs, &mut *rng)?
            .new_state;
        let y = collapsed
            .qft(self.inputs)?
            .measure_with_rng(self.inputs, &mut *rng)?
            .outcome;
        let input_range = (1u64 << self.inputs.width()) as f64;
        let cf = continued_fraction(y as f64 / input_range, self.accuracy())?;
        trace!(y, denominator = cf.denominator, "period sample");
        // y / 2^k is non-negative, so the denominator is positive
        Ok(cf.denominator.unsigned_abs())
    }
}

/// General period finder.
///
/// ```rust
/// use qbits_algos::PeriodFinder;
///
/// let finder = PeriodFinder::new(|x| x % 4, 3);
/// assert_eq!(finder.find_period().unwrap(), Some(4));
/// ```
pub struct PeriodFinder<F> {
    f: F,
    num_out_bits: u32,
    config: PeriodFinderConfig,
}

impl<F> PeriodFinder<F>
where
    F: Fn(u64) -> u64,
{
    /// Finder for a function whose values and period fit in `num_out_bits`
    /// bits.
    pub fn new(f: F, num_out_bits: u32) -> Self {
        Self {
            f,
            num_out_bits,
            config: PeriodFinderConfig::default(),
        }
    }

    /// Override the attempt budget.
    #[must_use]
    pub fn with_config(mut self, config: PeriodFinderConfig) -> Self {
        self.config = config;
        self
    }

    /// Find the period using the thread-local RNG.
    pub fn find_period(&self) -> AlgoResult<Option<u64>> {
        self.find_period_with_rng(rand::thread_rng())
    }

    /// Find the smallest `r` the samples support with `f(0) = f(r)`.
    ///
    /// Returns `Ok(None)` when no attempt produced a verified period.
    #[instrument(skip(self, rng), fields(num_out_bits = self.num_out_bits))]
    pub fn find_period_with_rng<R: Rng>(&self, mut rng: R) -> AlgoResult<Option<u64>> {
        let registers = PeriodRegisters::new("period finding", self.num_out_bits)?;
        let output_range = registers.output_range();

        for attempt in 0..self.config.attempts {
            let mut estimate = 1;
            for _ in 0..self.config.samples_per_attempt {
                let denominator = registers.sample_denominator(&self.f, &mut rng)?;
                let combined = lcm(denominator, estimate);
                // larger values cannot be the period
                if combined <= output_range {
                    estimate = combined;
                }
            }
            let verified = (self.f)(0) == (self.f)(estimate);
            debug!(attempt, estimate, verified, "period estimate");
            if verified {
                return Ok(Some(estimate));
            }
        }
        Ok(None)
    }
}
