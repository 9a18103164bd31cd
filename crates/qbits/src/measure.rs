//! Measurement and collapse.

use std::fmt;

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bits::BitSelector;
use crate::complex::Complex;
use crate::error::{StateError, StateResult};
use crate::state::{QState, insert_pruned};

/// Result of measuring a field of a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Width of the measured field.
    pub num_bits: u32,
    /// Value read from the measured field.
    pub outcome: u64,
    /// The collapsed, renormalized state. Same width as the measured state.
    pub new_state: QState,
}

impl Measurement {
    /// `outcome` as a bit string zero-padded to the measured width.
    pub fn as_bit_string(&self) -> String {
        format!("{:0width$b}", self.outcome, width = self.num_bits as usize)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{outcome: {}, new_state: {}}}", self.outcome, self.new_state)
    }
}

impl QState {
    /// Measure a contiguous field using the thread-local RNG.
    pub fn measure(&self, bits: impl Into<BitSelector>) -> StateResult<Measurement> {
        self.measure_with_rng(bits, &mut rand::thread_rng())
    }

    /// Measure a contiguous field, drawing from `rng`.
    pub fn measure_with_rng<R: Rng>(
        &self,
        bits: impl Into<BitSelector>,
        rng: &mut R,
    ) -> StateResult<Measurement> {
        self.measure_with(bits, || rng.r#gen::<f64>())
    }

    /// Measure a contiguous field with `draw` supplying a number in `[0, 1)`.
    ///
    /// Basis states are walked in ascending index order; the first one at
    /// which the cumulative probability exceeds the draw is sampled, or the
    /// last one if none does. The draw is taken only after the selector has
    /// been validated.
    ///
    /// ```rust
    /// use qbits::{BitSelector, QState};
    ///
    /// let state = QState::from_bits("|00>").unwrap().hadamard(BitSelector::All).unwrap();
    /// let m = state.measure_with(0..=1, || 0.6).unwrap();
    /// assert_eq!(m.outcome, 2);
    /// assert!(m.new_state.approx_eq(&QState::from_bits("|10>").unwrap(), 1e-12));
    /// ```
    pub fn measure_with(
        &self,
        bits: impl Into<BitSelector>,
        draw: impl FnOnce() -> f64,
    ) -> StateResult<Measurement> {
        let range = bits.into().to_range(self.num_bits())?;
        let entries = self.sorted_states();
        if entries.is_empty() {
            return Err(StateError::ZeroNorm);
        }

        let r = draw();
        let mut cumulative = 0.0;
        let mut sampled = entries[entries.len() - 1].index;
        for entry in &entries {
            cumulative += entry.amplitude.norm_sqr();
            if cumulative > r {
                sampled = entry.index;
                break;
            }
        }
        let outcome = range.extract(sampled);

        let kept: Vec<(u64, Complex)> = entries
            .iter()
            .filter(|e| range.extract(e.index) == outcome)
            .map(|e| (e.index, e.amplitude))
            .collect();
        let mass: f64 = kept.iter().map(|(_, a)| a.norm_sqr()).sum();
        if mass <= 0.0 {
            return Err(StateError::ZeroNorm);
        }
        let scale = 1.0 / mass.sqrt();
        let mut amplitudes = FxHashMap::default();
        for (index, amplitude) in kept {
            insert_pruned(&mut amplitudes, index, amplitude * scale);
        }

        debug!(?range, r, outcome, kept = amplitudes.len(), "measured");
        Ok(Measurement {
            num_bits: range.width(),
            outcome,
            new_state: QState::from_parts(self.num_bits(), amplitudes),
        })
    }
}
