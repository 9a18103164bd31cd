//! Quantum Fourier transform.

use std::f64::consts::PI;

use tracing::trace;

use crate::bits::BitSelector;
use crate::error::StateResult;
use crate::state::QState;

impl QState {
    /// Quantum Fourier transform over the selected bits.
    ///
    /// The first selected bit is the least significant bit of the field
    /// value `x`, and the field is mapped to
    /// `2^{-w/2} Σ_k e^{2πi·xk/2^w} |k>`. On a single bit this is the
    /// Hadamard gate.
    pub fn qft(&self, bits: impl Into<BitSelector>) -> StateResult<QState> {
        let bits = bits.into().to_list(self.num_bits())?;
        let n = bits.len();

        let mut state = self.clone();
        for t in (0..n).rev() {
            state = state.hadamard(bits[t])?;
            for c in (0..t).rev() {
                let angle = PI / (1u64 << (t - c)) as f64;
                state = state.controlled_phase(bits[c], bits[t], angle)?;
            }
        }
        for i in 0..n / 2 {
            state = state.swap(bits[i], bits[n - 1 - i])?;
        }
        trace!(width = n, nonzero = state.len(), "qft");
        Ok(state)
    }
}
