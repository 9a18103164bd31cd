//! Single-qubit gates and their controlled forms.
//!
//! Every gate is a closure over [`QState::apply_controlled_operator`], which
//! maps each amplitude pair `(a0, a1)` that differs only in the target bit.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::bits::{BitSelector, mask_of};
use crate::complex::{Complex, I, ZERO};
use crate::error::{StateError, StateResult};
use crate::state::{QState, insert_pruned};

impl QState {
    /// Apply `op` to every target bit in turn, restricted to basis states
    /// whose control bits are all 1.
    ///
    /// `op` receives the amplitudes of the target-bit-0 and target-bit-1
    /// partners and returns their replacements. Controls and targets must
    /// not share a bit.
    pub fn apply_controlled_operator<F>(
        &self,
        controls: Option<BitSelector>,
        targets: impl Into<BitSelector>,
        op: F,
    ) -> StateResult<QState>
    where
        F: Fn(Complex, Complex) -> (Complex, Complex),
    {
        let n = self.num_bits();
        let targets = targets.into().to_list(n)?;
        let controls = match controls {
            Some(selector) => selector.to_list(n)?,
            None => Vec::new(),
        };
        if let Some(&bit) = controls.iter().find(|b| targets.contains(b)) {
            return Err(StateError::OverlappingBits { bit });
        }
        let control_mask = mask_of(&controls);

        let mut amplitudes = self.amplitudes().clone();
        for &target in &targets {
            amplitudes = apply_to_target(&amplitudes, target, control_mask, &op);
            trace!(target, control_mask, nonzero = amplitudes.len(), "gate pass");
        }
        Ok(QState::from_parts(n, amplitudes))
    }

    /// Hadamard on each target.
    pub fn hadamard(&self, targets: impl Into<BitSelector>) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, hadamard_op)
    }

    /// Controlled Hadamard.
    pub fn controlled_hadamard(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, hadamard_op)
    }

    /// Pauli X (NOT).
    pub fn x(&self, targets: impl Into<BitSelector>) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, x_op)
    }

    /// Controlled X (CNOT).
    pub fn controlled_x(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, x_op)
    }

    /// Pauli Y.
    pub fn y(&self, targets: impl Into<BitSelector>) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, y_op)
    }

    /// Controlled Y.
    pub fn controlled_y(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, y_op)
    }

    /// Pauli Z.
    pub fn z(&self, targets: impl Into<BitSelector>) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, z_op)
    }

    /// Controlled Z.
    pub fn controlled_z(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, z_op)
    }

    /// S: phase of `i` on `|1>`.
    pub fn s(&self, targets: impl Into<BitSelector>) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, s_op)
    }

    pub fn controlled_s(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, s_op)
    }

    /// T: phase of `e^{iπ/4}` on `|1>`.
    pub fn t(&self, targets: impl Into<BitSelector>) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, t_op)
    }

    pub fn controlled_t(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, t_op)
    }

    /// Rotation by `angle` about the X axis.
    pub fn rotate_x(&self, targets: impl Into<BitSelector>, angle: f64) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, rotate_x_op(angle))
    }

    pub fn controlled_rotate_x(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
        angle: f64,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, rotate_x_op(angle))
    }

    /// Rotation by `angle` about the Y axis.
    pub fn rotate_y(&self, targets: impl Into<BitSelector>, angle: f64) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, rotate_y_op(angle))
    }

    pub fn controlled_rotate_y(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
        angle: f64,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, rotate_y_op(angle))
    }

    /// Rotation by `angle` about the Z axis.
    pub fn rotate_z(&self, targets: impl Into<BitSelector>, angle: f64) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, rotate_z_op(angle))
    }

    pub fn controlled_rotate_z(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
        angle: f64,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, rotate_z_op(angle))
    }

    /// Phase shift `e^{i·angle}` on `|1>`.
    pub fn phase(&self, targets: impl Into<BitSelector>, angle: f64) -> StateResult<QState> {
        self.apply_controlled_operator(None, targets, phase_op(angle))
    }

    pub fn controlled_phase(
        &self,
        controls: impl Into<BitSelector>,
        targets: impl Into<BitSelector>,
        angle: f64,
    ) -> StateResult<QState> {
        self.apply_controlled_operator(Some(controls.into()), targets, phase_op(angle))
    }

    /// X on `target` when every control bit is 1.
    pub fn toffoli(&self, controls: impl Into<BitSelector>, target: u32) -> StateResult<QState> {
        self.controlled_x(controls, target)
    }

    /// Exchange bits `a` and `b` (three CNOTs).
    pub fn swap(&self, a: u32, b: u32) -> StateResult<QState> {
        self.controlled_x(a, b)?
            .controlled_x(b, a)?
            .controlled_x(a, b)
    }

    /// Fredkin gate: exchange `a` and `b` when every control bit is 1.
    pub fn controlled_swap(
        &self,
        controls: impl Into<BitSelector>,
        a: u32,
        b: u32,
    ) -> StateResult<QState> {
        let mut outer = controls.into().to_list(self.num_bits())?;
        outer.push(a);
        self.controlled_x(b, a)?
            .toffoli(outer, b)?
            .controlled_x(b, a)
    }
}

fn apply_to_target<F>(
    amplitudes: &FxHashMap<u64, Complex>,
    target: u32,
    control_mask: u64,
    op: &F,
) -> FxHashMap<u64, Complex>
where
    F: Fn(Complex, Complex) -> (Complex, Complex),
{
    let target_mask = 1u64 << target;
    let mut handled = FxHashSet::default();
    let mut next = FxHashMap::default();
    for &index in amplitudes.keys() {
        if handled.contains(&index) {
            continue;
        }
        handled.insert(index ^ target_mask);

        let zero = index & !target_mask;
        let one = index | target_mask;
        let a0 = amplitudes.get(&zero).copied().unwrap_or(ZERO);
        let a1 = amplitudes.get(&one).copied().unwrap_or(ZERO);
        let (b0, b1) = if index & control_mask == control_mask {
            op(a0, a1)
        } else {
            (a0, a1)
        };
        insert_pruned(&mut next, zero, b0);
        insert_pruned(&mut next, one, b1);
    }
    next
}

fn hadamard_op(a0: Complex, a1: Complex) -> (Complex, Complex) {
    ((a0 + a1) * FRAC_1_SQRT_2, (a0 - a1) * FRAC_1_SQRT_2)
}

fn x_op(a0: Complex, a1: Complex) -> (Complex, Complex) {
    (a1, a0)
}

fn y_op(a0: Complex, a1: Complex) -> (Complex, Complex) {
    (-I * a1, I * a0)
}

fn z_op(a0: Complex, a1: Complex) -> (Complex, Complex) {
    (a0, -a1)
}

fn s_op(a0: Complex, a1: Complex) -> (Complex, Complex) {
    (a0, I * a1)
}

fn t_op(a0: Complex, a1: Complex) -> (Complex, Complex) {
    (a0, Complex::from_polar(1.0, FRAC_PI_4) * a1)
}

fn rotate_x_op(angle: f64) -> impl Fn(Complex, Complex) -> (Complex, Complex) {
    let (sin, cos) = (angle / 2.0).sin_cos();
    let minus_i_sin = Complex::new(0.0, -sin);
    move |a0, a1| (a0 * cos + minus_i_sin * a1, minus_i_sin * a0 + a1 * cos)
}

fn rotate_y_op(angle: f64) -> impl Fn(Complex, Complex) -> (Complex, Complex) {
    let (sin, cos) = (angle / 2.0).sin_cos();
    move |a0, a1| (a0 * cos - a1 * sin, a0 * sin + a1 * cos)
}

fn rotate_z_op(angle: f64) -> impl Fn(Complex, Complex) -> (Complex, Complex) {
    let (sin, cos) = (angle / 2.0).sin_cos();
    let down = Complex::new(cos, -sin);
    let up = Complex::new(cos, sin);
    move |a0, a1| (down * a0, up * a1)
}

fn phase_op(angle: f64) -> impl Fn(Complex, Complex) -> (Complex, Complex) {
    let shift = Complex::from_polar(1.0, angle);
    move |a0, a1| (a0, shift * a1)
}
