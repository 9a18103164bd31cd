//! Small fixed-size algorithms whose outcome is certain, plus teleportation.
//!
//! Oracles are plain functions on the integer value of the input field. The
//! target register is bit 0 and the input register sits above it.

use rand::Rng;
use tracing::{debug, instrument};

use qbits::{BitSelector, MAX_QUBITS, QState};

use crate::error::{AlgoError, AlgoResult};

fn check_input_width(algorithm: &'static str, num_bits: u32) -> AlgoResult<()> {
    if num_bits == 0 {
        return Err(AlgoError::NoInputBits(algorithm));
    }
    if num_bits >= MAX_QUBITS {
        return Err(AlgoError::TooManyQubits {
            algorithm,
            needed: u64::from(num_bits) + 1,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

/// Deutsch's algorithm for `f: {0,1} → {0,1}`.
///
/// Returns 0 if `f` is constant and 1 if it is balanced, with a single
/// evaluation of the oracle circuit.
pub fn deutsch(f: impl FnMut(u64) -> u64) -> AlgoResult<u64> {
    let outcome = QState::from_bits("|01>")?
        .hadamard(BitSelector::All)?
        .apply_function(1, 0, f)?
        .hadamard(BitSelector::All)?
        .measure(1)?
        .outcome;
    Ok(outcome)
}

/// Deutsch–Jozsa for `f` on `num_bits` input bits, promised to be either
/// constant or balanced. Returns `true` for constant.
#[instrument(skip(f))]
pub fn deutsch_jozsa(num_bits: u32, f: impl FnMut(u64) -> u64) -> AlgoResult<bool> {
    check_input_width("Deutsch-Jozsa", num_bits)?;
    let inputs = BitSelector::range(1, num_bits);
    let m = QState::new(num_bits + 1)?
        .x(0)?
        .hadamard(BitSelector::All)?
        .apply_function(inputs.clone(), 0, f)?
        .hadamard(inputs.clone())?
        .measure(inputs)?;
    debug!(outcome = m.outcome, "Deutsch-Jozsa measured input register");
    Ok(m.outcome == 0)
}

/// Bernstein–Vazirani: recover `u` from `f(x) = x·u mod 2`.
///
/// `f` may return the unreduced dot product (see
/// [`hidden_string_function`]); only its low bit reaches the target.
#[instrument(skip(f))]
pub fn bernstein_vazirani(num_bits: u32, f: impl FnMut(u64) -> u64) -> AlgoResult<u64> {
    check_input_width("Bernstein-Vazirani", num_bits)?;
    let minus = QState::from_bits("|0>")?
        .subtract(&QState::from_bits("|1>")?)?
        .normalize()?;
    let inputs = BitSelector::range(1, num_bits);
    let m = QState::new(num_bits)?
        .tensor_product(&minus)?
        .hadamard(inputs.clone())?
        .apply_function(inputs.clone(), 0, f)?
        .hadamard(inputs.clone())?
        .measure(inputs)?;
    debug!(hidden = m.outcome, "Bernstein-Vazirani recovered string");
    Ok(m.outcome)
}

/// `x ↦ popcount(x & hidden)`, the oracle Bernstein–Vazirani inverts.
pub fn hidden_string_function(hidden: u64) -> impl Fn(u64) -> u64 + Copy {
    move |x| u64::from((x & hidden).count_ones())
}

/// Send two classical bits through one qubit of a shared Bell pair.
///
/// Bit 1 of `message` selects a Z and bit 0 an X on the sender's qubit.
/// Returns the two bits the receiver decodes.
pub fn superdense(message: u64) -> AlgoResult<u64> {
    if message > 0b11 {
        return Err(AlgoError::MessageOutOfRange(message));
    }
    let (alice, bob) = (1, 0);
    let mut state = QState::from_bits("|00>")?.hadamard(bob)?.controlled_x(bob, alice)?;
    if message & 0b10 != 0 {
        state = state.z(alice)?;
    }
    if message & 0b01 != 0 {
        state = state.x(alice)?;
    }
    let received = state
        .controlled_x(alice, bob)?
        .hadamard(alice)?
        .measure(BitSelector::All)?
        .outcome;
    Ok(received)
}

/// Teleport a 1-qubit state through a Bell pair, using the thread-local RNG
/// for the sender's measurement.
pub fn teleport(payload: &QState) -> AlgoResult<QState> {
    teleport_with_rng(payload, rand::thread_rng())
}

/// Teleport a 1-qubit state through a Bell pair.
///
/// The payload occupies bit 2 and the Bell pair bits 1 and 0. After the
/// sender measures bits 1–2 the receiver applies the X/Z corrections, and
/// bit 0 alone is returned; it equals the payload whatever was measured.
pub fn teleport_with_rng<R: Rng>(payload: &QState, mut rng: R) -> AlgoResult<QState> {
    if payload.num_bits() != 1 {
        return Err(AlgoError::PayloadWidth(payload.num_bits()));
    }
    let bell = QState::new(2)?.hadamard(1)?.controlled_x(1, 0)?;
    let sent = payload
        .tensor_product(&bell)?
        .controlled_x(2, 1)?
        .hadamard(2)?
        .measure_with_rng(1..=2, &mut rng)?;

    let mut state = sent.new_state;
    if sent.outcome & 0b01 != 0 {
        state = state.x(0)?;
    }
    if sent.outcome & 0b10 != 0 {
        state = state.z(0)?;
    }
    debug!(outcome = sent.outcome, "teleported qubit");
    Ok(state.project_onto(0)?)
}

/// Grover search over two bits with a single iteration, which is exact for
/// one marked item. `f` returns 1 for the marked input and 0 otherwise.
pub fn grover_two_bit(f: impl FnMut(u64) -> u64) -> AlgoResult<u64> {
    let inputs = BitSelector::range(1, 2);
    let outcome = QState::from_bits("|001>")?
        .hadamard(BitSelector::All)?
        .apply_function(inputs.clone(), 0, f)?
        .hadamard(inputs.clone())?
        .z(inputs.clone())?
        .controlled_z(2, 1)?
        .hadamard(inputs.clone())?
        .measure(inputs)?
        .outcome;
    Ok(outcome)
}
