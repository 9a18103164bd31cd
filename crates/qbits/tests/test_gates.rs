//! Gate, oracle and projection behaviour on small registers.

use std::cell::RefCell;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qbits::{BitSelector, Complex, QState, StateError, ZERO};

fn ket(s: &str) -> QState {
    QState::from_bits(s).unwrap()
}

fn c(re: f64, im: f64) -> Complex {
    Complex::new(re, im)
}

#[track_caller]
fn assert_approx(actual: Complex, expected: Complex) {
    assert!(
        (actual - expected).norm() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

/// Operator that ignores its input and writes fixed amplitudes.
fn fixed(a0: Complex, a1: Complex) -> impl Fn(Complex, Complex) -> (Complex, Complex) {
    move |_, _| (a0, a1)
}

// ---------------------------------------------------------------------------
// Controlled operator application
// ---------------------------------------------------------------------------

#[test]
fn zero_control_leaves_state_alone() {
    let calls = RefCell::new(0);
    let op = |a0: Complex, a1: Complex| {
        *calls.borrow_mut() += 1;
        (a0, a1)
    };
    let x = ket("|001>")
        .apply_controlled_operator(Some(BitSelector::Bit(2)), 0, &op)
        .unwrap();
    assert_eq!(x, ket("|001>"));
    let x = ket("|001>")
        .apply_controlled_operator(Some(BitSelector::Bit(2)), 0..=1, &op)
        .unwrap();
    assert_eq!(x, ket("|001>"));
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn set_control_invokes_operator_with_pair() {
    let seen = RefCell::new(Vec::new());
    let x = ket("|100>")
        .apply_controlled_operator(Some(BitSelector::Bit(2)), 0, |a0, a1| {
            seen.borrow_mut().push((a0, a1));
            (c(0.2, 0.0), c(0.3, 0.0))
        })
        .unwrap();
    assert_eq!(seen.into_inner(), vec![(c(1.0, 0.0), ZERO)]);
    assert_approx(x.amplitude_of("|100>").unwrap(), c(0.2, 0.0));
    assert_approx(x.amplitude_of("|101>").unwrap(), c(0.3, 0.0));
}

#[test]
fn no_controls_always_applies() {
    let x = ket("|000>")
        .apply_controlled_operator(None, 0, fixed(c(0.2, 0.0), c(0.3, 0.0)))
        .unwrap();
    assert_approx(x.amplitude_of("|000>").unwrap(), c(0.2, 0.0));
    assert_approx(x.amplitude_of("|001>").unwrap(), c(0.3, 0.0));
}

#[test]
fn targets_are_processed_in_order() {
    let seen = RefCell::new(Vec::new());
    let x = ket("|101>")
        .apply_controlled_operator(Some(BitSelector::Bit(2)), 0..=1, |a0, a1| {
            seen.borrow_mut().push((a0, a1));
            (c(0.2, 0.0), c(0.3, 0.0))
        })
        .unwrap();
    let seen = seen.into_inner();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], (ZERO, c(1.0, 0.0)));
    // the two bit-1 pairs are visited in hash order
    let mut rest = vec![seen[1], seen[2]];
    rest.sort_by(|a, b| a.0.re.total_cmp(&b.0.re));
    assert_eq!(rest, vec![(c(0.2, 0.0), ZERO), (c(0.3, 0.0), ZERO)]);
    assert_approx(x.amplitude_of("|100>").unwrap(), c(0.2, 0.0));
    assert_approx(x.amplitude_of("|101>").unwrap(), c(0.2, 0.0));
    assert_approx(x.amplitude_of("|110>").unwrap(), c(0.3, 0.0));
    assert_approx(x.amplitude_of("|111>").unwrap(), c(0.3, 0.0));
}

#[test]
fn any_zero_control_blocks_operator() {
    let op = fixed(c(0.2, 0.0), c(0.3, 0.0));
    let range = ket("|101>")
        .apply_controlled_operator(Some(BitSelector::range(1, 2)), 0, &op)
        .unwrap();
    assert_eq!(range, ket("|101>"));
    let list = ket("|101>")
        .apply_controlled_operator(Some(BitSelector::List(vec![1, 2])), 0, &op)
        .unwrap();
    assert_eq!(list, ket("|101>"));
}

#[test]
fn all_set_controls_unblock_operator() {
    let op = fixed(c(0.2, 0.0), c(0.3, 0.0));
    let x = ket("|110>")
        .apply_controlled_operator(Some(BitSelector::range(1, 2)), 0, &op)
        .unwrap();
    assert_approx(x.amplitude_of("|110>").unwrap(), c(0.2, 0.0));
    assert_approx(x.amplitude_of("|111>").unwrap(), c(0.3, 0.0));
    let x = ket("|1010>")
        .apply_controlled_operator(Some(BitSelector::List(vec![1, 3])), 0, &op)
        .unwrap();
    assert_approx(x.amplitude_of("|1010>").unwrap(), c(0.2, 0.0));
    assert_approx(x.amplitude_of("|1011>").unwrap(), c(0.3, 0.0));
}

#[test]
fn usage_errors_reported_before_application() {
    let s = ket("|000>");
    assert_eq!(
        s.hadamard(BitSelector::range(2, 0)),
        Err(StateError::InvalidRange { from: 2, to: 0 })
    );
    assert_eq!(
        s.x(3),
        Err(StateError::BitOutOfRange {
            bit: 3,
            num_bits: 3
        })
    );
    assert_eq!(
        s.controlled_hadamard(BitSelector::All, 0),
        Err(StateError::OverlappingBits { bit: 0 })
    );
    assert_eq!(s.z(Vec::<u32>::new()), Err(StateError::EmptySelector));
}

// ---------------------------------------------------------------------------
// Named gates
// ---------------------------------------------------------------------------

#[test]
fn pauli_gates() {
    assert_eq!(ket("|0>").x(0).unwrap(), ket("|1>"));
    assert_eq!(ket("|1>").x(0).unwrap(), ket("|0>"));
    assert_eq!(ket("|0>").z(0).unwrap(), ket("|0>"));
    assert_eq!(ket("|1>").z(0).unwrap().amplitude(1), c(-1.0, 0.0));
    assert_eq!(ket("|0>").y(0).unwrap().amplitude(1), c(0.0, 1.0));
    assert_eq!(ket("|1>").y(0).unwrap().amplitude(0), c(0.0, -1.0));
}

#[test]
fn controlled_paulis() {
    assert_eq!(ket("|000>").controlled_x(2, 0).unwrap(), ket("|000>"));
    assert_eq!(ket("|100>").controlled_x(2, 0).unwrap(), ket("|101>"));
    assert_eq!(ket("|101>").controlled_x(2, 0).unwrap(), ket("|100>"));

    assert_eq!(ket("|001>").controlled_z(2, 0).unwrap(), ket("|001>"));
    assert_eq!(
        ket("|101>").controlled_z(2, 0).unwrap().amplitude(0b101),
        c(-1.0, 0.0)
    );
    // two phase flips cancel
    assert_eq!(
        ket("|111>").controlled_z(2, 0..=1).unwrap(),
        ket("|111>")
    );

    assert_eq!(ket("|001>").controlled_y(2, 0).unwrap(), ket("|001>"));
    assert_eq!(
        ket("|100>").controlled_y(2, 0).unwrap().amplitude(0b101),
        c(0.0, 1.0)
    );
}

#[test]
fn hadamard_on_one_bit() {
    let x = ket("|000>").hadamard(2).unwrap();
    assert_eq!(x.len(), 2);
    assert_approx(x.amplitude_of("|000>").unwrap(), c(FRAC_1_SQRT_2, 0.0));
    assert_approx(x.amplitude_of("|100>").unwrap(), c(FRAC_1_SQRT_2, 0.0));
    assert_eq!(x.amplitude_of("|001>").unwrap(), ZERO);
}

#[test]
fn hadamard_is_its_own_inverse() {
    let x = ket("|000>").hadamard(2).unwrap().hadamard(2).unwrap();
    assert_eq!(x.len(), 1);
    assert_approx(x.amplitude_of("|000>").unwrap(), c(1.0, 0.0));
}

#[test]
fn hadamard_over_all_and_range() {
    let all = ket("|00>").hadamard(BitSelector::All).unwrap();
    for k in ["|00>", "|01>", "|10>", "|11>"] {
        assert_approx(all.amplitude_of(k).unwrap(), c(0.5, 0.0));
    }
    let range = ket("|000>").hadamard(1..=2).unwrap();
    for k in ["|000>", "|010>", "|100>", "|110>"] {
        assert_approx(range.amplitude_of(k).unwrap(), c(0.5, 0.0));
    }
    for k in ["|001>", "|011>", "|101>", "|111>"] {
        assert_eq!(range.amplitude_of(k).unwrap(), ZERO);
    }
}

#[test]
fn controlled_hadamard() {
    assert_eq!(ket("|001>").controlled_hadamard(2, 0).unwrap(), ket("|001>"));
    let x = ket("|101>").controlled_hadamard(2, 0).unwrap();
    assert_approx(x.amplitude_of("|100>").unwrap(), c(FRAC_1_SQRT_2, 0.0));
    assert_approx(x.amplitude_of("|101>").unwrap(), c(-FRAC_1_SQRT_2, 0.0));
}

#[test]
fn rotate_x() {
    let (s, co) = (PI / 8.0).sin_cos();
    let x = ket("|00>").rotate_x(1, PI / 4.0).unwrap();
    assert_approx(x.amplitude_of("|00>").unwrap(), c(co, 0.0));
    assert_approx(x.amplitude_of("|10>").unwrap(), c(0.0, -s));
    assert_eq!(x.amplitude_of("|01>").unwrap(), ZERO);

    let thrice = ket("|00>")
        .rotate_x(1, PI / 4.0)
        .and_then(|s| s.rotate_x(1, PI / 4.0))
        .and_then(|s| s.rotate_x(1, PI / 4.0))
        .unwrap();
    let (s3, c3) = (3.0 * PI / 8.0).sin_cos();
    assert_approx(thrice.amplitude_of("|00>").unwrap(), c(c3, 0.0));
    assert_approx(thrice.amplitude_of("|10>").unwrap(), c(0.0, -s3));

    let all = ket("|00>").rotate_x(BitSelector::All, PI / 4.0).unwrap();
    assert_approx(all.amplitude_of("|00>").unwrap(), c(co * co, 0.0));
    assert_approx(all.amplitude_of("|01>").unwrap(), c(0.0, -co * s));
    assert_approx(all.amplitude_of("|10>").unwrap(), c(0.0, -co * s));
    assert_approx(all.amplitude_of("|11>").unwrap(), c(-s * s, 0.0));
}

#[test]
fn rotate_y_and_z() {
    let (s, co) = (PI / 8.0).sin_cos();
    let y = ket("|00>").rotate_y(1, PI / 4.0).unwrap();
    assert_approx(y.amplitude_of("|00>").unwrap(), c(co, 0.0));
    assert_approx(y.amplitude_of("|10>").unwrap(), c(s, 0.0));

    let z0 = ket("|0>").rotate_z(0, PI / 4.0).unwrap();
    assert_approx(z0.amplitude(0), c(co, -s));
    assert_eq!(z0.amplitude(1), ZERO);
    let z1 = ket("|1>").rotate_z(0, PI / 4.0).unwrap();
    assert_approx(z1.amplitude(1), c(co, s));
}

#[test]
fn controlled_rotations() {
    let (s, co) = (PI / 8.0).sin_cos();
    for idle in [
        ket("|001>").controlled_rotate_x(2, 0, PI / 4.0),
        ket("|001>").controlled_rotate_y(2, 0, PI / 4.0),
        ket("|001>").controlled_rotate_z(2, 0, PI / 4.0),
    ] {
        assert_eq!(idle.unwrap(), ket("|001>"));
    }
    let x = ket("|100>").controlled_rotate_x(2, 0, PI / 4.0).unwrap();
    assert_approx(x.amplitude_of("|101>").unwrap(), c(0.0, -s));
    let y = ket("|100>").controlled_rotate_y(2, 0, PI / 4.0).unwrap();
    assert_approx(y.amplitude_of("|101>").unwrap(), c(s, 0.0));
    let z = ket("|100>").controlled_rotate_z(2, 0, PI / 4.0).unwrap();
    assert_approx(z.amplitude_of("|100>").unwrap(), c(co, -s));
    assert_eq!(z.amplitude_of("|101>").unwrap(), ZERO);
}

#[test]
fn s_and_t_compose_to_z() {
    let plus = ket("|0>").hadamard(0).unwrap();
    let tt = plus.t(0).and_then(|s| s.t(0)).unwrap();
    assert!(tt.approx_eq(&plus.s(0).unwrap(), 1e-12));
    let ss = plus.s(0).and_then(|s| s.s(0)).unwrap();
    assert!(ss.approx_eq(&plus.z(0).unwrap(), 1e-12));
    let cs = ket("|11>").controlled_s(1, 0).unwrap();
    assert_approx(cs.amplitude(0b11), c(0.0, 1.0));
    let ct = ket("|01>").controlled_t(1, 0).unwrap();
    assert_eq!(ct, ket("|01>"));
}

#[test]
fn controlled_phase_only_touches_both_set() {
    let s = ket("|00>").hadamard(BitSelector::All).unwrap();
    let p = s.controlled_phase(1, 0, PI).unwrap();
    assert_approx(p.amplitude(0b00), c(0.5, 0.0));
    assert_approx(p.amplitude(0b01), c(0.5, 0.0));
    assert_approx(p.amplitude(0b10), c(0.5, 0.0));
    assert_approx(p.amplitude(0b11), c(-0.5, 0.0));
}

#[test]
fn phase_kickback() {
    let x = ket("|01>")
        .hadamard(0)
        .and_then(|s| s.hadamard(1))
        .and_then(|s| s.controlled_x(1, 0))
        .and_then(|s| s.hadamard(0))
        .and_then(|s| s.hadamard(1))
        .unwrap();
    assert_eq!(x.len(), 1);
    assert_approx(x.amplitude_of("|11>").unwrap(), c(1.0, 0.0));
}

// ---------------------------------------------------------------------------
// Oracles
// ---------------------------------------------------------------------------

#[test]
fn oracle_sees_every_input_value() {
    let seen = RefCell::new(Vec::new());
    let f = |x: u64| {
        seen.borrow_mut().push(x);
        1
    };
    let x = ket("|1000>").hadamard(2).unwrap();
    x.apply_function(1..=2, 0, f).unwrap();
    let values = seen.into_inner();
    assert!(values.contains(&0));
    assert!(values.contains(&2));

    let seen = RefCell::new(Vec::new());
    x.apply_function(2, 0, |v| {
        seen.borrow_mut().push(v);
        1
    })
    .unwrap();
    let values = seen.into_inner();
    assert!(values.contains(&0));
    assert!(values.contains(&1));
}

#[test]
fn oracle_flips_target() {
    assert_eq!(ket("|00>").apply_function(1, 0, |_| 0).unwrap(), ket("|00>"));
    assert_eq!(ket("|00>").apply_function(1, 0, |_| 1).unwrap(), ket("|01>"));
    assert_eq!(ket("|01>").apply_function(1, 0, |_| 1).unwrap(), ket("|00>"));
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[test]
fn project_onto_field() {
    let x = ket("|1000>")
        .hadamard(2)
        .and_then(|s| s.hadamard(0))
        .and_then(|s| s.project_onto(1..=2))
        .unwrap();
    assert_eq!(x.num_bits(), 2);
    assert_approx(x.amplitude_of("|00>").unwrap(), c(FRAC_1_SQRT_2, 0.0));
    assert_approx(x.amplitude_of("|10>").unwrap(), c(FRAC_1_SQRT_2, 0.0));
    assert_eq!(x.amplitude_of("|01>").unwrap(), ZERO);
    assert_eq!(x.amplitude_of("|11>").unwrap(), ZERO);
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn display_rounds_and_subtracts() {
    assert_eq!(
        ket("|000>").hadamard(2).unwrap().to_string(),
        "0.7071 |000> + 0.7071 |100>"
    );
    assert_eq!(
        ket("|100>").hadamard(2).unwrap().to_string(),
        "0.7071 |000> - 0.7071 |100>"
    );
}
