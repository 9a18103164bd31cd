//! Sparse quantum state.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::bits::{BitSelector, value_mask};
use crate::complex::{Complex, ComplexExt, FormatOptions, ONE, ZERO};
use crate::error::{StateError, StateResult};

/// Amplitudes with magnitude at or below this are dropped.
pub const ROUND_TO_ZERO: f64 = 1e-7;

/// Largest supported register width.
pub const MAX_QUBITS: u32 = 63;

/// An immutable state of `num_bits` qubits.
///
/// Only non-zero amplitudes are stored, keyed by basis index. Every
/// operation returns a new state and leaves the receiver untouched.
///
/// ```rust
/// use qbits::QState;
///
/// let state: QState = "|000>".parse().unwrap();
/// let state = state.hadamard(2).unwrap();
/// assert_eq!(state.to_string(), "0.7071 |000> + 0.7071 |100>");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord", into = "StateRecord")]
pub struct QState {
    num_bits: u32,
    amplitudes: FxHashMap<u64, Complex>,
}

/// Serialized form of a [`QState`], validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateRecord {
    num_bits: u32,
    amplitudes: Vec<(u64, Complex)>,
}

impl From<QState> for StateRecord {
    fn from(state: QState) -> Self {
        let amplitudes = state
            .iter()
            .map(|entry| (entry.index, entry.amplitude))
            .collect();
        Self {
            num_bits: state.num_bits,
            amplitudes,
        }
    }
}

impl TryFrom<StateRecord> for QState {
    type Error = StateError;

    fn try_from(record: StateRecord) -> StateResult<Self> {
        QState::from_amplitudes(record.num_bits, record.amplitudes)
    }
}

/// One non-zero entry of a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateAmplitude {
    /// Width of the state the entry came from.
    pub num_bits: u32,
    /// Basis index.
    pub index: u64,
    /// Amplitude of the basis state.
    pub amplitude: Complex,
}

impl StateAmplitude {
    /// The basis state as a zero-padded bit string, most significant first.
    pub fn as_bit_string(&self) -> String {
        format!("{:0width$b}", self.index, width = self.num_bits as usize)
    }
}

pub(crate) fn check_width(num_bits: u32) -> StateResult<()> {
    if num_bits == 0 || num_bits > MAX_QUBITS {
        return Err(StateError::InvalidWidth {
            num_bits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

/// Store `amplitude` at `index` unless it rounds to zero.
pub(crate) fn insert_pruned(map: &mut FxHashMap<u64, Complex>, index: u64, amplitude: Complex) {
    if amplitude.magnitude() > ROUND_TO_ZERO {
        map.insert(index, amplitude);
    }
}

/// Parse `"0101"` or `"|0101>"` into `(num_bits, index)`.
fn parse_ket(literal: &str) -> StateResult<(u32, u64)> {
    let invalid = || StateError::InvalidBitString(literal.to_string());
    let trimmed = literal.trim();
    let body = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let body = body.strip_suffix('>').unwrap_or(body);
    if body.is_empty() || body.len() > MAX_QUBITS as usize {
        return Err(invalid());
    }
    if !body.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
    }
    let index = u64::from_str_radix(body, 2).map_err(|_| invalid())?;
    Ok((body.len() as u32, index))
}

impl QState {
    /// The all-zero basis state `|0…0>`.
    pub fn new(num_bits: u32) -> StateResult<Self> {
        check_width(num_bits)?;
        let mut amplitudes = FxHashMap::default();
        amplitudes.insert(0, ONE);
        Ok(Self {
            num_bits,
            amplitudes,
        })
    }

    /// The basis state named by a ket literal such as `"|0101>"` or
    /// `"0101"`. The literal's length is the register width.
    pub fn from_bits(literal: &str) -> StateResult<Self> {
        let (num_bits, index) = parse_ket(literal)?;
        let mut amplitudes = FxHashMap::default();
        amplitudes.insert(index, ONE);
        Ok(Self {
            num_bits,
            amplitudes,
        })
    }

    /// A state from explicit `(index, amplitude)` pairs.
    ///
    /// Repeated indices are summed. The amplitudes are stored as given, not
    /// normalized.
    pub fn from_amplitudes(
        num_bits: u32,
        amplitudes: impl IntoIterator<Item = (u64, Complex)>,
    ) -> StateResult<Self> {
        check_width(num_bits)?;
        let limit = value_mask(num_bits);
        let mut summed: FxHashMap<u64, Complex> = FxHashMap::default();
        for (index, amplitude) in amplitudes {
            if index > limit {
                return Err(StateError::IndexOutOfRange { index, num_bits });
            }
            *summed.entry(index).or_insert(ZERO) += amplitude;
        }
        summed.retain(|_, a| a.magnitude() > ROUND_TO_ZERO);
        Ok(Self {
            num_bits,
            amplitudes: summed,
        })
    }

    /// Wrap an already-pruned map. Callers keep indices within `num_bits`.
    pub(crate) fn from_parts(num_bits: u32, amplitudes: FxHashMap<u64, Complex>) -> Self {
        Self {
            num_bits,
            amplitudes,
        }
    }

    pub(crate) fn amplitudes(&self) -> &FxHashMap<u64, Complex> {
        &self.amplitudes
    }

    /// Register width.
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Number of basis states with a non-zero amplitude.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// True if no amplitude is stored.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitude of basis state `index`; zero if absent.
    pub fn amplitude(&self, index: u64) -> Complex {
        self.amplitudes.get(&index).copied().unwrap_or(ZERO)
    }

    /// Amplitude of the basis state named by a ket literal.
    pub fn amplitude_of(&self, literal: &str) -> StateResult<Complex> {
        let (_, index) = parse_ket(literal)?;
        if index > value_mask(self.num_bits) {
            return Err(StateError::IndexOutOfRange {
                index,
                num_bits: self.num_bits,
            });
        }
        Ok(self.amplitude(index))
    }

    /// Non-zero entries in ascending basis order.
    pub fn sorted_states(&self) -> Vec<StateAmplitude> {
        let mut entries: Vec<StateAmplitude> = self
            .amplitudes
            .iter()
            .map(|(&index, &amplitude)| StateAmplitude {
                num_bits: self.num_bits,
                index,
                amplitude,
            })
            .collect();
        entries.sort_unstable_by_key(|e| e.index);
        entries
    }

    /// Iterate the non-zero entries in ascending basis order.
    pub fn iter(&self) -> impl Iterator<Item = StateAmplitude> {
        self.sorted_states().into_iter()
    }

    /// Σ|a|² over all stored amplitudes.
    pub fn probability_mass(&self) -> f64 {
        self.amplitudes.values().map(|a| a.norm_sqr()).sum()
    }

    /// Same width and every amplitude within `tolerance` of the other's.
    pub fn approx_eq(&self, other: &QState, tolerance: f64) -> bool {
        self.num_bits == other.num_bits
            && self
                .amplitudes
                .keys()
                .chain(other.amplitudes.keys())
                .all(|&i| (self.amplitude(i) - other.amplitude(i)).norm() <= tolerance)
    }

    fn check_same_width(&self, other: &QState) -> StateResult<()> {
        if self.num_bits != other.num_bits {
            return Err(StateError::WidthMismatch {
                left: self.num_bits,
                right: other.num_bits,
            });
        }
        Ok(())
    }

    fn combine(&self, other: &QState, sign: f64) -> StateResult<Self> {
        self.check_same_width(other)?;
        let mut amplitudes = self.amplitudes.clone();
        for (&index, &amplitude) in &other.amplitudes {
            *amplitudes.entry(index).or_insert(ZERO) += amplitude * sign;
        }
        amplitudes.retain(|_, a| a.magnitude() > ROUND_TO_ZERO);
        Ok(Self::from_parts(self.num_bits, amplitudes))
    }

    /// Amplitude-wise sum. The result is not normalized.
    pub fn add(&self, other: &QState) -> StateResult<Self> {
        self.combine(other, 1.0)
    }

    /// Amplitude-wise difference. The result is not normalized.
    pub fn subtract(&self, other: &QState) -> StateResult<Self> {
        self.combine(other, -1.0)
    }

    /// Every amplitude multiplied by `factor`.
    pub fn scale(&self, factor: Complex) -> Self {
        let mut amplitudes = FxHashMap::default();
        for (&index, &amplitude) in &self.amplitudes {
            insert_pruned(&mut amplitudes, index, amplitude * factor);
        }
        Self::from_parts(self.num_bits, amplitudes)
    }

    /// Rescale so that Σ|a|² = 1.
    pub fn normalize(&self) -> StateResult<Self> {
        let mass = self.probability_mass();
        if mass <= 0.0 {
            return Err(StateError::ZeroNorm);
        }
        Ok(self.scale(Complex::new(1.0 / mass.sqrt(), 0.0)))
    }

    /// `self ⊗ other`, with `self` occupying the high bits.
    pub fn tensor_product(&self, other: &QState) -> StateResult<Self> {
        let num_bits = self.num_bits + other.num_bits;
        check_width(num_bits)?;
        let mut amplitudes = FxHashMap::default();
        for (&high, &a) in &self.amplitudes {
            for (&low, &b) in &other.amplitudes {
                insert_pruned(&mut amplitudes, (high << other.num_bits) | low, a * b);
            }
        }
        Ok(Self::from_parts(num_bits, amplitudes))
    }

    /// Reduce to the selected field: amplitudes with equal field values are
    /// summed and the result is normalized into a state as wide as the field.
    ///
    /// Only meaningful when the field is not entangled with the other bits.
    pub fn project_onto(&self, bits: impl Into<BitSelector>) -> StateResult<Self> {
        let range = bits.into().to_range(self.num_bits)?;
        let mut summed: FxHashMap<u64, Complex> = FxHashMap::default();
        for (&index, &amplitude) in &self.amplitudes {
            *summed.entry(range.extract(index)).or_insert(ZERO) += amplitude;
        }
        summed.retain(|_, a| a.magnitude() > ROUND_TO_ZERO);
        Self::from_parts(range.width(), summed).normalize()
    }
}

impl FromStr for QState {
    type Err = StateError;

    fn from_str(s: &str) -> StateResult<Self> {
        QState::from_bits(s)
    }
}

impl fmt::Display for QState {
    /// Ascending basis states as `c₁ |b₁> + c₂ |b₂> + …` with 4-decimal
    /// amplitudes; a coefficient of exactly `1` is left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amplitudes.is_empty() {
            return f.write_str("0");
        }
        let options = FormatOptions::default().decimal_places(4);
        for (i, entry) in self.iter().enumerate() {
            let coefficient = if i == 0 {
                entry.amplitude.format_with(options)
            } else {
                entry.amplitude.format_with(options.spaced_sign())
            };
            if coefficient != "1" {
                write!(f, "{coefficient} ")?;
            }
            write!(f, "|{}>", entry.as_bit_string())?;
        }
        Ok(())
    }
}
