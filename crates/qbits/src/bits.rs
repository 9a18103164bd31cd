//! Bit selection.
//!
//! Gates, oracles and measurements address qubits through a
//! [`BitSelector`]. Bit 0 is the least significant bit of a basis index, so
//! in the ket `|100>` bit 2 is set.

use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};

/// Which qubits an operation acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitSelector {
    /// A single bit.
    Bit(u32),
    /// Every bit of the state.
    All,
    /// Inclusive range `from..=to`.
    Range {
        /// Lowest bit.
        from: u32,
        /// Highest bit.
        to: u32,
    },
    /// Explicit bits, in the order given.
    List(Vec<u32>),
}

impl BitSelector {
    /// Inclusive range `from..=to`.
    pub fn range(from: u32, to: u32) -> Self {
        BitSelector::Range { from, to }
    }

    /// Resolve to an explicit list of distinct bits for a `num_bits` state.
    ///
    /// Ranges and [`BitSelector::All`] resolve in ascending order; lists keep
    /// their order.
    pub fn to_list(&self, num_bits: u32) -> StateResult<Vec<u32>> {
        let bits: Vec<u32> = match self {
            BitSelector::Bit(bit) => vec![*bit],
            BitSelector::All => (0..num_bits).collect(),
            BitSelector::Range { from, to } => {
                if from > to {
                    return Err(StateError::InvalidRange {
                        from: *from,
                        to: *to,
                    });
                }
                (*from..=*to).collect()
            }
            BitSelector::List(bits) => {
                if bits.is_empty() {
                    return Err(StateError::EmptySelector);
                }
                bits.clone()
            }
        };
        let mut seen = FxHashSet::default();
        for &bit in &bits {
            check_bit(bit, num_bits)?;
            if !seen.insert(bit) {
                return Err(StateError::OverlappingBits { bit });
            }
        }
        Ok(bits)
    }

    /// Resolve to a contiguous field for a `num_bits` state.
    ///
    /// A list is accepted only if it is already contiguous and ascending.
    pub fn to_range(&self, num_bits: u32) -> StateResult<BitRange> {
        let range = match self {
            BitSelector::Bit(bit) => BitRange::new(*bit, *bit),
            BitSelector::All => BitRange::new(0, num_bits.saturating_sub(1)),
            BitSelector::Range { from, to } => {
                if from > to {
                    return Err(StateError::InvalidRange {
                        from: *from,
                        to: *to,
                    });
                }
                BitRange::new(*from, *to)
            }
            BitSelector::List(bits) => {
                let (&first, &last) = match (bits.first(), bits.last()) {
                    (Some(first), Some(last)) => (first, last),
                    _ => return Err(StateError::EmptySelector),
                };
                let contiguous = bits
                    .iter()
                    .enumerate()
                    .all(|(i, &b)| u64::from(b) == u64::from(first) + i as u64);
                if !contiguous {
                    return Err(StateError::NotARange(bits.clone()));
                }
                BitRange::new(first, last)
            }
        };
        check_bit(range.to, num_bits)?;
        Ok(range)
    }
}

fn check_bit(bit: u32, num_bits: u32) -> StateResult<()> {
    if bit >= num_bits {
        return Err(StateError::BitOutOfRange { bit, num_bits });
    }
    Ok(())
}

impl From<u32> for BitSelector {
    fn from(bit: u32) -> Self {
        BitSelector::Bit(bit)
    }
}

impl From<RangeInclusive<u32>> for BitSelector {
    fn from(range: RangeInclusive<u32>) -> Self {
        BitSelector::Range {
            from: *range.start(),
            to: *range.end(),
        }
    }
}

impl From<Vec<u32>> for BitSelector {
    fn from(bits: Vec<u32>) -> Self {
        BitSelector::List(bits)
    }
}

impl From<&[u32]> for BitSelector {
    fn from(bits: &[u32]) -> Self {
        BitSelector::List(bits.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for BitSelector {
    fn from(bits: [u32; N]) -> Self {
        BitSelector::List(bits.to_vec())
    }
}

impl From<BitRange> for BitSelector {
    fn from(range: BitRange) -> Self {
        BitSelector::Range {
            from: range.from,
            to: range.to,
        }
    }
}

/// A resolved, contiguous field of bits `from..=to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitRange {
    /// Lowest bit, the least significant bit of the field value.
    pub from: u32,
    /// Highest bit.
    pub to: u32,
}

impl BitRange {
    /// Range `from..=to`. The caller guarantees `from <= to`.
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    /// Number of bits in the field.
    pub fn width(&self) -> u32 {
        self.to - self.from + 1
    }

    /// Mask of the field's bits within a basis index.
    pub fn mask(&self) -> u64 {
        value_mask(self.width()) << self.from
    }

    /// Field value of `index`.
    pub fn extract(&self, index: u64) -> u64 {
        (index >> self.from) & value_mask(self.width())
    }

    /// `value`, truncated to the field width, moved into position.
    pub fn deposit(&self, value: u64) -> u64 {
        (value & value_mask(self.width())) << self.from
    }

    /// Whether the two fields share a bit.
    pub fn overlaps(&self, other: &BitRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }
}

/// Mask with the low `width` bits set.
pub(crate) fn value_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Mask with every listed bit set.
pub(crate) fn mask_of(bits: &[u32]) -> u64 {
    bits.iter().fold(0, |mask, &b| mask | (1u64 << b))
}
