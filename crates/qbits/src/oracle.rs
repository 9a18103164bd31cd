//! Classical functions applied as reversible oracles.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::bits::BitSelector;
use crate::error::{StateError, StateResult};
use crate::state::{QState, insert_pruned};

impl QState {
    /// Apply `|x>|y> → |x>|y ⊕ f(x)>`.
    ///
    /// `x` is the value of the `input` field and `f(x)` is truncated to the
    /// width of the `target` field before it is XORed in. Both selectors must
    /// name contiguous fields and the fields must not overlap. `f` may be any
    /// function; the map is a permutation of basis states regardless.
    ///
    /// ```rust
    /// use qbits::QState;
    ///
    /// let state = QState::from_bits("|10>").unwrap();
    /// let flipped = state.apply_function(1, 0, |x| x).unwrap();
    /// assert_eq!(flipped, QState::from_bits("|11>").unwrap());
    /// ```
    pub fn apply_function<F>(
        &self,
        input: impl Into<BitSelector>,
        target: impl Into<BitSelector>,
        mut f: F,
    ) -> StateResult<QState>
    where
        F: FnMut(u64) -> u64,
    {
        let n = self.num_bits();
        let input = input.into().to_range(n)?;
        let target = target.into().to_range(n)?;
        if input.overlaps(&target) {
            return Err(StateError::OverlappingBits {
                bit: input.from.max(target.from),
            });
        }

        let amplitudes = self.amplitudes();
        let mut handled = FxHashSet::default();
        let mut next = FxHashMap::default();
        for (&index, &amplitude) in amplitudes {
            if handled.contains(&index) {
                continue;
            }
            let partner = index ^ target.deposit(f(input.extract(index)));
            if partner == index {
                insert_pruned(&mut next, index, amplitude);
                continue;
            }
            handled.insert(partner);
            insert_pruned(&mut next, partner, amplitude);
            if let Some(&other) = amplitudes.get(&partner) {
                insert_pruned(&mut next, index, other);
            }
        }
        trace!(?input, ?target, nonzero = next.len(), "applied function");
        Ok(QState::from_parts(n, next))
    }
}
