//! Linear algebra over GF(2).
//!
//! A matrix is a slice of rows, each row a bitmask whose bit `c` is the entry
//! in column `c`. Addition is XOR and multiplication is AND, so Gaussian
//! elimination stays exact.

use tracing::trace;

use crate::error::{MathError, MathResult};

/// Find a basis for the null space of `rows` over GF(2).
///
/// Every returned bitmask `x` satisfies `popcount(row & x)` even for all
/// rows, and the returned vectors are linearly independent. The basis has
/// `width - rank` elements, one per non-pivot column, ordered from the
/// highest column to the lowest.
///
/// ```rust
/// use qbits_math::find_null_space_mod2;
///
/// let basis = find_null_space_mod2(&[0b101, 0b011], 3).unwrap();
/// assert_eq!(basis, vec![0b111]);
/// ```
pub fn find_null_space_mod2(rows: &[u64], width: u32) -> MathResult<Vec<u64>> {
    if width > 64 {
        return Err(MathError::WidthTooLarge(width));
    }
    let width_mask = column_mask(width);
    if let Some((row, &value)) = rows.iter().enumerate().find(|(_, r)| **r & !width_mask != 0) {
        return Err(MathError::RowOutOfRange { row, value, width });
    }

    let mut a = rows.to_vec();
    let pivots = reduce_to_rref(&mut a, width);
    trace!(width, rank = pivots.len(), "reduced GF(2) matrix");

    let pivot_mask = pivots.iter().fold(0u64, |m, &c| m | (1u64 << c));
    let basis = (0..width)
        .rev()
        .filter(|&c| pivot_mask & (1u64 << c) == 0)
        .map(|c| special_solution(&a, &pivots, c))
        .collect();
    Ok(basis)
}

/// Reduce `a` in place to reduced row-echelon form, scanning columns from
/// the most significant. Returns the pivot column of each pivot row, in row
/// order.
fn reduce_to_rref(a: &mut [u64], width: u32) -> Vec<u32> {
    let mut pivots = Vec::new();
    for col in (0..width).rev() {
        let pivot_row = pivots.len();
        if pivot_row >= a.len() {
            break;
        }
        let bit = 1u64 << col;
        if a[pivot_row] & bit == 0 {
            if let Some(r) = (pivot_row + 1..a.len()).find(|&r| a[r] & bit != 0) {
                a.swap(pivot_row, r);
            }
        }
        if a[pivot_row] & bit != 0 {
            let pivot = a[pivot_row];
            for (r, row) in a.iter_mut().enumerate() {
                if r != pivot_row && *row & bit != 0 {
                    *row ^= pivot;
                }
            }
            pivots.push(col);
        }
    }
    pivots
}

/// Free variable `col` set to 1, every pivot variable solved for.
fn special_solution(a: &[u64], pivots: &[u32], col: u32) -> u64 {
    let bit = 1u64 << col;
    pivots
        .iter()
        .enumerate()
        .filter(|(r, _)| a[*r] & bit != 0)
        .fold(bit, |x, (_, &p)| x | (1u64 << p))
}

fn column_mask(width: u32) -> u64 {
    if width == 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
