//! Combinatorial number system for plain combinations and for
//! combinations with replacement (multisets).
//!
//! All counts and ranks are [BigUint], since the sets counted here grow
//! super-exponentially with the number of leaves of a tree.
//! Combinations are ordered lexicographically throughout.

use crate::error::RankError;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use std::borrow::Borrow;

// =#========================================================================#=
// COMBINATION
// =#========================================================================#=
/// Namespace for counting, ranking and unranking combinations.
///
/// # Ranking
/// A `k`-combination of `[0, n)` is written as a strictly increasing
/// sequence of indices, a `k`-combination with replacement as a
/// non-decreasing one. Rank `0` belongs to the lexicographically smallest
/// sequence, i.e. `[0, 1, ..., k-1]` resp. `[0, 0, ..., 0]`.
pub struct Combination;

// ============================================================================
// Counting (pub)
// ============================================================================
impl Combination {
    /// The number of ways to select `k` items from `n` items without order
    /// and without replacement.
    ///
    /// Uses the multiplicative formula, so every intermediate value is itself
    /// a binomial coefficient and divisions are exact.
    pub fn comb(n: usize, k: usize) -> BigUint {
        Self::comb_big(&BigUint::from(n), k)
    }

    /// Like [Combination::comb], but for a universe whose size need not fit
    /// a machine word (such as the number of shapes of a subtree).
    pub fn comb_big(n: &BigUint, k: usize) -> BigUint {
        let k_big = BigUint::from(k);
        if &k_big > n {
            return BigUint::zero();
        }
        // C(n, k) = C(n, n-k); n-k < k implies n-k fits usize
        let k = match (n - &k_big).to_usize() {
            Some(rest) if rest < k => rest,
            _ => k,
        };

        let base = n - BigUint::from(k);
        let mut result = BigUint::one();
        for i in 1..=k {
            result *= &base + BigUint::from(i);
            result /= BigUint::from(i);
        }
        result
    }

    /// Also called multichoose, the number of ways to select `k` items from
    /// `n` items without order but *with* replacement.
    pub fn comb_with_replacement(n: usize, k: usize) -> BigUint {
        Self::comb_with_replacement_big(&BigUint::from(n), k)
    }

    /// Like [Combination::comb_with_replacement] for a big universe.
    pub fn comb_with_replacement_big(n: &BigUint, k: usize) -> BigUint {
        if k == 0 {
            return BigUint::one();
        }
        if n.is_zero() {
            return BigUint::zero();
        }
        Self::comb_big(&(n + BigUint::from(k) - BigUint::one()), k)
    }
}

// ============================================================================
// Plain combinations (pub)
// ============================================================================
impl Combination {
    /// Returns the rank of `combination` among all combinations of the same
    /// size drawn from `elements`.
    ///
    /// # Arguments
    /// * `combination` - Strictly increasing subsequence of `elements`
    /// * `elements` - Strictly increasing reference sequence
    ///
    /// # Panics
    /// Panics if `combination` is not a subsequence of `elements`.
    pub fn rank<T: Ord>(combination: &[T], elements: &[T]) -> BigUint {
        let indices: Vec<usize> = combination
            .iter()
            .map(|x| {
                elements
                    .binary_search(x)
                    .unwrap_or_else(|_| panic!("combination element not part of universe"))
            })
            .collect();
        Self::from_range_rank(&indices, elements.len())
    }

    /// Returns the rank of a combination of indices from `[0, n)`.
    ///
    /// For each position, all combinations that agree on the preceding
    /// positions but pick a smaller index here come first.
    pub fn from_range_rank(combination: &[usize], n: usize) -> BigUint {
        let k = combination.len();
        let mut rank = BigUint::zero();
        let mut start = 0;

        for (i, &c) in combination.iter().enumerate() {
            let remaining = k - i - 1;
            for j in start..c {
                rank += Self::comb(n - j - 1, remaining);
            }
            start = c + 1;
        }

        rank
    }

    /// Returns the combination of `k` items of `elements` with the given rank.
    ///
    /// # Errors
    /// Returns [RankError] of kind `RankOutOfBounds` if `rank` is not smaller
    /// than `C(elements.len(), k)`.
    pub fn unrank<T: Clone>(rank: &BigUint, elements: &[T], k: usize) -> Result<Vec<T>, RankError> {
        let total = Self::comb(elements.len(), k);
        if rank >= &total {
            return Err(RankError::out_of_bounds(format!(
                "combination rank {rank} of {k} out of {} elements",
                elements.len()
            )));
        }

        let mut rank = rank.clone();
        let mut result = Vec::with_capacity(k);
        let mut k = k;
        for (i, element) in elements.iter().enumerate() {
            if k == 0 {
                break;
            }
            let n_rest = elements.len() - i - 1;
            let with_current = Self::comb(n_rest, k - 1);
            if rank < with_current {
                result.push(element.clone());
                k -= 1;
            } else {
                rank -= with_current;
            }
        }

        Ok(result)
    }

    /// Returns the combination of `k` indices from `[0, n)` with the given rank.
    ///
    /// # Errors
    /// Returns [RankError] of kind `RankOutOfBounds` if `rank` is not smaller
    /// than `C(n, k)`.
    pub fn from_range_unrank(rank: &BigUint, n: usize, k: usize) -> Result<Vec<usize>, RankError> {
        let universe: Vec<usize> = (0..n).collect();
        Self::unrank(rank, &universe, k)
    }
}

// ============================================================================
// Combinations with replacement (pub)
// ============================================================================
impl Combination {
    /// Returns the rank of `combination` among all combinations with
    /// replacement of the same size drawn from `[0, n)`.
    ///
    /// # Arguments
    /// * `combination` - Non-decreasing values, each smaller than `n`
    /// * `n` - Size of the universe
    pub fn with_replacement_rank<B: Borrow<BigUint>>(combination: &[B], n: &BigUint) -> BigUint {
        let k = combination.len();
        let mut rank = BigUint::zero();
        let mut n = n.clone();
        let mut offset = BigUint::zero();

        for (i, value) in combination.iter().enumerate() {
            let value: &BigUint = value.borrow();
            let size = k - i;
            let j = value - &offset;
            rank += Self::num_with_min_below(&n, size, &j);
            n -= &j;
            offset = value.clone();
        }

        rank
    }

    /// Returns the combination with replacement of `k` values from `[0, n)`
    /// with the given rank.
    ///
    /// # Errors
    /// Returns [RankError] of kind `RankOutOfBounds` if `rank` is not smaller
    /// than the multichoose of `n` and `k`.
    pub fn with_replacement_unrank(rank: &BigUint, n: &BigUint, k: usize) -> Result<Vec<BigUint>, RankError> {
        if rank >= &Self::comb_with_replacement_big(n, k) {
            return Err(RankError::out_of_bounds(format!(
                "multiset rank {rank} of {k} out of {n} values"
            )));
        }

        let mut rank = rank.clone();
        let mut n = n.clone();
        let mut offset = BigUint::zero();
        let mut result = Vec::with_capacity(k);

        for i in 0..k {
            let size = k - i;
            let j = Self::find_min_value(&rank, &n, size);
            rank -= Self::num_with_min_below(&n, size, &j);
            n -= &j;
            offset += &j;
            result.push(offset.clone());
        }

        Ok(result)
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
impl Combination {
    /// Number of size-`k` multisets over `[0, n)` whose minimum is below `j`.
    ///
    /// Those with minimum at least `j` are exactly the multisets over the
    /// `n - j` largest values, so the count is a difference of two multichooses.
    fn num_with_min_below(n: &BigUint, k: usize, j: &BigUint) -> BigUint {
        Self::comb_with_replacement_big(n, k) - Self::comb_with_replacement_big(&(n - j), k)
    }

    /// Largest `j` in `[0, n)` with `num_with_min_below(n, k, j) <= rank`,
    /// i.e. the minimum value of the multiset with the given rank.
    fn find_min_value(rank: &BigUint, n: &BigUint, k: usize) -> BigUint {
        let mut lo = BigUint::zero();
        let mut hi = n - BigUint::one();

        while lo < hi {
            let mid = (&lo + &hi + BigUint::one()) >> 1;
            if &Self::num_with_min_below(n, k, &mid) <= rank {
                lo = mid;
            } else {
                hi = mid - BigUint::one();
            }
        }

        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_value_search_matches_linear_scan() {
        let n = BigUint::from(6u32);
        let k = 3;
        let total = Combination::comb_with_replacement_big(&n, k);
        let mut rank = BigUint::zero();
        while rank < total {
            let mut linear = 0u32;
            while Combination::num_with_min_below(&n, k, &BigUint::from(linear + 1)) <= rank {
                linear += 1;
            }
            assert_eq!(Combination::find_min_value(&rank, &n, k), BigUint::from(linear));
            rank += 1u32;
        }
    }

    #[test]
    fn test_comb_big_symmetry() {
        let n = BigUint::from(30u32);
        assert_eq!(Combination::comb_big(&n, 27), Combination::comb_big(&n, 3));
        assert_eq!(Combination::comb_big(&n, 31), BigUint::zero());
    }
}
