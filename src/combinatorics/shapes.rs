//! Counting tree shapes and decoding shape ranks.
//!
//! Let `S(n)` be the set of shapes (unlabelled, unordered trees without
//! unary vertices) with `n` leaves. A shape with `n > 1` leaves splits its
//! leaves among its children according to a [partition](super::partitions)
//! of `n`. Children of equal size form a group; the shapes within a group
//! are a combination with replacement from `S(k)`, since reordering
//! children of equal size does not produce a new shape.
//!
//! # Caching
//! `|S(n)|` is needed over and over for every `n` below the size of the
//! tree at hand. [ShapeTable] stores these counts; the free functions
//! [num_shapes] and [num_tree_pairings] use one process-wide table that only
//! ever grows and is guarded by a lock.

use crate::combinatorics::combination::Combination;
use crate::combinatorics::partition::{group_partition, partitions};
use crate::error::RankError;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::sync::{LazyLock, PoisonError, RwLock};
use tracing::trace;

/// Process-wide table of shape counts; grows monotonically, never evicts.
static SHAPE_COUNTS: LazyLock<RwLock<ShapeTable>> = LazyLock::new(|| RwLock::new(ShapeTable::new()));

// =#========================================================================#=
// SHAPE TABLE
// =#========================================================================#=
/// Table of the number of shapes `|S(m)|` for all `m` up to some maximum.
///
/// Counts are computed bottom-up, since `|S(m)|` only depends on counts for
/// fewer leaves. A table can be built once for the largest tree of
/// interest and then be used read-only.
///
/// # Example
/// ```
/// use treerank::combinatorics::ShapeTable;
/// use num_bigint::BigUint;
///
/// let table = ShapeTable::with_max_leaves(6);
/// assert_eq!(table.num_shapes(4), Some(&BigUint::from(5u32)));
/// assert_eq!(table.num_shapes(7), None);
/// ```
#[derive(Debug, Clone)]
pub struct ShapeTable {
    /// `counts[m]` is `|S(m)|`
    counts: Vec<BigUint>,
}

impl ShapeTable {
    /// Creates a table covering zero and one leaf.
    pub fn new() -> Self {
        ShapeTable {
            counts: vec![BigUint::zero(), BigUint::one()],
        }
    }

    /// Creates a table covering up to `max_leaves` leaves.
    pub fn with_max_leaves(max_leaves: usize) -> Self {
        let mut table = Self::new();
        table.extend_to(max_leaves);
        table
    }

    /// Returns the largest number of leaves covered by this table.
    pub fn max_leaves(&self) -> usize {
        self.counts.len() - 1
    }

    /// Extends the table to cover up to `max_leaves` leaves.
    pub fn extend_to(&mut self, max_leaves: usize) {
        while self.counts.len() <= max_leaves {
            let n = self.counts.len();
            let count = partitions(n)
                .map(|part| self.pairings_unchecked(&part))
                .fold(BigUint::zero(), |acc, x| acc + x);
            self.counts.push(count);
        }
    }

    /// Returns `|S(n)|`, or `None` if `n` is not covered by this table.
    pub fn num_shapes(&self, n: usize) -> Option<&BigUint> {
        self.counts.get(n)
    }

    /// Returns the number of shapes assembled from children with leaf
    /// counts `part`, or `None` if a part is not covered by this table.
    pub fn num_tree_pairings(&self, part: &[usize]) -> Option<BigUint> {
        if part.iter().any(|&k| k > self.max_leaves()) {
            return None;
        }
        Some(self.pairings_unchecked(part))
    }

    fn pairings_unchecked(&self, part: &[usize]) -> BigUint {
        let mut total = BigUint::one();
        for group in group_partition(part) {
            let k = group[0];
            total *= Combination::comb_with_replacement_big(&self.counts[k], group.len());
        }
        total
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Shared table (pub)
// ============================================================================
/// Makes sure the process-wide table covers up to `max_leaves` leaves.
///
/// Calling this once upfront for the largest tree of interest means all
/// later lookups only take the read lock.
pub fn precompute_shape_counts(max_leaves: usize) {
    {
        let table = SHAPE_COUNTS.read().unwrap_or_else(PoisonError::into_inner);
        if table.max_leaves() >= max_leaves {
            return;
        }
    }

    let mut table = SHAPE_COUNTS.write().unwrap_or_else(PoisonError::into_inner);
    let previous = table.max_leaves();
    table.extend_to(max_leaves);
    if table.max_leaves() > previous {
        trace!(from = previous, to = max_leaves, "extended shape count table");
    }
}

/// The number of distinct shapes with `n` leaves, `|S(n)|`.
///
/// `num_shapes(0)` is `0`, `num_shapes(1)` is `1`.
///
/// # Example
/// ```
/// use treerank::num_shapes;
///
/// let counts: Vec<u32> = (1..=6).map(|n| num_shapes(n).try_into().unwrap()).collect();
/// assert_eq!(counts, vec![1, 1, 2, 5, 12, 33]);
/// ```
pub fn num_shapes(n: usize) -> BigUint {
    precompute_shape_counts(n);
    let table = SHAPE_COUNTS.read().unwrap_or_else(PoisonError::into_inner);
    table.counts[n].clone()
}

/// The number of shapes whose children split the leaves according to `part`.
///
/// Each group of `m` children with `k` leaves each is a combination with
/// replacement of `m` shapes from `S(k)`; groups are independent.
pub fn num_tree_pairings(part: &[usize]) -> BigUint {
    let max_part = part.iter().copied().max().unwrap_or(0);
    precompute_shape_counts(max_part);
    let table = SHAPE_COUNTS.read().unwrap_or_else(PoisonError::into_inner);
    table.pairings_unchecked(part)
}

// ============================================================================
// Decoding shape ranks (pub(crate))
// ============================================================================
/// Returns the partition of leaves among the children of the shape with
/// rank `rank` in `S(n)`, together with the shape rank of each child.
///
/// # Errors
/// Returns [RankError] of kind `RankOutOfBounds` if `rank >= |S(n)|`.
pub(crate) fn children_shape_ranks(rank: &BigUint, n: usize) -> Result<(Vec<usize>, Vec<BigUint>), RankError> {
    let mut rank = rank.clone();
    let mut found = None;
    for part in partitions(n) {
        let num_trees_with_part = num_tree_pairings(&part);
        if rank < num_trees_with_part {
            found = Some(part);
            break;
        }
        rank -= num_trees_with_part;
    }

    let part = match found {
        Some(part) => part,
        None if n == 1 && rank.is_zero() => return Ok((Vec::new(), Vec::new())),
        None => {
            return Err(RankError::out_of_bounds(format!("shape rank for {n} leaves")));
        }
    };

    let mut child_ranks = Vec::with_capacity(part.len());
    let mut next_child = 0;
    for group in group_partition(&part) {
        next_child += group.len();
        let k = group[0];

        let rest_num_pairings = num_tree_pairings(&part[next_child..]);
        let (shapes_comb_rank, rest_rank) = rank.div_rem(&rest_num_pairings);
        let group_shape_ranks = Combination::with_replacement_unrank(&shapes_comb_rank, &num_shapes(k), group.len())?;
        child_ranks.extend(group_shape_ranks);
        rank = rest_rank;
    }

    Ok((part, child_ranks))
}
