//! Counting and ranking the leaf labellings of a fixed shape.
//!
//! The children of a vertex are split into *shape groups*, maximal runs of
//! children with identical shape. A labelling of the vertex is built group
//! by group:
//! 1. choose the set of labels given to the group from the labels left,
//! 2. distribute that set among the trees of the group, where the first
//!    tree always receives the smallest label (swapping two identical trees
//!    must not produce a new labelling),
//! 3. label each tree of the group with its subset.
//!
//! Ranks are mixed-radix numbers over exactly these choices, earlier choices
//! being more significant.

use crate::combinatorics::combination::Combination;
use crate::error::RankError;
use crate::model::RankTree;
use itertools::Itertools;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

// ============================================================================
// Counting
// ============================================================================
/// For each `i`, the number of ways to label all trees in `groups[i..]`
/// with as many labels as they have leaves; the last entry is `1`.
pub(crate) fn suffix_labellings(groups: &[&[RankTree]]) -> Vec<BigUint> {
    let mut counts = vec![BigUint::one(); groups.len() + 1];
    let mut remaining_leaves = 0;
    for (i, group) in groups.iter().enumerate().rev() {
        let group_leaves = group.len() * group[0].num_leaves();
        remaining_leaves += group_leaves;
        let num_label_choices = Combination::comb(remaining_leaves, group_leaves);
        counts[i] = num_label_choices * num_group_labellings(group) * &counts[i + 1];
    }
    counts
}

/// Given a set of labels and a list of shape groups, the number of ways to
/// assign subsets of the labels to each group and then label all the trees
/// of all groups.
pub fn num_list_of_group_labellings(groups: &[&[RankTree]]) -> BigUint {
    suffix_labellings(groups).swap_remove(0)
}

/// Given a set of labels, the number of ways to assign subsets of them to
/// the trees of a shape group and then label those trees.
pub fn num_group_labellings(group: &[RankTree]) -> BigUint {
    let num_tree_labellings = group[0].num_labellings().pow(group.len() as u32);
    num_assignments_in_group(group.len(), group[0].num_leaves()) * num_tree_labellings
}

/// The number of ways to divide `num_trees * k` labels among `num_trees`
/// identical trees with `k` leaves each.
///
/// The smallest label left always goes to the next tree, so each tree only
/// chooses `k - 1` further labels.
pub fn num_assignments_in_group(num_trees: usize, k: usize) -> BigUint {
    let mut n = num_trees * k;
    let mut total = BigUint::one();
    for _ in 0..num_trees {
        total *= Combination::comb(n - 1, k - 1);
        n -= k;
    }
    total
}

// ============================================================================
// Ranking
// ============================================================================
/// Returns the label rank of the children `groups` labelled from `labels`.
///
/// # Arguments
/// * `groups` - Shape groups of the children of a labelled vertex
/// * `labels` - Sorted labels of all leaves below that vertex
pub(crate) fn groups_label_rank(groups: &[&[RankTree]], labels: &[usize]) -> BigUint {
    let rest_counts = suffix_labellings(groups);
    let mut all_labels = labels.to_vec();
    let mut total = BigUint::zero();

    for (i, group) in groups.iter().enumerate() {
        let num_rest_labellings = &rest_counts[i + 1];
        let group_labels = merge_labels(group);

        // Preceded by all labellings giving a smaller label combination to this group
        let comb_rank = Combination::rank(&group_labels, &all_labels);
        let preceding_comb = comb_rank * num_group_labellings(group) * num_rest_labellings;

        // ... and then by all smaller configurations within this group
        let rank_from_group = group_rank(group) * num_rest_labellings;

        total += preceding_comb + rank_from_group;
        all_labels = set_minus(&all_labels, &group_labels);
    }

    total
}

/// Returns the rank of the labelling of a labelled shape group, among all
/// labellings of the group that use the same set of labels.
///
/// Covers both which label subset went to which tree and the label rank of
/// each tree itself. Trees are visited left to right; the first tree of the
/// remaining ones always holds the smallest remaining label.
///
/// # Panics
/// Panics if `group` is empty or its trees are not labelled.
pub fn group_rank(group: &[RankTree]) -> BigUint {
    let k = group[0].num_leaves();
    // All trees have the same shape and hence the same number of labellings
    let y = group[0].num_labellings();
    let mut all_labels = merge_labels(group);
    let mut rank = BigUint::zero();

    for (i, tree) in group.iter().enumerate() {
        let curr_trees = group.len() - i;
        // Equal to the rank without the forced minimum label
        let comb_rank = Combination::rank(tree.labels(), &all_labels);
        let num_rest_combs = num_assignments_in_group(curr_trees - 1, k);

        let preceding_combs = comb_rank * &num_rest_combs * y.pow(curr_trees as u32);
        let curr_comb = tree.labelled_rank() * &num_rest_combs * y.pow(curr_trees as u32 - 1);
        rank += preceding_combs + curr_comb;

        all_labels = set_minus(&all_labels, tree.labels());
    }

    rank
}

// ============================================================================
// Unranking
// ============================================================================
/// Decodes a label rank of a vertex into the label subset and the label
/// rank of each child.
///
/// # Arguments
/// * `groups` - Shape groups of the children (shapes only)
/// * `rank` - Label rank of the vertex
/// * `labels` - Sorted labels to distribute
///
/// # Errors
/// Returns [RankError] of kind `RankOutOfBounds` if `rank` is not smaller
/// than the number of labellings of `groups`.
pub fn children_label_ranks(
    groups: &[&[RankTree]],
    rank: &BigUint,
    labels: &[usize],
) -> Result<(Vec<Vec<usize>>, Vec<BigUint>), RankError> {
    let rest_counts = suffix_labellings(groups);
    if rank >= &rest_counts[0] {
        return Err(RankError::out_of_bounds(format!("label rank {rank}")));
    }

    let mut rank = rank.clone();
    let mut labels = labels.to_vec();
    let mut child_labels = Vec::new();
    let mut child_label_ranks = Vec::new();

    for (i, group) in groups.iter().enumerate() {
        let group_leaves = group.len() * group[0].num_leaves();
        let num_rest_labellings = &rest_counts[i + 1];

        let num_labellings_per_label_comb = num_group_labellings(group) * num_rest_labellings;
        let (comb_rank, within_comb) = rank.div_rem(&num_labellings_per_label_comb);
        let group_label_rank = within_comb / num_rest_labellings;

        let group_labels = Combination::unrank(&comb_rank, &labels, group_leaves)?;
        let (labels_per_tree, ranks_per_tree) = group_label_ranks(&group_label_rank, group, &group_labels)?;
        child_labels.extend(labels_per_tree);
        child_label_ranks.extend(ranks_per_tree);

        labels = set_minus(&labels, &group_labels);
        rank %= num_rest_labellings;
    }

    Ok((child_labels, child_label_ranks))
}

/// Decodes the rank of a group labelling (see [group_rank]) into the label
/// subset and label rank of each tree of the group.
///
/// # Errors
/// Returns [RankError] of kind `RankOutOfBounds` if a label combination
/// can't be decoded from `rank`.
pub fn group_label_ranks(
    rank: &BigUint,
    group: &[RankTree],
    labels: &[usize],
) -> Result<(Vec<Vec<usize>>, Vec<BigUint>), RankError> {
    let k = group[0].num_leaves();
    let num_tree_labellings = group[0].num_labellings();
    let mut rank = rank.clone();
    let mut labels = labels.to_vec();
    let mut child_labels = Vec::with_capacity(group.len());
    let mut child_label_ranks = Vec::with_capacity(group.len());

    for i in 0..group.len() {
        let rest_trees = group.len() - i - 1;
        let num_rest_labellings =
            num_assignments_in_group(rest_trees, k) * num_tree_labellings.pow(rest_trees as u32);
        let num_labellings_per_label_comb = num_tree_labellings * &num_rest_labellings;

        let (comb_rank, within_comb) = rank.div_rem(&num_labellings_per_label_comb);
        let (tree_rank, rest_rank) = within_comb.div_rem(&num_rest_labellings);
        rank = rest_rank;

        let min_label = *labels
            .first()
            .ok_or_else(|| RankError::out_of_bounds("no labels left for group"))?;
        let mut tree_labels = vec![min_label];
        tree_labels.extend(Combination::unrank(&comb_rank, &labels[1..], k - 1)?);
        labels = set_minus(&labels, &tree_labels);

        child_labels.push(tree_labels);
        child_label_ranks.push(tree_rank);
    }

    Ok((child_labels, child_label_ranks))
}

// ============================================================================
// Label set helpers
// ============================================================================
/// Merges the sorted labels of `trees` into one sorted list.
pub(crate) fn merge_labels(trees: &[RankTree]) -> Vec<usize> {
    trees
        .iter()
        .map(|tree| tree.labels().iter().copied())
        .kmerge()
        .collect()
}

/// Returns the sorted `labels` without those in the sorted `subset`.
pub(crate) fn set_minus(labels: &[usize], subset: &[usize]) -> Vec<usize> {
    labels
        .iter()
        .copied()
        .filter(|label| subset.binary_search(label).is_err())
        .collect()
}
