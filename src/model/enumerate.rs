//! Lazy enumeration of shapes, labellings and labelled trees.
//!
//! Every enumeration yields trees in rank order, i.e. the `i`-th tree
//! yielded has rank `i` among the trees enumerated. Each call starts a new,
//! independent iterator.
//!
//! # Order
//! * Shapes: partitions in generation order; within a partition, groups of
//!   equally sized children from left to right, each group a lexicographic
//!   combination with replacement of smaller shapes (cartesian product, the
//!   last group varying fastest).
//! * Labellings: shape groups from left to right; per group first the label
//!   set of the group, then per tree its label set (always including the
//!   smallest label left) followed by its own labellings.

use crate::combinatorics::labels::set_minus;
use crate::combinatorics::partitions;
use crate::model::RankTree;
use itertools::Itertools;
use std::iter;
use std::rc::Rc;

type BoxedTrees = Box<dyn Iterator<Item = RankTree>>;
type BoxedChildren = Box<dyn Iterator<Item = Vec<RankTree>>>;

// =#========================================================================#=
// TREES (iterator)
// =#========================================================================#=
/// Iterator over trees returned by [all_unlabelled_trees], [all_labellings]
/// and [all_labelled_trees].
pub struct Trees {
    inner: BoxedTrees,
}

impl Trees {
    fn new(inner: BoxedTrees) -> Self {
        Trees { inner }
    }
}

impl Iterator for Trees {
    type Item = RankTree;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

// ============================================================================
// Enumeration (pub)
// ============================================================================
/// Returns all shapes with `n` leaves in shape rank order.
///
/// # Example
/// ```
/// use treerank::all_unlabelled_trees;
///
/// let shapes: Vec<String> = all_unlabelled_trees(4).map(|t| t.to_string()).collect();
/// assert_eq!(shapes, vec!["(,,,)", "(,,(,))", "(,(,,))", "(,(,(,)))", "((,),(,))"]);
/// ```
pub fn all_unlabelled_trees(n: usize) -> Trees {
    Trees::new(shapes_of(n))
}

/// Returns all labellings of the shape of `tree` with labels `[0, n)`, in
/// label rank order.
pub fn all_labellings(tree: &RankTree) -> Trees {
    let labels = (0..tree.num_leaves()).collect();
    Trees::new(labellings_of(tree, labels))
}

/// Returns all labelled trees with `n` leaves, ordered by shape rank and
/// then label rank.
pub fn all_labelled_trees(n: usize) -> Trees {
    Trees::new(Box::new(shapes_of(n).flat_map(move |shape| labellings_of(&shape, (0..n).collect()))))
}

// ============================================================================
// Shapes (private)
// ============================================================================
fn shapes_of(n: usize) -> BoxedTrees {
    match n {
        0 => Box::new(iter::empty()),
        1 => Box::new(iter::once(RankTree::unlabelled_leaf())),
        _ => Box::new(partitions(n).flat_map(shapes_with_partition)),
    }
}

/// All shapes whose children have leaf counts `part`.
fn shapes_with_partition(part: Vec<usize>) -> BoxedTrees {
    let group_choices = part
        .iter()
        .copied()
        .dedup_with_count()
        .map(|(m, k)| shapes_of(k).collect::<Vec<_>>().into_iter().combinations_with_replacement(m))
        .collect::<Vec<_>>();

    Box::new(
        group_choices
            .into_iter()
            .multi_cartesian_product()
            .map(|groups| RankTree::from_canonical(groups.concat())),
    )
}

// ============================================================================
// Labellings (private)
// ============================================================================
/// All labellings of the shape of `tree` with the sorted `labels`.
fn labellings_of(tree: &RankTree, labels: Vec<usize>) -> BoxedTrees {
    if tree.is_leaf() {
        return Box::new(iter::once(RankTree::leaf(labels[0])));
    }

    let groups: Rc<Vec<Vec<RankTree>>> =
        Rc::new(tree.group_children_by_shape().into_iter().map(<[RankTree]>::to_vec).collect());
    Box::new(label_groups(groups, 0, labels).map(RankTree::from_canonical))
}

/// All labelled children lists for the shape groups `groups[index..]`.
fn label_groups(groups: Rc<Vec<Vec<RankTree>>>, index: usize, labels: Vec<usize>) -> BoxedChildren {
    let Some(group) = groups.get(index) else {
        return Box::new(iter::once(Vec::new()));
    };
    let group_size = group.len() * group[0].num_leaves();

    Box::new(
        labels
            .clone()
            .into_iter()
            .combinations(group_size)
            .flat_map(move |group_labels| {
                let rest_labels = set_minus(&labels, &group_labels);
                let groups = Rc::clone(&groups);
                label_tree_group(Rc::clone(&groups), index, 0, group_labels).flat_map(move |group_trees| {
                    label_groups(Rc::clone(&groups), index + 1, rest_labels.clone()).map(move |rest_trees| {
                        let mut children = group_trees.clone();
                        children.extend(rest_trees);
                        children
                    })
                })
            }),
    )
}

/// All labelled lists of the trees `groups[index][tree_index..]` using
/// exactly the sorted `labels`.
fn label_tree_group(groups: Rc<Vec<Vec<RankTree>>>, index: usize, tree_index: usize, labels: Vec<usize>) -> BoxedChildren {
    let Some(tree) = groups[index].get(tree_index) else {
        return Box::new(iter::once(Vec::new()));
    };
    let tree = tree.clone();
    let k = tree.num_leaves();
    let min_label = labels[0];

    Box::new(labels[1..].to_vec().into_iter().combinations(k - 1).flat_map(move |others| {
        let mut tree_labels = Vec::with_capacity(k);
        tree_labels.push(min_label);
        tree_labels.extend(others);
        let rest_labels = set_minus(&labels, &tree_labels);

        let groups = Rc::clone(&groups);
        labellings_of(&tree, tree_labels).flat_map(move |labelled| {
            label_tree_group(Rc::clone(&groups), index, tree_index + 1, rest_labels.clone()).map(move |rest_trees| {
                let mut trees = Vec::with_capacity(rest_trees.len() + 1);
                trees.push(labelled.clone());
                trees.extend(rest_trees);
                trees
            })
        })
    }))
}
