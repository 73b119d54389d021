//! The tree type everything is ranked on: [RankTree], and its [Rank].

use crate::combinatorics::labels::{self, merge_labels};
use crate::combinatorics::partition::group_by;
use crate::combinatorics::shapes::children_shape_ranks;
use crate::combinatorics::{Combination, num_tree_pairings, num_shapes, partitions};
use crate::error::RankError;
use crate::newick::{self, NewickStyle};
use crate::tables::{NODE_IS_SAMPLE, NodeId, TableCollection, TableExport, TableTree, TreeSink, TreeSource};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

// =#========================================================================#=
// RANK
// =#========================================================================#=
/// Rank of a leaf-labelled tree among all trees with the same number of leaves.
///
/// Trees are ordered by shape rank first and label rank second, which is
/// also the order derived here for [Rank].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank {
    /// Rank of the shape among all shapes with `n` leaves
    pub shape: BigUint,
    /// Rank of the labelling among all labellings of that shape
    pub label: BigUint,
}

impl Rank {
    /// Creates a new rank from its shape and label component.
    pub fn new(shape: impl Into<BigUint>, label: impl Into<BigUint>) -> Self {
        Rank {
            shape: shape.into(),
            label: label.into(),
        }
    }
}

impl TryFrom<(BigInt, BigInt)> for Rank {
    type Error = RankError;

    /// Fails with `RankOutOfBounds` if either component is negative.
    fn try_from((shape, label): (BigInt, BigInt)) -> Result<Self, Self::Error> {
        match (shape.to_biguint(), label.to_biguint()) {
            (Some(shape), Some(label)) => Ok(Rank { shape, label }),
            _ => Err(RankError::out_of_bounds(format!("negative rank ({shape}, {label})"))),
        }
    }
}

impl TryFrom<(i64, i64)> for Rank {
    type Error = RankError;

    fn try_from((shape, label): (i64, i64)) -> Result<Self, Self::Error> {
        Rank::try_from((BigInt::from(shape), BigInt::from(label)))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.shape, self.label)
    }
}

// =#========================================================================#=
// RANK TREE
// =#========================================================================#=
/// An unordered, rooted tree without unary vertices, that keeps track of
/// the ranks of its shape and labelling.
///
/// # Structure
/// - A leaf has no children and holds one label, or none if the tree only
///   represents a shape.
/// - An internal vertex has at least two children, kept in canonical order:
///   ascending by number of leaves, then shape rank, then smallest label.
/// - Number of leaves and the sorted list of labels below are stored per vertex.
///
/// # Ranks
/// Shape rank, label rank and the number of labellings are computed on
/// first request and then cached. Caching is the only change a tree goes
/// through after construction; each cache is written at most once.
///
/// # Example
/// ```
/// use treerank::{Rank, RankTree};
///
/// let tree = RankTree::unrank(&Rank::new(3u32, 2u32), 4).unwrap();
/// assert_eq!(tree.to_string(), "(0,(3,(1,2)))");
/// assert_eq!(tree.rank().unwrap(), Rank::new(3u32, 2u32));
/// ```
#[derive(Debug, Clone)]
pub struct RankTree {
    /// Children in canonical order; empty for a leaf
    children: Vec<RankTree>,
    num_leaves: usize,
    /// Sorted labels of all leaves below; empty if unlabelled
    labels: Vec<usize>,
    shape_rank: OnceLock<BigUint>,
    label_rank: OnceLock<BigUint>,
    num_labellings: OnceLock<BigUint>,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl RankTree {
    /// Creates a leaf with the given label.
    pub fn leaf(label: usize) -> Self {
        Self::build_leaf(vec![label])
    }

    /// Creates a leaf without label, as used by shapes.
    pub fn unlabelled_leaf() -> Self {
        Self::build_leaf(Vec::new())
    }

    /// Creates an internal vertex with the given children, sorting them
    /// into canonical order.
    ///
    /// # Errors
    /// Returns [RankError] of kind `InvalidStructure` if fewer than two
    /// children are given or a label occurs twice.
    pub fn new(mut children: Vec<RankTree>) -> Result<Self, RankError> {
        if children.len() < 2 {
            return Err(RankError::invalid_structure(format!(
                "internal vertex needs at least two children, got {}",
                children.len()
            )));
        }
        children.sort_by(Self::canonical_cmp);
        let tree = Self::from_canonical(children);
        if let Some(pair) = tree.labels.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(RankError::invalid_structure(format!("duplicate label {}", pair[0])));
        }
        Ok(tree)
    }

    /// Creates an internal vertex from children already in canonical order.
    pub(crate) fn from_canonical(children: Vec<RankTree>) -> Self {
        debug_assert!(children.len() >= 2);
        let num_leaves = children.iter().map(|c| c.num_leaves).sum();
        let labels = if children.iter().all(|c| c.is_labelled()) {
            merge_labels(&children)
        } else {
            Vec::new()
        };

        RankTree {
            children,
            num_leaves,
            labels,
            shape_rank: OnceLock::new(),
            label_rank: OnceLock::new(),
            num_labellings: OnceLock::new(),
        }
    }

    fn build_leaf(labels: Vec<usize>) -> Self {
        RankTree {
            children: Vec::new(),
            num_leaves: 1,
            labels,
            shape_rank: OnceLock::from(BigUint::zero()),
            label_rank: OnceLock::new(),
            num_labellings: OnceLock::new(),
        }
    }

    fn with_ranks(self, shape_rank: BigUint, label_rank: Option<BigUint>) -> Self {
        let _ = self.shape_rank.set(shape_rank);
        if let Some(label_rank) = label_rank {
            let _ = self.label_rank.set(label_rank);
        }
        self
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl RankTree {
    /// Returns the children in canonical order (empty for a leaf).
    pub fn children(&self) -> &[RankTree] {
        &self.children
    }

    /// Returns the number of leaves of this (sub)tree.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the sorted labels of all leaves, or an empty slice if unlabelled.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Returns the label of a labelled leaf, `None` otherwise.
    pub fn label(&self) -> Option<usize> {
        if self.is_leaf() { self.labels.first().copied() } else { None }
    }

    /// Returns the smallest label of this (sub)tree, `None` if unlabelled.
    pub fn min_label(&self) -> Option<usize> {
        self.labels.first().copied()
    }

    /// Returns `true` if this is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if every leaf carries a label.
    pub fn is_labelled(&self) -> bool {
        self.labels.len() == self.num_leaves
    }

    /// Returns the number of leaves of each child, a partition of
    /// [RankTree::num_leaves] in ascending order.
    pub fn leaf_partition(&self) -> Vec<usize> {
        self.children.iter().map(|c| c.num_leaves).collect()
    }

    /// Groups the children into maximal runs with the same number of leaves.
    pub fn group_children_by_num_leaves(&self) -> Vec<&[RankTree]> {
        group_by(&self.children, |c1, c2| c1.num_leaves == c2.num_leaves)
    }

    /// Groups the children into maximal runs with the same shape.
    pub fn group_children_by_shape(&self) -> Vec<&[RankTree]> {
        group_by(&self.children, |c1, c2| {
            c1.num_leaves == c2.num_leaves && c1.shape_rank() == c2.shape_rank()
        })
    }
}

// ============================================================================
// Ranking (pub)
// ============================================================================
impl RankTree {
    /// Returns the rank of this labelled tree.
    ///
    /// # Errors
    /// Returns [RankError] of kind `Unlabelled` if the tree is only a shape.
    pub fn rank(&self) -> Result<Rank, RankError> {
        let label = self.label_rank()?.clone();
        Ok(Rank {
            shape: self.shape_rank().clone(),
            label,
        })
    }

    /// Returns the rank of the shape of this tree among all shapes with the
    /// same number of leaves. Leaves have shape rank `0`.
    pub fn shape_rank(&self) -> &BigUint {
        self.shape_rank.get_or_init(|| self.compute_shape_rank())
    }

    /// Returns the rank of the labelling of this tree among all labellings
    /// of its shape.
    ///
    /// # Errors
    /// Returns [RankError] of kind `Unlabelled` if the tree is only a shape.
    pub fn label_rank(&self) -> Result<&BigUint, RankError> {
        if !self.is_labelled() {
            return Err(RankError::unlabelled("label rank requested"));
        }
        Ok(self.labelled_rank())
    }

    /// Returns the number of distinct labellings of the shape of this tree.
    pub fn num_labellings(&self) -> &BigUint {
        self.num_labellings
            .get_or_init(|| labels::num_list_of_group_labellings(&self.group_children_by_shape()))
    }

    /// Label rank of a tree known to be labelled.
    pub(crate) fn labelled_rank(&self) -> &BigUint {
        self.label_rank
            .get_or_init(|| labels::groups_label_rank(&self.group_children_by_shape(), &self.labels))
    }

    /// Mirroring the enumeration of shapes: first count all shapes whose
    /// leaf partition precedes ours, then, per group of equally sized
    /// children, add the rank of the group's combination with replacement
    /// of shapes times the number of arrangements of all later groups.
    fn compute_shape_rank(&self) -> BigUint {
        let part = self.leaf_partition();
        let mut total = BigUint::zero();
        for prev_part in partitions(self.num_leaves) {
            if prev_part == part {
                break;
            }
            total += num_tree_pairings(&prev_part);
        }

        let mut next_child = 0;
        for group in self.group_children_by_num_leaves() {
            next_child += group.len();
            let k = group[0].num_leaves;

            let child_ranks: Vec<&BigUint> = group.iter().map(|c| c.shape_rank()).collect();
            let group_rank = Combination::with_replacement_rank(&child_ranks, &num_shapes(k));
            total += group_rank * num_tree_pairings(&part[next_child..]);
        }

        total
    }
}

// ============================================================================
// Unranking (pub)
// ============================================================================
impl RankTree {
    /// Returns the tree with `n` leaves and the given rank.
    ///
    /// # Errors
    /// Returns [RankError] of kind `RankOutOfBounds` if the shape rank is not
    /// smaller than `num_shapes(n)` or the label rank is not smaller than the
    /// number of labellings of that shape.
    pub fn unrank(rank: &Rank, n: usize) -> Result<Self, RankError> {
        debug!(n, shape_rank = %rank.shape, label_rank = %rank.label, "unranking tree");
        let shape = Self::shape_unrank(&rank.shape, n)?;
        shape.label_unrank(&rank.label)
    }

    /// Returns the unlabelled tree with `n` leaves whose shape has rank `shape_rank`.
    ///
    /// # Errors
    /// Returns [RankError] of kind `RankOutOfBounds` if `shape_rank` is not
    /// smaller than `num_shapes(n)`.
    pub fn shape_unrank(shape_rank: &BigUint, n: usize) -> Result<Self, RankError> {
        let (part, child_shape_ranks) = children_shape_ranks(shape_rank, n)?;
        if part.is_empty() {
            return Ok(Self::unlabelled_leaf());
        }

        let children = part
            .iter()
            .zip(&child_shape_ranks)
            .map(|(&k, rank)| Self::shape_unrank(rank, k))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_canonical(children).with_ranks(shape_rank.clone(), None))
    }

    /// Returns a tree of the same shape, labelled from `[0, n)` with the
    /// labelling of rank `label_rank`.
    ///
    /// # Errors
    /// Returns [RankError] of kind `RankOutOfBounds` if `label_rank` is not
    /// smaller than [RankTree::num_labellings].
    pub fn label_unrank(&self, label_rank: &BigUint) -> Result<Self, RankError> {
        if label_rank >= self.num_labellings() {
            return Err(RankError::out_of_bounds(format!(
                "label rank {label_rank} of shape {} with {} leaves",
                self.shape_rank(),
                self.num_leaves
            )));
        }
        let labels: Vec<usize> = (0..self.num_leaves).collect();
        self.label_unrank_with(label_rank, &labels)
    }

    fn label_unrank_with(&self, label_rank: &BigUint, labels: &[usize]) -> Result<Self, RankError> {
        if self.is_leaf() {
            if !label_rank.is_zero() {
                return Err(RankError::out_of_bounds(format!("label rank {label_rank} of leaf")));
            }
            let label = *labels
                .first()
                .ok_or_else(|| RankError::invalid_structure("no label left for leaf"))?;
            return Ok(Self::leaf(label).with_ranks(BigUint::zero(), Some(BigUint::zero())));
        }

        let groups = self.group_children_by_shape();
        let (child_labels, child_label_ranks) = labels::children_label_ranks(&groups, label_rank, labels)?;

        let children = self
            .children
            .iter()
            .zip(child_label_ranks.iter().zip(&child_labels))
            .map(|(child, (rank, labels))| child.label_unrank_with(rank, labels))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_canonical(children).with_ranks(self.shape_rank().clone(), Some(label_rank.clone())))
    }
}

// ============================================================================
// Canonical order, comparisons (pub)
// ============================================================================
impl RankTree {
    /// Key of the canonical order of siblings:
    /// number of leaves, shape rank, smallest label.
    pub fn canonical_order(&self) -> (usize, &BigUint, Option<usize>) {
        (self.num_leaves, self.shape_rank(), self.min_label())
    }

    fn canonical_cmp(a: &RankTree, b: &RankTree) -> Ordering {
        a.canonical_order().cmp(&b.canonical_order())
    }

    /// Returns `true` if the children of every vertex are in canonical order.
    pub fn is_canonical(&self) -> bool {
        self.children
            .windows(2)
            .all(|pair| Self::canonical_cmp(&pair[0], &pair[1]) != Ordering::Greater)
            && self.children.iter().all(|c| c.is_canonical())
    }

    /// Returns `true` if all children have the same shape (trivially for leaves).
    pub fn is_symmetrical(&self) -> bool {
        match self.children.first() {
            None => true,
            Some(first) => self.children.iter().all(|c| {
                c.num_leaves == first.num_leaves && c.shape_rank() == first.shape_rank()
            }),
        }
    }

    /// Returns `true` if both trees have the same shape, ignoring labels.
    pub fn shape_equal(&self, other: &RankTree) -> bool {
        if self.is_leaf() && other.is_leaf() {
            return true;
        }
        self.children.len() == other.children.len()
            && self.children.iter().zip(&other.children).all(|(c1, c2)| c1.shape_equal(c2))
    }
}

impl PartialEq for RankTree {
    fn eq(&self, other: &Self) -> bool {
        if self.is_leaf() && other.is_leaf() {
            return self.label() == other.label();
        }
        self.children.len() == other.children.len()
            && self.children.iter().zip(&other.children).all(|(c1, c2)| c1 == c2)
    }
}

impl Eq for RankTree {}

// ============================================================================
// Table boundary (pub)
// ============================================================================
impl RankTree {
    /// Builds a tree from a single-rooted tree of the host representation.
    ///
    /// Leaves take their node id as label.
    ///
    /// # Errors
    /// Returns [RankError] of kind `MultipleRoots` or `NoRoot` if `source`
    /// does not have exactly one root, and `InvalidStructure` if it has a
    /// unary vertex.
    pub fn from_tree<T: TreeSource + ?Sized>(source: &T) -> Result<Self, RankError> {
        let root = match source.roots() {
            [] => return Err(RankError::no_root()),
            [root] => *root,
            roots => return Err(RankError::multiple_roots(roots.len())),
        };
        let tree = Self::from_tree_node(source, root)?;
        debug!(num_leaves = tree.num_leaves, "imported tree");
        Ok(tree)
    }

    fn from_tree_node<T: TreeSource + ?Sized>(source: &T, node: NodeId) -> Result<Self, RankError> {
        if source.is_leaf(node) {
            return Ok(Self::leaf(node));
        }
        let children = source
            .children(node)
            .iter()
            .map(|&child| Self::from_tree_node(source, child))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(children)
    }

    /// Exports this tree as [TableTree] with default settings.
    ///
    /// # Errors
    /// See [RankTree::to_tables_with].
    pub fn to_tables(&self) -> Result<TableTree, RankError> {
        self.export(&TableExport::default())
    }

    /// Exports this tree as [TableTree] with the given settings.
    ///
    /// # Errors
    /// See [RankTree::to_tables_with].
    pub fn export(&self, config: &TableExport) -> Result<TableTree, RankError> {
        self.to_tables_with(TableCollection::new(config.sequence_length()), config)
    }

    /// Writes this tree into `sink`.
    ///
    /// Leaf with label `i` becomes sample node `i` at time 0. Each internal
    /// vertex is added after its children, one time step above the oldest
    /// child, with edges spanning the whole sequence. As this post-order
    /// does not give the edge order tables require, the sink gets sorted
    /// before it is finished.
    ///
    /// # Errors
    /// Returns [RankError] of kind `Unlabelled` if the tree is only a shape,
    /// `InvalidStructure` if the labels are not exactly `[0, n)`, or whatever
    /// error `sink` reports when finishing.
    pub fn to_tables_with<S: TreeSink>(&self, mut sink: S, config: &TableExport) -> Result<S::Output, RankError> {
        if !self.is_labelled() {
            return Err(RankError::unlabelled("export requested"));
        }
        if self.labels.last() != Some(&(self.num_leaves - 1)) {
            return Err(RankError::invalid_structure("leaf labels must be exactly 0..n"));
        }

        for _ in 0..self.num_leaves {
            sink.add_node(NODE_IS_SAMPLE, 0.0);
        }
        self.add_to_sink(&mut sink, config);

        debug!(num_leaves = self.num_leaves, "exported tree");
        sink.sort();
        sink.finish()
    }

    /// Adds the internal vertices of this subtree; returns node id and time.
    fn add_to_sink<S: TreeSink>(&self, sink: &mut S, config: &TableExport) -> (NodeId, f64) {
        if let Some(label) = self.label() {
            return (label, 0.0);
        }

        let added: Vec<(NodeId, f64)> = self.children.iter().map(|c| c.add_to_sink(sink, config)).collect();
        let max_child_time = added.iter().map(|&(_, time)| time).fold(0.0, f64::max);
        let time = max_child_time + config.time_step();
        let parent = sink.add_node(0, time);
        for &(child, _) in &added {
            sink.add_edge(0.0, config.sequence_length(), parent, child);
        }

        (parent, time)
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl RankTree {
    /// Returns the compact parenthesized form, e.g. `(0,(1,2))`.
    ///
    /// Unlabelled leaves are rendered empty, e.g. `(,(,))`.
    pub fn newick(&self) -> String {
        self.to_string()
    }

    /// Returns the Newick string of this tree, terminated by `;`.
    ///
    /// See [newick::to_newick].
    pub fn to_newick<L: AsRef<str>>(&self, style: NewickStyle, names: Option<&[L]>) -> String {
        newick::to_newick(style, self, names)
    }
}

impl fmt::Display for RankTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_leaf() {
            return match self.label() {
                Some(label) => write!(f, "{label}"),
                None => Ok(()),
            };
        }

        write!(f, "(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}
