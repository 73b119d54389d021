//! Treerank is a library to rank, unrank and enumerate unordered,
//! leaf-labelled trees.
//!
//! Every rooted tree with `n` leaves labelled `0..n`, unordered children
//! and no vertex with a single child, is identified by a [Rank]: a pair of
//! a *shape rank* among all shapes with `n` leaves and a *label rank* among
//! all labellings of that shape. Core functionality provided:
//! - Ranking: [RankTree::rank], [RankTree::shape_rank], [RankTree::label_rank]
//! - Unranking: [RankTree::unrank], [RankTree::shape_unrank], [RankTree::label_unrank]
//! - Counting: [num_shapes], [num_labellings], [RankTree::num_labellings]
//! - Enumeration in rank order: [all_unlabelled_trees], [all_labellings],
//!   [all_labelled_trees]
//! - Boundary to tabular genealogies: import any [TreeSource], export into
//!   any [TreeSink]; see [crate::tables].
//! - Output: compact form via `Display`, Newick via [crate::newick].
//!
//! Counts and ranks grow super-exponentially and are represented as
//! [BigUint](num_bigint::BigUint).
//!
//! # Canonical form
//! Children of a vertex are ordered by number of leaves, then shape rank,
//! then smallest label. All trees built by this crate are in canonical form;
//! the order carries no information, two trees are equal iff their
//! canonical forms are.
//!
//! # Usage patterns
//! 1. Build a tree with [RankTree::leaf] and [RankTree::new], or import it
//!    with [RankTree::from_tree], then call [RankTree::rank].
//! 2. Decode a rank with [RankTree::unrank].
//! 3. Iterate over trees with the `all_*` functions.
//!
//! ## Example
//! ```
//! use treerank::{Rank, RankTree, num_shapes};
//! use num_bigint::BigUint;
//!
//! // ((0,1),2)
//! let cherry = RankTree::new(vec![RankTree::leaf(0), RankTree::leaf(1)])?;
//! let tree = RankTree::new(vec![cherry, RankTree::leaf(2)])?;
//! assert_eq!(tree.to_string(), "(2,(0,1))");
//!
//! let rank = tree.rank()?;
//! assert_eq!(rank, Rank::new(1u32, 2u32));
//! assert_eq!(RankTree::unrank(&rank, 3)?, tree);
//! assert_eq!(num_shapes(3), BigUint::from(2u32));
//! # Ok::<(), treerank::RankError>(())
//! ```
//!
//! ## Example Boundary
//! ```
//! use treerank::{Rank, TableTree, all_trees};
//!
//! let tables = TableTree::unrank(4, &Rank::new(4u32, 1u32))?;
//! assert_eq!(tables.num_nodes(), 7);
//! assert_eq!(tables.rank()?, Rank::new(4u32, 1u32));
//! assert_eq!(all_trees(4).count(), 26);
//! # Ok::<(), treerank::RankError>(())
//! ```
//!
//! # Logging
//! Uses [tracing] without installing a subscriber: `debug` events for
//! unranking, import and export, `trace` events when shape counts are
//! extended.

pub mod combinatorics;
pub mod error;
pub mod model;
pub mod newick;
pub mod tables;

pub use crate::combinatorics::{num_shapes, precompute_shape_counts};
pub use crate::error::{RankError, RankErrorType};
pub use crate::model::{Rank, RankTree, Trees, all_labelled_trees, all_labellings, all_unlabelled_trees};
pub use crate::newick::NewickStyle;
pub use crate::tables::{TableCollection, TableExport, TableTree, TreeSink, TreeSource};

use num_bigint::BigUint;
use num_traits::Zero;

// ============================================================================
// Quick counting API
// ============================================================================
/// The number of labellings of the shape with rank `shape_rank` among the
/// shapes with `n` leaves.
///
/// # Errors
/// Returns [RankError] of kind `RankOutOfBounds` if `shape_rank` is not
/// smaller than `num_shapes(n)`.
///
/// # Example
/// ```
/// use treerank::num_labellings;
/// use num_bigint::BigUint;
///
/// // Star tree (0,1,2,3) vs. caterpillar (0,(1,(2,3)))
/// assert_eq!(num_labellings(&BigUint::from(0u32), 4)?, BigUint::from(1u32));
/// assert_eq!(num_labellings(&BigUint::from(3u32), 4)?, BigUint::from(12u32));
/// # Ok::<(), treerank::RankError>(())
/// ```
pub fn num_labellings(shape_rank: &BigUint, n: usize) -> Result<BigUint, RankError> {
    Ok(RankTree::shape_unrank(shape_rank, n)?.num_labellings().clone())
}

// ============================================================================
// Quick table API
// ============================================================================
/// Returns all labelled trees with `n` leaves in rank order, exported with
/// default settings.
pub fn all_trees(n: usize) -> impl Iterator<Item = TableTree> {
    // Enumerated trees are labelled 0..n, which always exports
    all_labelled_trees(n).filter_map(|tree| tree.to_tables().ok())
}

/// Returns all shapes with `n` leaves in rank order, each exported with its
/// labelling of label rank `0`.
pub fn all_tree_shapes(n: usize) -> impl Iterator<Item = TableTree> {
    all_unlabelled_trees(n)
        .filter_map(|shape| shape.label_unrank(&BigUint::zero()).ok())
        .filter_map(|tree| tree.to_tables().ok())
}

/// Returns all labellings of the shape of the tree in `source`, in rank
/// order, exported with default settings.
///
/// # Errors
/// Returns [RankError] if `source` can't be imported, see [RankTree::from_tree].
pub fn all_tree_labellings<T: TreeSource + ?Sized>(source: &T) -> Result<impl Iterator<Item = TableTree>, RankError> {
    let tree = RankTree::from_tree(source)?;
    Ok(all_labellings(&tree).filter_map(|tree| tree.to_tables().ok()))
}
