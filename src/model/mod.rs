//! Ranked trees and their enumeration.
//!
//! * [RankTree] - unordered tree in canonical form, with shape and label rank
//! * [Rank] - the pair `(shape, label)` identifying a labelled tree
//! * [all_unlabelled_trees], [all_labellings], [all_labelled_trees] - lazy
//!   enumeration in rank order

/// Lazy enumeration of shapes and labellings
pub mod enumerate;
/// Tree type with ranking and unranking
pub mod rank_tree;

pub use self::enumerate::{Trees, all_labelled_trees, all_labellings, all_unlabelled_trees};
pub use self::rank_tree::{Rank, RankTree};
