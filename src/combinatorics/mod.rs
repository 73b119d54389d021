//! Counting, ranking and unranking of the building blocks of trees.
//!
//! * [combination] - Combinatorial number system for combinations with and
//!   without replacement
//! * [partition] - Integer partitions describing how leaves split among children
//! * [shapes] - Number of tree shapes and decoding of shape ranks
//! * [labels] - Number of labellings of a shape, label ranks and their decoding

pub mod combination;
pub mod labels;
pub mod partition;
pub mod shapes;

pub use self::combination::Combination;
pub use self::labels::{
    children_label_ranks, group_label_ranks, group_rank, num_assignments_in_group, num_group_labellings,
    num_list_of_group_labellings,
};
pub use self::partition::{Partitions, group_by, group_partition, partitions};
pub use self::shapes::{ShapeTable, num_shapes, num_tree_pairings, precompute_shape_counts};
