//! Boundary to tabular genealogies, where a tree is stored as a node
//! table and an edge table.
//!
//! Trees move across this boundary through two small traits:
//! * [TreeSource] - read access to a single tree (roots, leaves, children),
//!   used by [RankTree::from_tree](crate::RankTree::from_tree)
//! * [TreeSink] - append-only write access (nodes, edges, sort, finish),
//!   used by [RankTree::to_tables_with](crate::RankTree::to_tables_with)
//!
//! Hosts with their own table representation implement these traits. The
//! built-in [TableCollection] (a sink) and [TableTree] (a source) cover the
//! minimal case of one tree spanning the whole sequence.
//!
//! # Sink lifecycle
//! ```text
//! Empty ──→ add_node()* ──→ add_edge()* ──→ sort() ──→ finish() ──→ Output
//! ```

pub mod export;
pub mod table_tree;

pub use self::export::TableExport;
pub use self::table_tree::{EdgeRow, NodeRow, TableCollection, TableTree};

use crate::error::RankError;

/// Index of a node in a node table.
pub type NodeId = usize;

/// Node flag marking a sample, i.e. a leaf of an exported tree.
pub const NODE_IS_SAMPLE: u32 = 1;

// =#========================================================================#=
// TREE SOURCE (trait)
// =#========================================================================#=
/// Read access to the topology of one tree.
pub trait TreeSource {
    /// Returns the roots of the tree; importable trees have exactly one.
    fn roots(&self) -> &[NodeId];

    /// Returns `true` if `node` has no children.
    fn is_leaf(&self, node: NodeId) -> bool;

    /// Returns the children of `node`, empty for a leaf.
    fn children(&self, node: NodeId) -> &[NodeId];
}

// =#========================================================================#=
// TREE SINK (trait)
// =#========================================================================#=
/// Append-only construction of node and edge tables.
///
/// Rows may arrive in any order; [TreeSink::sort] is called once before
/// [TreeSink::finish] to establish the order the representation requires.
pub trait TreeSink {
    /// What [TreeSink::finish] produces.
    type Output;

    /// Appends a node row and returns its id.
    fn add_node(&mut self, flags: u32, time: f64) -> NodeId;

    /// Appends an edge row covering the interval `[left, right)`.
    fn add_edge(&mut self, left: f64, right: f64, parent: NodeId, child: NodeId);

    /// Sorts the rows added so far.
    fn sort(&mut self);

    /// Validates and finalizes the tables.
    ///
    /// # Errors
    /// Returns [RankError] if the rows don't form a valid tree.
    fn finish(self) -> Result<Self::Output, RankError>;
}
