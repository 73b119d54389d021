//! Minimal node and edge tables, and the single tree they describe.

use crate::error::RankError;
use crate::model::{Rank, RankTree};
use crate::tables::{NODE_IS_SAMPLE, NodeId, TreeSink, TreeSource};
use std::ops::Index;

// =#========================================================================#=
// TABLE ROWS
// =#========================================================================#=
/// Row of the node table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRow {
    pub flags: u32,
    pub time: f64,
}

impl NodeRow {
    pub fn is_sample(&self) -> bool {
        self.flags & NODE_IS_SAMPLE != 0
    }
}

/// Row of the edge table: `parent` is ancestor of `child` on `[left, right)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRow {
    pub left: f64,
    pub right: f64,
    pub parent: NodeId,
    pub child: NodeId,
}

// =#========================================================================#=
// TABLE COLLECTION
// =#========================================================================#=
/// Node and edge table over a sequence of fixed length.
///
/// Acts as [TreeSink]; finishing validates the rows and yields a [TableTree].
#[derive(Debug, Clone, PartialEq)]
pub struct TableCollection {
    sequence_length: f64,
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
}

impl TableCollection {
    /// Creates empty tables over `[0, sequence_length)`.
    pub fn new(sequence_length: f64) -> Self {
        TableCollection {
            sequence_length,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn sequence_length(&self) -> f64 {
        self.sequence_length
    }

    pub fn nodes(&self) -> &[NodeRow] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRow] {
        &self.edges
    }
}

impl TreeSink for TableCollection {
    type Output = TableTree;

    fn add_node(&mut self, flags: u32, time: f64) -> NodeId {
        self.nodes.push(NodeRow { flags, time });
        self.nodes.len() - 1
    }

    fn add_edge(&mut self, left: f64, right: f64, parent: NodeId, child: NodeId) {
        self.edges.push(EdgeRow {
            left,
            right,
            parent,
            child,
        });
    }

    /// Sorts edges by time of parent, then parent, child and left coordinate.
    fn sort(&mut self) {
        let nodes = &self.nodes;
        let parent_time = |edge: &EdgeRow| nodes.get(edge.parent).map_or(f64::INFINITY, |node| node.time);
        self.edges.sort_by(|e1, e2| {
            parent_time(e1)
                .total_cmp(&parent_time(e2))
                .then(e1.parent.cmp(&e2.parent))
                .then(e1.child.cmp(&e2.child))
                .then(e1.left.total_cmp(&e2.left))
        });
    }

    fn finish(self) -> Result<TableTree, RankError> {
        TableTree::new(self)
    }
}

// =#========================================================================#=
// TABLE TREE
// =#========================================================================#=
/// The tree described by a [TableCollection] whose edges all cover the
/// whole sequence.
///
/// # Structure
/// * Each node has at most one parent, which is strictly older.
/// * Roots are parentless nodes that have children or are samples; nodes
///   that are neither take no part in the tree.
/// * Children of a node are listed in edge table order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableTree {
    tables: TableCollection,
    roots: Vec<NodeId>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
}

impl TableTree {
    /// Builds the tree from `tables`.
    ///
    /// # Errors
    /// Returns [RankError] of kind `InvalidStructure` if an edge refers to a
    /// missing node, doesn't span the whole sequence, gives a node a second
    /// parent, or points from a parent to a child that isn't younger.
    pub fn new(tables: TableCollection) -> Result<Self, RankError> {
        let num_nodes = tables.nodes.len();
        let mut parents = vec![None; num_nodes];
        let mut children = vec![Vec::new(); num_nodes];

        for edge in &tables.edges {
            if edge.parent >= num_nodes || edge.child >= num_nodes {
                return Err(RankError::invalid_structure(format!(
                    "edge {}->{} refers to a missing node",
                    edge.parent, edge.child
                )));
            }
            if edge.left != 0.0 || edge.right != tables.sequence_length {
                return Err(RankError::invalid_structure(format!(
                    "edge {}->{} doesn't span the sequence",
                    edge.parent, edge.child
                )));
            }
            if tables.nodes[edge.parent].time <= tables.nodes[edge.child].time {
                return Err(RankError::invalid_structure(format!(
                    "parent {} not older than child {}",
                    edge.parent, edge.child
                )));
            }
            if parents[edge.child].replace(edge.parent).is_some() {
                return Err(RankError::invalid_structure(format!("node {} has two parents", edge.child)));
            }
            children[edge.parent].push(edge.child);
        }

        let roots = (0..num_nodes)
            .filter(|&node| parents[node].is_none() && (!children[node].is_empty() || tables.nodes[node].is_sample()))
            .collect();

        Ok(TableTree {
            tables,
            roots,
            parents,
            children,
        })
    }

    /// Returns the tree with `n` leaves and the given rank, exported with
    /// default settings.
    ///
    /// # Errors
    /// Returns [RankError] of kind `RankOutOfBounds` if the rank is invalid for `n`.
    pub fn unrank(n: usize, rank: &Rank) -> Result<Self, RankError> {
        RankTree::unrank(rank, n)?.to_tables()
    }

    /// Returns the rank of this tree.
    ///
    /// # Errors
    /// Returns [RankError] of kind `MultipleRoots` or `NoRoot` unless the
    /// tree has exactly one root, and `InvalidStructure` for unary nodes.
    pub fn rank(&self) -> Result<Rank, RankError> {
        RankTree::from_tree(self)?.rank()
    }

    pub fn tables(&self) -> &TableCollection {
        &self.tables
    }

    pub fn num_nodes(&self) -> usize {
        self.tables.nodes.len()
    }

    /// Returns the ids of all sample nodes.
    pub fn samples(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.num_nodes()).filter(|&node| self.tables.nodes[node].is_sample())
    }

    /// Returns the parent of `node`, `None` for roots and unused nodes.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents[node]
    }

    pub fn time(&self, node: NodeId) -> f64 {
        self.tables.nodes[node].time
    }
}

impl TreeSource for TableTree {
    fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.children[node].is_empty()
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.children[node]
    }
}

impl Index<NodeId> for TableTree {
    type Output = NodeRow;

    fn index(&self, node: NodeId) -> &Self::Output {
        &self.tables.nodes[node]
    }
}
