use treerank::tables::{NODE_IS_SAMPLE, NodeId};
use treerank::{
    Rank, RankError, RankErrorType, RankTree, TableCollection, TableExport, TableTree, TreeSink, TreeSource,
    all_tree_labellings, all_tree_shapes, all_trees,
};

/// Tables for `((0,1),2)` with a second root `3` if `extra_root` is set.
fn small_tables(extra_root: bool) -> TableCollection {
    let mut tables = TableCollection::new(1.0);
    for _ in 0..3 {
        tables.add_node(NODE_IS_SAMPLE, 0.0);
    }
    if extra_root {
        tables.add_node(NODE_IS_SAMPLE, 0.0);
    }
    let cherry = tables.add_node(0, 1.0);
    let root = tables.add_node(0, 2.0);
    tables.add_edge(0.0, 1.0, root, 2);
    tables.add_edge(0.0, 1.0, root, cherry);
    tables.add_edge(0.0, 1.0, cherry, 0);
    tables.add_edge(0.0, 1.0, cherry, 1);
    tables.sort();
    tables
}

// ============================================================================
// Export
// ============================================================================
#[test]
fn test_export_structure() {
    let tree = RankTree::unrank(&Rank::new(3u32, 2u32), 4).unwrap();
    let tables = tree.to_tables().unwrap();

    assert_eq!(tables.num_nodes(), 7);
    assert_eq!(tables.samples().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    for sample in 0..4 {
        assert_eq!(tables.time(sample), 0.0);
        assert!(tables[sample].is_sample());
    }
    assert_eq!(tables.roots().len(), 1);
    let root = tables.roots()[0];
    assert_eq!(tables.time(root), 3.0);
    assert_eq!(tables.children(root).len(), 2);

    let edges = tables.tables().edges();
    assert_eq!(edges.len(), 6);
    assert!(edges.iter().all(|e| e.left == 0.0 && e.right == 1.0));
    assert!(edges.windows(2).all(|w| tables.time(w[0].parent) <= tables.time(w[1].parent)));
}

#[test]
fn test_export_then_import() {
    for n in 1..=6 {
        for tree in treerank::all_labelled_trees(n) {
            let tables = tree.to_tables().unwrap();
            let imported = RankTree::from_tree(&tables).unwrap();
            assert_eq!(imported, tree);
            assert_eq!(tables.rank().unwrap(), tree.rank().unwrap());
        }
    }
}

#[test]
fn test_export_config() {
    let tree = RankTree::unrank(&Rank::new(4u32, 0u32), 4).unwrap();
    let config = TableExport::new().with_sequence_length(10.0).with_time_step(0.5);
    let tables = tree.export(&config).unwrap();

    assert_eq!(tables.tables().sequence_length(), 10.0);
    assert!(tables.tables().edges().iter().all(|e| e.right == 10.0));
    assert_eq!(tables.time(tables.roots()[0]), 1.0);
}

#[test]
#[should_panic]
fn test_export_config_rejects_zero_time_step() {
    let _ = TableExport::default().with_time_step(0.0);
}

#[test]
fn test_export_requires_labels() {
    let shape = RankTree::shape_unrank(&2u32.into(), 4).unwrap();
    assert_eq!(shape.to_tables().unwrap_err().kind(), &RankErrorType::Unlabelled);

    let gapped = RankTree::new(vec![RankTree::leaf(0), RankTree::leaf(5)]).unwrap();
    assert!(matches!(
        gapped.to_tables().unwrap_err().kind(),
        RankErrorType::InvalidStructure(_)
    ));
}

// ============================================================================
// Import
// ============================================================================
#[test]
fn test_import_tables() {
    let tables = small_tables(false).finish().unwrap();
    let tree = RankTree::from_tree(&tables).unwrap();
    assert_eq!(tree.to_string(), "(2,(0,1))");
    assert_eq!(tables.rank().unwrap(), Rank::new(1u32, 2u32));
}

#[test]
fn test_import_multiple_roots() {
    let tables = small_tables(true).finish().unwrap();
    let err = RankTree::from_tree(&tables).unwrap_err();
    assert_eq!(err.kind(), &RankErrorType::MultipleRoots(2));
}

#[test]
fn test_import_no_root() {
    let tables = TableCollection::new(1.0).finish().unwrap();
    assert_eq!(tables.rank().unwrap_err().kind(), &RankErrorType::NoRoot);
}

#[test]
fn test_import_unary_vertex() {
    let mut tables = TableCollection::new(1.0);
    let leaf = tables.add_node(NODE_IS_SAMPLE, 0.0);
    let root = tables.add_node(0, 1.0);
    tables.add_edge(0.0, 1.0, root, leaf);
    let tables = tables.finish().unwrap();
    assert!(matches!(
        tables.rank().unwrap_err().kind(),
        RankErrorType::InvalidStructure(_)
    ));
}

#[test]
fn test_invalid_tables() {
    // Child older than parent
    let mut tables = TableCollection::new(1.0);
    let a = tables.add_node(NODE_IS_SAMPLE, 2.0);
    let b = tables.add_node(0, 1.0);
    tables.add_edge(0.0, 1.0, b, a);
    assert!(tables.finish().is_err());

    // Two parents
    let mut tables = TableCollection::new(1.0);
    let a = tables.add_node(NODE_IS_SAMPLE, 0.0);
    let b = tables.add_node(0, 1.0);
    let c = tables.add_node(0, 2.0);
    tables.add_edge(0.0, 1.0, b, a);
    tables.add_edge(0.0, 1.0, c, a);
    assert!(tables.finish().is_err());

    // Partial span
    let mut tables = TableCollection::new(1.0);
    let a = tables.add_node(NODE_IS_SAMPLE, 0.0);
    let b = tables.add_node(0, 1.0);
    tables.add_edge(0.0, 0.5, b, a);
    assert!(tables.finish().is_err());
}

// ============================================================================
// Quick table API
// ============================================================================
#[test]
fn test_all_trees_in_rank_order() {
    let ranks: Vec<Rank> = all_trees(4).map(|t| t.rank().unwrap()).collect();
    assert_eq!(ranks.len(), 26);
    assert!(ranks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_all_tree_shapes() {
    let ranks: Vec<Rank> = all_tree_shapes(5).map(|t| t.rank().unwrap()).collect();
    let expected: Vec<Rank> = (0..12u32).map(|shape| Rank::new(shape, 0u32)).collect();
    assert_eq!(ranks, expected);
}

#[test]
fn test_all_tree_labellings() {
    let tables = TableTree::unrank(4, &Rank::new(4u32, 2u32)).unwrap();
    let ranks: Vec<Rank> = all_tree_labellings(&tables).unwrap().map(|t| t.rank().unwrap()).collect();
    assert_eq!(ranks, vec![Rank::new(4u32, 0u32), Rank::new(4u32, 1u32), Rank::new(4u32, 2u32)]);

    let tables = small_tables(true).finish().unwrap();
    assert!(all_tree_labellings(&tables).is_err());
}

// ============================================================================
// Custom source and sink
// ============================================================================
/// Children lists indexed by node id.
struct AdjacencyTree {
    root: Vec<NodeId>,
    children: Vec<Vec<NodeId>>,
}

impl TreeSource for AdjacencyTree {
    fn roots(&self) -> &[NodeId] {
        &self.root
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.children[node].is_empty()
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.children[node]
    }
}

/// Counts rows and records whether it got sorted.
#[derive(Default)]
struct CountingSink {
    nodes: usize,
    edges: usize,
    sorted: bool,
}

impl TreeSink for CountingSink {
    type Output = (usize, usize);

    fn add_node(&mut self, _flags: u32, _time: f64) -> NodeId {
        self.nodes += 1;
        self.nodes - 1
    }

    fn add_edge(&mut self, _left: f64, _right: f64, _parent: NodeId, _child: NodeId) {
        self.edges += 1;
    }

    fn sort(&mut self) {
        self.sorted = true;
    }

    fn finish(self) -> Result<Self::Output, RankError> {
        if !self.sorted {
            return Err(RankError::invalid_structure("not sorted"));
        }
        Ok((self.nodes, self.edges))
    }
}

#[test]
fn test_custom_source_and_sink() {
    // 4 -> {3, 5}, 3 -> {0, 1, 2}
    let source = AdjacencyTree {
        root: vec![4],
        children: vec![vec![], vec![], vec![], vec![0, 1, 2], vec![3, 5], vec![]],
    };
    let tree = RankTree::from_tree(&source).unwrap();
    assert_eq!(tree.to_string(), "(5,(0,1,2))");

    // Leaf labels 0, 1, 2, 5 aren't 0..n
    assert!(tree.to_tables_with(CountingSink::default(), &TableExport::default()).is_err());

    let tree = RankTree::unrank(&Rank::new(2u32, 0u32), 4).unwrap();
    let counts = tree.to_tables_with(CountingSink::default(), &TableExport::default()).unwrap();
    assert_eq!(counts, (6, 5));
}
