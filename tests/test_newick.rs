use std::fs::{self, File};
use treerank::newick::{NewickStyle, to_newick, write_newick_file};
use treerank::{Rank, RankErrorType, RankTree, all_labelled_trees};

fn caterpillar() -> RankTree {
    // (0,(3,(1,2)))
    RankTree::unrank(&Rank::new(3u32, 2u32), 4).unwrap()
}

#[test]
fn test_newick_styles() {
    let tree = caterpillar();
    assert_eq!(to_newick(NewickStyle::ZeroIndexed, &tree, None::<&[&str]>), "(0,(3,(1,2)));");
    assert_eq!(to_newick(NewickStyle::OneIndexed, &tree, None::<&[&str]>), "(1,(4,(2,3)));");

    let names = ["A", "B", "C", "D"];
    assert_eq!(to_newick(NewickStyle::Label, &tree, Some(&names[..])), "(A,(D,(B,C)));");
}

#[test]
fn test_newick_label_style_needs_names() {
    let tree = caterpillar();
    assert_eq!(to_newick(NewickStyle::Label, &tree, None::<&[&str]>), "");

    let too_few = vec!["A".to_string(), "B".to_string()];
    assert_eq!(to_newick(NewickStyle::Label, &tree, Some(&too_few[..])), "");
}

#[test]
fn test_newick_escapes_names() {
    let tree = RankTree::new(vec![RankTree::leaf(0), RankTree::leaf(1)]).unwrap();
    let names = ["Okarito Brown Kiwi", "Kiwi's"];
    assert_eq!(
        to_newick(NewickStyle::Label, &tree, Some(&names[..])),
        "('Okarito Brown Kiwi','Kiwi''s');"
    );
}

#[test]
fn test_newick_of_shape() {
    let shape = RankTree::shape_unrank(&4u32.into(), 4).unwrap();
    assert_eq!(shape.to_newick(NewickStyle::ZeroIndexed, None::<&[&str]>), "((,),(,));");
}

#[test]
fn test_newick_single_leaf() {
    assert_eq!(to_newick(NewickStyle::OneIndexed, &RankTree::leaf(0), None::<&[&str]>), "1;");
}

#[test]
fn test_write_newick_file() {
    let path = std::env::temp_dir().join(format!("treerank_test_{}.nwk", std::process::id()));
    let trees: Vec<RankTree> = all_labelled_trees(3).collect();

    write_newick_file(File::create(&path).unwrap(), &trees, NewickStyle::ZeroIndexed, None::<&[&str]>).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["(0,1,2);", "(0,(1,2));", "(1,(0,2));", "(2,(0,1));"]);
}

#[test]
fn test_write_newick_file_missing_names() {
    let path = std::env::temp_dir().join(format!("treerank_test_names_{}.nwk", std::process::id()));
    let trees = vec![caterpillar()];

    let err = write_newick_file(File::create(&path).unwrap(), &trees, NewickStyle::Label, None::<&[&str]>)
        .unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err.kind(), RankErrorType::InvalidStructure(_)));
}
