use num_bigint::BigUint;
use treerank::combinatorics::{
    children_label_ranks, group_label_ranks, group_rank, num_assignments_in_group, num_group_labellings,
    num_list_of_group_labellings, num_shapes,
};
use treerank::{RankErrorType, RankTree, num_labellings};

fn big(x: u64) -> BigUint {
    BigUint::from(x)
}

fn cherry(a: usize, b: usize) -> RankTree {
    RankTree::new(vec![RankTree::leaf(a), RankTree::leaf(b)]).unwrap()
}

#[test]
fn test_total_labelled_trees() {
    // Total number of labelled trees without unary vertices
    let expected = [1u64, 1, 4, 26, 236, 2752, 39208];
    for (n, &total) in (1..=7).zip(expected.iter()) {
        let count: u64 = num_shapes(n).try_into().unwrap();
        let sum = (0..count)
            .map(|rank| num_labellings(&big(rank), n).unwrap())
            .fold(big(0), |acc, x| acc + x);
        assert_eq!(sum, big(total), "n = {n}");
    }
}

#[test]
fn test_num_labellings_of_shapes() {
    // Star, one cherry, caterpillar-like and balanced
    let counts: Vec<u64> = (0..5).map(|rank| num_labellings(&big(rank), 4).unwrap().try_into().unwrap()).collect();
    assert_eq!(counts, vec![1, 6, 4, 12, 3]);
    assert_eq!(num_labellings(&big(5), 4).unwrap_err().kind(), &RankErrorType::RankOutOfBounds);
}

#[test]
fn test_num_assignments_in_group() {
    // Three cherries from six labels: 5 * 3 * 1
    assert_eq!(num_assignments_in_group(3, 2), big(15));
    assert_eq!(num_assignments_in_group(2, 3), big(10));
    assert_eq!(num_assignments_in_group(4, 1), big(1));
}

#[test]
fn test_group_labellings_of_cherries() {
    let group = vec![cherry(0, 1), cherry(2, 3)];
    assert_eq!(num_group_labellings(&group), big(3));
    assert_eq!(num_list_of_group_labellings(&[&group[..]]), big(3));

    let leaves = vec![RankTree::leaf(4)];
    // 5 choices of label for the single leaf, then 3 for the cherries
    assert_eq!(num_list_of_group_labellings(&[&leaves[..], &group[..]]), big(15));
}

#[test]
fn test_group_rank_round_trip() {
    // Both ways to label two cherries with {0,1,2,3} after {0,1}{2,3}
    let groups = [
        vec![cherry(0, 1), cherry(2, 3)],
        vec![cherry(0, 2), cherry(1, 3)],
        vec![cherry(0, 3), cherry(1, 2)],
    ];
    for (expected, group) in groups.iter().enumerate() {
        let rank = group_rank(group);
        assert_eq!(rank, big(expected as u64));

        let (labels, ranks) = group_label_ranks(&rank, group, &[0, 1, 2, 3]).unwrap();
        let expected_labels: Vec<Vec<usize>> = group.iter().map(|t| t.labels().to_vec()).collect();
        assert_eq!(labels, expected_labels);
        assert_eq!(ranks, vec![big(0), big(0)]);
    }
}

#[test]
fn test_children_label_ranks() {
    // Shape (x,(x,(x,x))) has groups [leaf] and [3-caterpillar]
    let shape = RankTree::shape_unrank(&big(3), 4).unwrap();
    let groups = shape.group_children_by_shape();
    assert_eq!(groups.len(), 2);

    let (labels, ranks) = children_label_ranks(&groups, &big(5), &[0, 1, 2, 3]).unwrap();
    // 3 labellings of the caterpillar per label of the leaf
    assert_eq!(labels, vec![vec![1], vec![0, 2, 3]]);
    assert_eq!(ranks, vec![big(0), big(2)]);

    let err = children_label_ranks(&groups, &big(12), &[0, 1, 2, 3]).unwrap_err();
    assert_eq!(err.kind(), &RankErrorType::RankOutOfBounds);
}

#[test]
fn test_label_rank_round_trip() {
    for n in 1..=6 {
        let count: u64 = num_shapes(n).try_into().unwrap();
        for shape_rank in 0..count {
            let shape = RankTree::shape_unrank(&big(shape_rank), n).unwrap();
            let total: u64 = shape.num_labellings().clone().try_into().unwrap();
            for label_rank in 0..total {
                let tree = shape.label_unrank(&big(label_rank)).unwrap();
                let rebuilt = RankTree::new(tree.children().to_vec()).unwrap_or_else(|_| tree.clone());
                assert_eq!(rebuilt.label_rank().unwrap(), &big(label_rank), "tree {tree}");
                assert_eq!(rebuilt.shape_rank(), &big(shape_rank));
            }
            assert!(shape.label_unrank(&big(total)).is_err());
        }
    }
}

#[test]
fn test_label_rank_of_shape_fails() {
    let shape = RankTree::shape_unrank(&big(1), 3).unwrap();
    assert_eq!(shape.label_rank().unwrap_err().kind(), &RankErrorType::Unlabelled);
}
