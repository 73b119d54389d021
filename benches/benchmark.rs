use criterion::{Criterion, criterion_group, criterion_main};
use num_bigint::BigUint;
use std::hint::black_box;
use treerank::{Rank, RankTree, all_labelled_trees, num_shapes, precompute_shape_counts};

/// Leaf counts of the ranking benchmarks
const RANKING_SIZES: &[usize] = &[16, 24, 32];

/// Leaf counts of the enumeration benchmarks
const ENUMERATION_SIZES: &[usize] = &[5, 6];

/// A tree with `n` leaves from the middle of the rank range.
fn middle_rank(n: usize) -> Rank {
    let shape = num_shapes(n) / 2u32;
    let label = RankTree::shape_unrank(&shape, n).unwrap().num_labellings() / 2u32;
    Rank { shape, label }
}

fn unranking(c: &mut Criterion) {
    for &n in RANKING_SIZES {
        precompute_shape_counts(n);
        let rank = middle_rank(n);
        c.bench_function(&format!("unrank n={n}"), |b| {
            b.iter(|| RankTree::unrank(black_box(&rank), n).unwrap());
        });
    }
}

fn ranking(c: &mut Criterion) {
    for &n in RANKING_SIZES {
        let tree = RankTree::unrank(&middle_rank(n), n).unwrap();
        c.bench_function(&format!("rank n={n}"), |b| {
            // Fresh tree each time, ranks are cached
            b.iter(|| RankTree::new(black_box(&tree).children().to_vec()).unwrap().rank().unwrap());
        });
    }
}

fn enumeration(c: &mut Criterion) {
    for &n in ENUMERATION_SIZES {
        c.bench_function(&format!("enumerate n={n}"), |b| {
            b.iter(|| all_labelled_trees(black_box(n)).count());
        });
    }
}

fn counting(c: &mut Criterion) {
    c.bench_function("shape table n=40", |b| {
        b.iter(|| treerank::combinatorics::ShapeTable::with_max_leaves(black_box(40)));
    });
    c.bench_function("num_labellings n=32", |b| {
        let shape: BigUint = num_shapes(32) - 1u32;
        b.iter(|| treerank::num_labellings(black_box(&shape), 32).unwrap());
    });
}

criterion_group!(regression, unranking, ranking);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = enumeration, counting
}
criterion_main!(regression, reporting);
