//! Layout hot-path benchmarks: the plan pass (per snapshot) and the
//! scale pass (per resize). The scale pass is the one that must stay
//! cheap — it runs on every container width change.

use buddyscope_core::BlockNode;
use buddyscope_layout::{BinaryPlan, LayoutPlan, LevelPlan, Viewport};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// Fully split tree of the given depth: 2^(depth+1) - 1 nodes.
fn full_tree(size_kb: u64, depth: u32) -> BlockNode {
    if depth == 0 || size_kb < 2 {
        BlockNode::occupied_leaf(size_kb, "P")
    } else {
        BlockNode::split(
            full_tree(size_kb / 2, depth - 1),
            full_tree(size_kb / 2, depth - 1),
        )
    }
}

fn bench_layout(c: &mut Criterion) {
    let tree = full_tree(1 << 20, 8);
    let viewport = Viewport::new(640.0).unwrap();

    c.bench_function("binary_plan_depth8", |b| {
        b.iter(|| BinaryPlan::compute(black_box(&tree)))
    });

    let binary = BinaryPlan::compute(&tree);
    c.bench_function("binary_scale_depth8", |b| {
        b.iter(|| binary.scale(black_box(&viewport)))
    });

    c.bench_function("level_plan_depth8", |b| {
        b.iter(|| LevelPlan::compute(black_box(&tree)))
    });

    let level = LevelPlan::compute(&tree);
    c.bench_function("level_scale_depth8", |b| {
        b.iter(|| level.scale(black_box(&viewport)))
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
