//! Shared tree fixtures and proptest strategies.

use buddyscope_core::BlockNode;
use proptest::prelude::*;

/// 1024 KB root, partially fragmented:
/// `[P1 256 | free 256 | P2 512]`.
///
/// Five nodes, three leaves, depth 2 — deep enough to exercise edge
/// drawing, level grouping, and offset accumulation without being
/// tedious to assert against.
pub fn fragmented_1mb() -> BlockNode {
    BlockNode::split(
        BlockNode::split(
            BlockNode::occupied_leaf(256, "P1"),
            BlockNode::free_leaf(256),
        ),
        BlockNode::occupied_leaf(512, "P2"),
    )
}

/// A freshly initialized snapshot: one free leaf of `size_kb`.
pub fn fresh(size_kb: u64) -> BlockNode {
    BlockNode::free_leaf(size_kb)
}

/// Strategy generating arbitrary buddy trees of at most `depth` levels
/// over a `size_kb` root (halved at each split).
///
/// Leaves are randomly free or occupied; splits always carry both
/// children, as the model requires.
pub fn arb_tree(size_kb: u64, depth: u32) -> BoxedStrategy<BlockNode> {
    let leaf = any::<bool>()
        .prop_map(move |free| {
            if free {
                BlockNode::free_leaf(size_kb)
            } else {
                BlockNode::occupied_leaf(size_kb, "P")
            }
        })
        .boxed();
    if depth == 0 || size_kb < 2 {
        leaf
    } else {
        prop_oneof![
            leaf,
            (
                arb_tree(size_kb / 2, depth - 1),
                arb_tree(size_kb / 2, depth - 1)
            )
                .prop_map(|(l, r)| BlockNode::split(l, r)),
        ]
        .boxed()
    }
}
