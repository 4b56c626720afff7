//! Breadth-first leveled proportional layout (the fragmentation view).
//!
//! Nodes are grouped into levels by breadth-first traversal — both
//! children are visited together, which the tree invariant guarantees —
//! and each block becomes a horizontal segment whose extent is
//! proportional to its share of total memory. A block's horizontal
//! origin is its address-range offset, so segments on one level never
//! overlap and the leaves tile the full memory range exactly.
//!
//! Depth elegance is traded away for size-accurate density: a 1 KB
//! fragment next to a 512 KB block is visibly tiny, which is the point.

use crate::scene::{PositionedNode, Scene};
use crate::strategy::{LayoutPlan, LayoutStrategy};
use crate::viewport::Viewport;
use buddyscope_core::{BlockNode, NodePath, Side};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// One node of the proportional (width-independent) layout.
#[derive(Clone, Debug, PartialEq)]
pub struct BandNode {
    /// Path identity of the node.
    pub path: NodePath,
    /// Parent path, absent for the root.
    pub parent: Option<NodePath>,
    /// Breadth-first level; the root is 0.
    pub level: usize,
    /// Address-range origin as a fraction of total memory, in `[0, 1)`.
    pub offset: f64,
    /// Block size as a fraction of total memory, in `(0, 1]`.
    pub fraction: f64,
    /// Whether the block is an indivisible leaf.
    pub is_leaf: bool,
    /// Block size in KB.
    pub size_kb: u64,
    /// Human-readable size label.
    pub label: String,
    /// Occupying process, if any.
    pub occupant: Option<String>,
}

/// The leveled proportional strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LevelBands;

impl LayoutStrategy for LevelBands {
    fn name(&self) -> &'static str {
        "level-bands"
    }

    fn plan(&self, root: &BlockNode) -> Box<dyn LayoutPlan> {
        Box::new(LevelPlan::compute(root))
    }
}

/// Proportional layout of one snapshot under [`LevelBands`].
///
/// # Examples
///
/// ```
/// use buddyscope_core::BlockNode;
/// use buddyscope_layout::{LayoutPlan, LevelPlan, Viewport};
///
/// let tree = BlockNode::split(
///     BlockNode::occupied_leaf(256, "P1"),
///     BlockNode::free_leaf(768), // not a buddy split, but layout doesn't care
/// );
/// let plan = LevelPlan::compute(&tree);
/// let scene = plan.scale(&Viewport::new(1000.0).unwrap());
/// let right = scene.nodes.values().last().unwrap();
/// assert_eq!(right.x, 250.0);
/// assert_eq!(right.span, Some(750.0));
/// assert!(scene.edges.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LevelPlan {
    nodes: Vec<BandNode>,
    max_depth: usize,
}

impl LevelPlan {
    /// Run the proportional layout pass over a snapshot.
    ///
    /// Traversal is breadth-first so the node order groups by level;
    /// offsets accumulate each node's address-range origin as the
    /// traversal descends.
    pub fn compute(root: &BlockNode) -> Self {
        let total = root.size_kb() as f64;
        let mut nodes = Vec::with_capacity(root.node_count());
        let mut max_depth = 0;
        let mut queue: VecDeque<(&BlockNode, NodePath, usize, u64)> = VecDeque::new();
        queue.push_back((root, NodePath::root(), 0, 0));
        while let Some((node, path, level, start_kb)) = queue.pop_front() {
            max_depth = max_depth.max(level);
            nodes.push(BandNode {
                parent: path.parent(),
                path: path.clone(),
                level,
                offset: if total > 0.0 {
                    start_kb as f64 / total
                } else {
                    0.0
                },
                fraction: if total > 0.0 {
                    node.size_kb() as f64 / total
                } else {
                    0.0
                },
                is_leaf: node.is_leaf(),
                size_kb: node.size_kb(),
                label: node.display_label(),
                occupant: node.occupant().map(str::to_owned),
            });
            if let Some((left, right)) = node.children() {
                queue.push_back((left, path.child(Side::Left), level + 1, start_kb));
                queue.push_back((
                    right,
                    path.child(Side::Right),
                    level + 1,
                    start_kb + left.size_kb(),
                ));
            }
        }
        Self { nodes, max_depth }
    }

    /// The band nodes in breadth-first order.
    pub fn nodes(&self) -> &[BandNode] {
        &self.nodes
    }

    /// The nodes of one level, in address order.
    pub fn level(&self, level: usize) -> impl Iterator<Item = &BandNode> {
        self.nodes.iter().filter(move |n| n.level == level)
    }

    /// The leaf bands across all levels, in breadth-first order.
    ///
    /// Their fractions sum to 1.0 (within floating tolerance): leaves
    /// partition the root's range exactly.
    pub fn leaves(&self) -> impl Iterator<Item = &BandNode> {
        self.nodes.iter().filter(|n| n.is_leaf)
    }
}

impl LayoutPlan for LevelPlan {
    fn scale(&self, viewport: &Viewport) -> Scene {
        let mut nodes = IndexMap::with_capacity(self.nodes.len());
        for band in &self.nodes {
            nodes.insert(
                band.path.clone(),
                PositionedNode {
                    path: band.path.clone(),
                    parent: band.parent.clone(),
                    x: band.offset * viewport.width,
                    y: viewport.top_margin + band.level as f64 * viewport.level_height,
                    span: Some(band.fraction * viewport.width),
                    size_kb: band.size_kb,
                    label: band.label.clone(),
                    occupant: band.occupant.clone(),
                },
            );
        }
        Scene {
            nodes,
            // Level-grouped, not edge-drawn.
            edges: Vec::new(),
            width: viewport.width,
            height: viewport.top_margin + (self.max_depth as f64 + 1.0) * viewport.level_height,
        }
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
