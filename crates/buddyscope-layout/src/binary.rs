//! Depth-positioned binary-diagram layout (classic tree drawing).
//!
//! Every node receives a relative horizontal coordinate in `[0, 1]`
//! from its path alone: the root sits at 0.5, and a node at depth `d`
//! places its children at `±1/2^(d+2)` around itself one level down.
//! Leaves at equal depth end up evenly spaced regardless of block
//! size, which is what makes the diagram read as a tree rather than as
//! a memory map.
//!
//! The relative pass is independent of the render width; the scale
//! pass multiplies each relative coordinate by the viewport width and
//! can be re-run on every resize without retraversing the tree.

use crate::scene::{Edge, PositionedNode, Scene};
use crate::strategy::{LayoutPlan, LayoutStrategy};
use crate::viewport::Viewport;
use buddyscope_core::{BlockNode, NodePath, Side};
use indexmap::IndexMap;

/// One node of the relative (width-independent) layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RelativeNode {
    /// Path identity of the node.
    pub path: NodePath,
    /// Parent path, absent for the root.
    pub parent: Option<NodePath>,
    /// Depth below the root; the root is 0.
    pub depth: usize,
    /// Relative horizontal position in `[0, 1]`.
    pub rel_x: f64,
    /// Block size in KB.
    pub size_kb: u64,
    /// Human-readable size label.
    pub label: String,
    /// Occupying process, if any.
    pub occupant: Option<String>,
}

/// The binary-diagram strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryDiagram;

impl LayoutStrategy for BinaryDiagram {
    fn name(&self) -> &'static str {
        "binary-diagram"
    }

    fn plan(&self, root: &BlockNode) -> Box<dyn LayoutPlan> {
        Box::new(BinaryPlan::compute(root))
    }
}

/// Relative layout of one snapshot under [`BinaryDiagram`].
///
/// # Examples
///
/// ```
/// use buddyscope_core::BlockNode;
/// use buddyscope_layout::{BinaryPlan, LayoutPlan, Viewport};
///
/// let tree = BlockNode::split(
///     BlockNode::free_leaf(512),
///     BlockNode::free_leaf(512),
/// );
/// let plan = BinaryPlan::compute(&tree);
/// assert_eq!(plan.nodes()[0].rel_x, 0.5);
/// assert_eq!(plan.nodes()[1].rel_x, 0.25);
/// assert_eq!(plan.nodes()[2].rel_x, 0.75);
///
/// let scene = plan.scale(&Viewport::new(600.0).unwrap());
/// assert_eq!(scene.nodes[0].x, 300.0);
/// assert_eq!(scene.edges.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryPlan {
    nodes: Vec<RelativeNode>,
    max_depth: usize,
}

impl BinaryPlan {
    /// Run the relative layout pass over a snapshot.
    pub fn compute(root: &BlockNode) -> Self {
        let mut nodes = Vec::with_capacity(root.node_count());
        let mut max_depth = 0;
        place(root, NodePath::root(), 0, 0.5, &mut nodes, &mut max_depth);
        Self { nodes, max_depth }
    }

    /// The relative nodes in preorder.
    pub fn nodes(&self) -> &[RelativeNode] {
        &self.nodes
    }
}

/// Horizontal offset between a node at `depth` and its children.
fn child_offset(depth: usize) -> f64 {
    1.0 / f64::powi(2.0, depth as i32 + 2)
}

fn place(
    node: &BlockNode,
    path: NodePath,
    depth: usize,
    rel_x: f64,
    out: &mut Vec<RelativeNode>,
    max_depth: &mut usize,
) {
    *max_depth = (*max_depth).max(depth);
    out.push(RelativeNode {
        parent: path.parent(),
        path: path.clone(),
        depth,
        rel_x,
        size_kb: node.size_kb(),
        label: node.display_label(),
        occupant: node.occupant().map(str::to_owned),
    });
    if let Some((left, right)) = node.children() {
        let offset = child_offset(depth);
        place(
            left,
            path.child(Side::Left),
            depth + 1,
            rel_x - offset,
            out,
            max_depth,
        );
        place(
            right,
            path.child(Side::Right),
            depth + 1,
            rel_x + offset,
            out,
            max_depth,
        );
    }
}

impl LayoutPlan for BinaryPlan {
    fn scale(&self, viewport: &Viewport) -> Scene {
        let mut nodes = IndexMap::with_capacity(self.nodes.len());
        let mut edges = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        for rel in &self.nodes {
            if let Some(parent) = &rel.parent {
                edges.push(Edge {
                    from: parent.clone(),
                    to: rel.path.clone(),
                });
            }
            nodes.insert(
                rel.path.clone(),
                PositionedNode {
                    path: rel.path.clone(),
                    parent: rel.parent.clone(),
                    x: rel.rel_x * viewport.width,
                    y: viewport.top_margin + rel.depth as f64 * viewport.level_height,
                    span: None,
                    size_kb: rel.size_kb,
                    label: rel.label.clone(),
                    occupant: rel.occupant.clone(),
                },
            );
        }
        Scene {
            nodes,
            edges,
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

#[cfg(test)]
mod tests {
    use super::*;
    use buddyscope_test_utils::fixtures;

    #[test]
    fn root_sits_at_half() {
        let plan = BinaryPlan::compute(&BlockNode::free_leaf(1024));
        assert_eq!(plan.nodes().len(), 1);
        assert_eq!(plan.nodes()[0].rel_x, 0.5);
        assert_eq!(plan.nodes()[0].depth, 0);
        assert_eq!(plan.max_depth(), 0);
    }

    #[test]
    fn single_leaf_scene_has_no_edges() {
        let plan = BinaryPlan::compute(&BlockNode::free_leaf(1024));
        let scene = plan.scale(&Viewport::new(600.0).unwrap());
        assert_eq!(scene.len(), 1);
        assert!(scene.edges.is_empty());
        let root = scene.nodes.values().next().unwrap();
        assert_eq!(root.x, 300.0);
        assert_eq!(root.y, Viewport::DEFAULT_TOP_MARGIN);
    }

    #[test]
    fn children_offset_by_parent_depth() {
        let plan = BinaryPlan::compute(&fixtures::fragmented_1mb());
        // Root at 0.5, depth-0 offset = 1/4.
        let by_path = |s: &str| {
            plan.nodes()
                .iter()
                .find(|n| n.path.to_string() == s)
                .unwrap()
                .rel_x
        };
        assert_eq!(by_path("0"), 0.5);
        assert_eq!(by_path("0L"), 0.25);
        assert_eq!(by_path("0R"), 0.75);
        // Depth-1 offset = 1/8.
        assert_eq!(by_path("0LL"), 0.125);
        assert_eq!(by_path("0LR"), 0.375);
    }

    #[test]
    fn scaling_is_linear_in_width() {
        let plan = BinaryPlan::compute(&fixtures::fragmented_1mb());
        let narrow = plan.scale(&Viewport::new(350.0).unwrap());
        let wide = plan.scale(&Viewport::new(700.0).unwrap());
        for (path, node) in &narrow.nodes {
            assert_eq!(wide.node(path).unwrap().x, node.x * 2.0);
        }
    }

    #[test]
    fn scaling_is_idempotent_for_identical_widths() {
        let plan = BinaryPlan::compute(&fixtures::fragmented_1mb());
        let vp = Viewport::new(613.0).unwrap();
        assert_eq!(plan.scale(&vp), plan.scale(&vp));
    }

    #[test]
    fn every_non_root_node_gets_one_edge() {
        let tree = fixtures::fragmented_1mb();
        let plan = BinaryPlan::compute(&tree);
        let scene = plan.scale(&Viewport::new(600.0).unwrap());
        assert_eq!(scene.edges.len(), tree.node_count() - 1);
        for edge in &scene.edges {
            let (_, y1, _, y2) = scene.edge_coords(edge).unwrap();
            // Edges always point one level down.
            assert_eq!(y2 - y1, Viewport::DEFAULT_LEVEL_HEIGHT);
        }
    }

    #[test]
    fn equal_depth_leaves_are_evenly_spaced() {
        // Full split of 1 MB into four 256 KB leaves.
        let tree = BlockNode::split(
            BlockNode::split(
                BlockNode::free_leaf(256),
                BlockNode::free_leaf(256),
            ),
            BlockNode::split(
                BlockNode::occupied_leaf(256, "P1"),
                BlockNode::free_leaf(256),
            ),
        );
        let plan = BinaryPlan::compute(&tree);
        let mut xs: Vec<f64> = plan
            .nodes()
            .iter()
            .filter(|n| n.depth == 2)
            .map(|n| n.rel_x)
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![0.125, 0.375, 0.625, 0.875]);
    }

    mod proptests {
        use super::*;
        use buddyscope_test_utils::fixtures::arb_tree;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn child_offset_is_exact(tree in arb_tree(1024, 6)) {
                let plan = BinaryPlan::compute(&tree);
                for node in plan.nodes() {
                    let Some(parent_path) = &node.parent else { continue };
                    let parent = plan
                        .nodes()
                        .iter()
                        .find(|n| &n.path == parent_path)
                        .unwrap();
                    // Powers of two are exact in f64, so no tolerance.
                    let expected = child_offset(parent.depth);
                    let delta = node.rel_x - parent.rel_x;
                    prop_assert_eq!(delta.abs(), expected);
                    let side = *node.path.segments().last().unwrap();
                    prop_assert_eq!(side == Side::Right, delta > 0.0);
                }
            }

            #[test]
            fn relative_positions_stay_in_unit_range(tree in arb_tree(1024, 6)) {
                let plan = BinaryPlan::compute(&tree);
                for node in plan.nodes() {
                    prop_assert!(node.rel_x > 0.0 && node.rel_x < 1.0);
                }
            }

            #[test]
            fn scale_multiplies_by_width(tree in arb_tree(1024, 5), width in 1.0f64..2000.0) {
                let plan = BinaryPlan::compute(&tree);
                let scene = plan.scale(&Viewport::new(width).unwrap());
                for rel in plan.nodes() {
                    let node = scene.node(&rel.path).unwrap();
                    prop_assert_eq!(node.x, rel.rel_x * width);
                }
            }
        }
    }
}
