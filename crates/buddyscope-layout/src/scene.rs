//! Positioned render geometry produced by the layout strategies.

use buddyscope_core::NodePath;
use indexmap::IndexMap;

/// One renderable node with derived pixel coordinates.
///
/// Coordinates are never authoritative — they are recomputed from the
/// snapshot and the viewport on every scale pass. Nodes are keyed by
/// [`NodePath`], which is stable across re-layouts of the same tree
/// shape, so transition layers can track identity across snapshot
/// updates.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
    /// Path identity of the node.
    pub path: NodePath,
    /// Parent path, absent for the root.
    pub parent: Option<NodePath>,
    /// Horizontal pixel coordinate. For the binary diagram this is the
    /// node's anchor (box center); for level bands it is the segment's
    /// left edge.
    pub x: f64,
    /// Vertical pixel coordinate of the node's level.
    pub y: f64,
    /// Horizontal pixel extent of the block segment. `None` for
    /// point-anchored layouts, where the renderer chooses a fixed box
    /// size around the anchor.
    pub span: Option<f64>,
    /// Block size in KB.
    pub size_kb: u64,
    /// Human-readable size label.
    pub label: String,
    /// Occupying process, if any.
    pub occupant: Option<String>,
}

impl PositionedNode {
    /// Whether the block holds no process.
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// A parent-to-child connector between two scene nodes.
///
/// Endpoints are node identities, not coordinates: renderers resolve
/// them through [`Scene::node`] so connector geometry follows the nodes
/// through animated transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// The parent node.
    pub from: NodePath,
    /// The child node.
    pub to: NodePath,
}

/// A complete scaled layout: every node positioned, plus edges where
/// the strategy draws them.
///
/// Nodes are stored in an [`IndexMap`] keyed by path: iteration follows
/// the strategy's traversal order while parent lookups for edge drawing
/// stay O(1).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Positioned nodes in traversal order.
    pub nodes: IndexMap<NodePath, PositionedNode>,
    /// Parent-to-child connectors; empty for level-grouped strategies.
    pub edges: Vec<Edge>,
    /// Total pixel width consumed by the layout.
    pub width: f64,
    /// Total pixel height consumed by the layout.
    pub height: f64,
}

impl Scene {
    /// Look up a node by path.
    pub fn node(&self, path: &NodePath) -> Option<&PositionedNode> {
        self.nodes.get(path)
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve an edge to its endpoint coordinates `(x1, y1, x2, y2)`.
    ///
    /// Returns `None` if either endpoint is missing from the node
    /// table, which only happens if the edge belongs to a different
    /// scene.
    pub fn edge_coords(&self, edge: &Edge) -> Option<(f64, f64, f64, f64)> {
        let from = self.node(&edge.from)?;
        let to = self.node(&edge.to)?;
        Some((from.x, from.y, to.x, to.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddyscope_core::{NodePath, Side};

    fn node(path: NodePath, x: f64, y: f64) -> PositionedNode {
        PositionedNode {
            parent: path.parent(),
            path,
            x,
            y,
            span: None,
            size_kb: 64,
            label: "64 KB".to_owned(),
            occupant: None,
        }
    }

    #[test]
    fn edge_coords_resolve_through_node_table() {
        let root = NodePath::root();
        let left = root.child(Side::Left);
        let mut scene = Scene::default();
        scene.nodes.insert(root.clone(), node(root.clone(), 300.0, 40.0));
        scene.nodes.insert(left.clone(), node(left.clone(), 150.0, 120.0));
        let edge = Edge {
            from: root,
            to: left,
        };
        assert_eq!(scene.edge_coords(&edge), Some((300.0, 40.0, 150.0, 120.0)));
    }

    #[test]
    fn missing_endpoint_yields_none() {
        let scene = Scene::default();
        let edge = Edge {
            from: NodePath::root(),
            to: NodePath::root().child(Side::Left),
        };
        assert_eq!(scene.edge_coords(&edge), None);
    }
}
