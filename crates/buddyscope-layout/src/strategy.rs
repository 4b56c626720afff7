//! The `LayoutStrategy` trait and its plan/scale split.

use crate::scene::Scene;
use crate::viewport::Viewport;
use buddyscope_core::BlockNode;

/// A way of turning a block-tree snapshot into positioned geometry.
///
/// The two shipped strategies — [`BinaryDiagram`](crate::BinaryDiagram)
/// and [`LevelBands`](crate::LevelBands) — are alternate renderers of
/// the same snapshot. Neither is authoritative; the embedder selects
/// one (or offers both) through this trait.
///
/// # Plan / scale split
///
/// [`plan`](LayoutStrategy::plan) performs the topology-dependent work
/// and is called once per snapshot. The returned [`LayoutPlan`] answers
/// [`scale`](LayoutPlan::scale) queries for any viewport; scaling is a
/// single linear pass, cheap enough to re-run on every container
/// resize without touching the plan.
pub trait LayoutStrategy: Send + Sync {
    /// Short identifier for diagnostics and strategy selection UIs.
    fn name(&self) -> &'static str;

    /// Compute the topology-dependent layout pass for one snapshot.
    fn plan(&self, root: &BlockNode) -> Box<dyn LayoutPlan>;
}

/// The reusable product of a strategy's topology pass.
pub trait LayoutPlan: Send + Sync {
    /// Scale the plan to pixel geometry for the given viewport.
    ///
    /// Pure: identical viewports yield identical scenes, so callers
    /// may re-run this freely on resize.
    fn scale(&self, viewport: &Viewport) -> Scene;

    /// Deepest level in the plan; a single-leaf tree has depth 0.
    fn max_depth(&self) -> usize;

    /// Number of nodes the plan positions.
    fn node_count(&self) -> usize;
}
