//! Reactive wiring between snapshots, resize events, and scenes.
//!
//! [`TreeView`] owns one strategy's plan for the current snapshot plus
//! the scaled scene for the current viewport, and subscribes to a
//! [`ResizeFeed`]. The two recomputation paths are deliberately
//! asymmetric:
//!
//! - a new **snapshot** re-runs the plan pass and the scale pass;
//! - a new **width** re-runs only the scale pass.

use crate::error::ViewportError;
use crate::scene::Scene;
use crate::strategy::{LayoutPlan, LayoutStrategy};
use crate::viewport::{ResizeFeed, Viewport};
use buddyscope_core::BlockNode;

/// A live view of one snapshot under one layout strategy.
pub struct TreeView {
    strategy: Box<dyn LayoutStrategy>,
    plan: Option<Box<dyn LayoutPlan>>,
    viewport: Viewport,
    max_width: f64,
    feed: ResizeFeed,
    scene: Scene,
}

impl TreeView {
    /// Create a view with no snapshot yet.
    pub fn new(strategy: Box<dyn LayoutStrategy>, viewport: Viewport, feed: ResizeFeed) -> Self {
        Self {
            strategy,
            plan: None,
            viewport,
            max_width: Viewport::DEFAULT_MAX_WIDTH,
            feed,
            scene: Scene::default(),
        }
    }

    /// Replace the maximum render width (clamp applied on resize).
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = max_width;
        self
    }

    /// Name of the active strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// The current scene; empty until the first snapshot arrives.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replace the snapshot: re-plan and re-scale.
    pub fn set_tree(&mut self, root: &BlockNode) {
        let plan = self.strategy.plan(root);
        self.scene = plan.scale(&self.viewport);
        self.plan = Some(plan);
    }

    /// Drop the snapshot (allocator state unknown); the scene empties.
    pub fn clear(&mut self) {
        self.plan = None;
        self.scene = Scene::default();
    }

    /// Switch strategies, re-planning the current snapshot if any.
    ///
    /// The snapshot itself is owned by the session; the caller passes
    /// it back in because a view never retains tree state of its own.
    pub fn set_strategy(&mut self, strategy: Box<dyn LayoutStrategy>, root: Option<&BlockNode>) {
        self.strategy = strategy;
        match root {
            Some(root) => self.set_tree(root),
            None => self.clear(),
        }
    }

    /// Drain pending resize reports and, if the width changed, re-run
    /// the scale pass only.
    ///
    /// Returns `true` if the scene was rebuilt. Invalid widths from the
    /// feed are reported, never applied.
    pub fn pump_resize(&mut self) -> Result<bool, ViewportError> {
        let Some(width) = self.feed.latest() else {
            return Ok(false);
        };
        let viewport = self.viewport.resized(width, self.max_width)?;
        if viewport == self.viewport {
            return Ok(false);
        }
        self.viewport = viewport;
        if let Some(plan) = &self.plan {
            self.scene = plan.scale(&self.viewport);
        }
        Ok(true)
    }

    /// The viewport currently in effect.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
