//! Viewport dimensions and the resize subscription feed.

use crate::error::ViewportError;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Render dimensions for a scale pass.
///
/// Constructed with validated values; a zero, negative, or non-finite
/// width can never reach the scaling arithmetic.
///
/// # Examples
///
/// ```
/// use buddyscope_layout::Viewport;
///
/// let vp = Viewport::new(600.0).unwrap();
/// assert_eq!(vp.width, 600.0);
/// assert_eq!(vp.level_height, Viewport::DEFAULT_LEVEL_HEIGHT);
/// assert!(Viewport::new(0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Available render width in pixels.
    pub width: f64,
    /// Vertical distance between tree levels.
    pub level_height: f64,
    /// Space above the root node.
    pub top_margin: f64,
}

impl Viewport {
    /// Default vertical distance between levels.
    pub const DEFAULT_LEVEL_HEIGHT: f64 = 80.0;
    /// Default space above the root.
    pub const DEFAULT_TOP_MARGIN: f64 = 40.0;
    /// Default cap on the render width.
    pub const DEFAULT_MAX_WIDTH: f64 = 700.0;

    /// A viewport with the given width and default vertical metrics.
    pub fn new(width: f64) -> Result<Self, ViewportError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ViewportError::InvalidWidth { width });
        }
        Ok(Self {
            width,
            level_height: Self::DEFAULT_LEVEL_HEIGHT,
            top_margin: Self::DEFAULT_TOP_MARGIN,
        })
    }

    /// Replace the level height.
    pub fn with_level_height(mut self, level_height: f64) -> Result<Self, ViewportError> {
        if !level_height.is_finite() || level_height <= 0.0 {
            return Err(ViewportError::InvalidLevelHeight {
                height: level_height,
            });
        }
        self.level_height = level_height;
        Ok(self)
    }

    /// Replace the top margin.
    pub fn with_top_margin(mut self, top_margin: f64) -> Self {
        self.top_margin = top_margin;
        self
    }

    /// A copy of this viewport at a new width, clamped to `max_width`.
    pub fn resized(&self, width: f64, max_width: f64) -> Result<Self, ViewportError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ViewportError::InvalidWidth { width });
        }
        Ok(Self {
            width: width.min(max_width),
            ..*self
        })
    }
}

/// Producer half of a resize subscription.
///
/// The embedding layer observes container dimension changes (whatever
/// the windowing or DOM mechanism) and pushes the new width here.
#[derive(Clone, Debug)]
pub struct ResizeHandle {
    tx: Sender<f64>,
}

impl ResizeHandle {
    /// Report a new observed container width.
    ///
    /// Never blocks; if the consumer is gone the report is dropped.
    pub fn notify(&self, width: f64) {
        let _ = self.tx.send(width);
    }
}

/// Consumer half of a resize subscription.
///
/// Buffers width reports between render passes. Consumers call
/// [`latest`](ResizeFeed::latest) to coalesce any number of pending
/// reports into the most recent one — intermediate widths are obsolete
/// by the time anyone can render them.
#[derive(Debug)]
pub struct ResizeFeed {
    rx: Receiver<f64>,
}

impl ResizeFeed {
    /// Create a connected handle/feed pair.
    pub fn channel() -> (ResizeHandle, ResizeFeed) {
        let (tx, rx) = unbounded();
        (ResizeHandle { tx }, ResizeFeed { rx })
    }

    /// Drain all pending reports, returning the most recent width.
    pub fn latest(&self) -> Option<f64> {
        self.rx.try_iter().last()
    }
}
