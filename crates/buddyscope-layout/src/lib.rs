//! Tree layout engine for the Buddyscope allocator visualizer.
//!
//! This crate defines the [`LayoutStrategy`] trait — the abstraction
//! through which snapshots become renderable geometry — along with the
//! two concrete strategies and the viewport plumbing.
//!
//! # Strategies
//!
//! - [`BinaryDiagram`]: classic binary-tree diagram; leaves at equal
//!   depth are evenly spaced regardless of block size, with
//!   parent-to-child edges for drawing connectors.
//! - [`LevelBands`]: breadth-first level bands where each block's
//!   horizontal extent is proportional to its share of total memory —
//!   the fragmentation view.
//!
//! # Plan / scale split
//!
//! Layouts are computed in two passes. [`LayoutStrategy::plan`] runs
//! the topology-dependent pass once per snapshot;
//! [`LayoutPlan::scale`] converts the plan to pixel geometry for a
//! [`Viewport`] and is cheap enough to re-run on every width change.
//! Resize therefore never recomputes the relative layout — see
//! [`TreeView`] for the subscription wiring.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binary;
pub mod error;
pub mod level;
pub mod scene;
pub mod strategy;
pub mod view;
pub mod viewport;

pub use binary::{BinaryDiagram, BinaryPlan, RelativeNode};
pub use error::ViewportError;
pub use level::{BandNode, LevelBands, LevelPlan};
pub use scene::{Edge, PositionedNode, Scene};
pub use strategy::{LayoutPlan, LayoutStrategy};
pub use view::TreeView;
pub use viewport::{ResizeFeed, ResizeHandle, Viewport};
