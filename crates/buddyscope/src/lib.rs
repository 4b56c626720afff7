//! Buddyscope: a client core for visualizing and driving a remote
//! buddy-allocator service.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Buddyscope sub-crates. For most users, adding `buddyscope`
//! as a single dependency is sufficient.
//!
//! The allocator itself — its split/merge/fit algorithm — lives in an
//! external service reachable over HTTP. Buddyscope validates what it
//! sends, renders what it is told, and never lets the displayed tree
//! diverge from confirmed allocator state.
//!
//! # Quick start
//!
//! ```no_run
//! use buddyscope::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect to the allocator service.
//! let api = HttpAllocator::new(ClientConfig::default())?;
//! let mut session = Session::new(Box::new(api));
//!
//! // Initialize 8 MB and allocate a process.
//! let receipt = session.init(8, SizeUnit::Mb).await;
//! assert!(receipt.accepted);
//! session.add("P1", 3, SizeUnit::Mb).await;
//!
//! // Lay the confirmed snapshot out as a binary-tree diagram.
//! let (resize, feed) = ResizeFeed::channel();
//! let viewport = Viewport::new(600.0)?;
//! let mut view = TreeView::new(Box::new(BinaryDiagram), viewport, feed);
//! if let Some(tree) = session.snapshot() {
//!     view.set_tree(tree);
//! }
//!
//! // A container resize re-scales without re-planning.
//! resize.notify(480.0);
//! view.pump_resize()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `buddyscope-core` | Block tree, node paths, units, validation, history |
//! | [`layout`] | `buddyscope-layout` | Layout strategies, viewport, scenes |
//! | [`client`] | `buddyscope-client` | HTTP client, wire types, failure taxonomy |
//! | [`session`] | `buddyscope-session` | Orchestration, action queue, notices, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Block tree, node paths, units, validation, and history
/// (`buddyscope-core`).
pub use buddyscope_core as types;

/// Layout strategies, viewport plumbing, and positioned scenes
/// (`buddyscope-layout`).
pub use buddyscope_layout as layout;

/// HTTP client for the allocator service (`buddyscope-client`).
pub use buddyscope_client as client;

/// Session orchestration and the audit history
/// (`buddyscope-session`).
pub use buddyscope_session as session;

pub mod prelude {
    //! The most commonly used Buddyscope types in one import.

    pub use buddyscope_client::{AllocatorApi, ClientConfig, ClientError, HttpAllocator};
    pub use buddyscope_core::{
        BlockNode, HistoryEntry, HistoryLog, NodePath, Side, SizeUnit,
    };
    pub use buddyscope_layout::{
        BinaryDiagram, LayoutPlan, LayoutStrategy, LevelBands, ResizeFeed, Scene, TreeView,
        Viewport,
    };
    pub use buddyscope_session::{ActionQueue, ActionReceipt, Session, SessionCommand};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use buddyscope_test_utils::{allocated, fixtures, ScriptedAllocator};

    #[tokio::test]
    async fn snapshot_flows_from_session_to_layout() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        api.push_add(Ok(allocated()));
        api.push_tree(Ok(fixtures::fragmented_1mb()));
        let mut session = Session::new(Box::new(api));
        session.init(8, SizeUnit::Mb).await;
        session.add("P1", 256, SizeUnit::Kb).await;

        let (_resize, feed) = ResizeFeed::channel();
        let viewport = Viewport::new(600.0).unwrap();
        let mut view = TreeView::new(Box::new(LevelBands), viewport, feed);
        view.set_tree(session.snapshot().unwrap());
        assert_eq!(view.scene().len(), 5);
        let occupied: Vec<_> = view
            .scene()
            .nodes
            .values()
            .filter(|n| !n.is_free())
            .collect();
        assert_eq!(occupied.len(), 2);
    }
}
