//! Core types for the Buddyscope allocator visualizer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the block-tree snapshot model, path-encoded node identities, size
//! units, input validation, and the audit history types used throughout
//! the Buddyscope workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod path;
pub mod tree;
pub mod units;
pub mod validate;

pub use error::ValidationError;
pub use history::{HistoryAction, HistoryEntry, HistoryLog};
pub use path::{NodePath, Side};
pub use tree::{BlockNode, LeafBlock};
pub use units::{format_size_kb, to_base_kb, SizeUnit, KB_PER_MB};
pub use validate::{
    check_process_request, check_remove_request, check_total, is_power_of_two,
    validate_process_request, validate_remove_request, validate_total,
};
