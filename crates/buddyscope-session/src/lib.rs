//! Session orchestration for the Buddyscope visualizer.
//!
//! A [`Session`] owns everything the user sees: the current snapshot of
//! the allocator's block tree and the audit history of confirmed
//! mutations. Every mutating action runs the same four-step machine —
//! validate, invoke, confirm, commit — and nothing becomes visible
//! unless the remote allocator confirmed it.
//!
//! Mutations are serialized through an [`ActionQueue`] so two in-flight
//! round trips can never interleave their commits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod metrics;
pub mod notice;
pub mod queue;
pub mod session;

pub use error::ActionError;
pub use metrics::SessionMetrics;
pub use notice::{Notice, Severity};
pub use queue::{ActionQueue, QueueReceipt, QueueRejection, SessionCommand};
pub use session::{ActionReceipt, Session};
