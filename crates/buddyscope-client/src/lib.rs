//! Typed HTTP client for the remote buddy-allocator service.
//!
//! The allocator's split/merge/fit algorithm lives server-side; this
//! crate speaks its four-operation HTTP/JSON contract and translates
//! transport and validation failures into the uniform
//! [`ClientError`] taxonomy the session orchestrator dispatches on.
//!
//! The operations are expressed through the [`AllocatorApi`] trait so
//! orchestration code can be driven by a scripted mock; the production
//! implementation is [`HttpAllocator`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod wire;

pub use api::{AllocatorApi, MutationAck, STATUS_ALLOCATED, STATUS_DEALLOCATED};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use http::HttpAllocator;
