//! Test utilities and mock types for Buddyscope development.
//!
//! Provides a [`ScriptedAllocator`] implementing
//! [`AllocatorApi`](buddyscope_client::AllocatorApi) from canned
//! responses, plus tree [`fixtures`] shared across crate test suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use buddyscope_client::{AllocatorApi, ClientError, MutationAck};
use buddyscope_core::{BlockNode, SizeUnit};

/// One operation the mock observed, in the form the session sent it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallRecord {
    Init { total_size: u64, unit: SizeUnit },
    Add { id: String, size: u64, unit: SizeUnit },
    Remove { id: String },
    FetchTree,
}

/// A mutation acknowledgment with the given status and no detail.
pub fn ack(status: &str) -> MutationAck {
    MutationAck {
        status: status.to_owned(),
        detail: None,
    }
}

/// An `"allocated"` acknowledgment.
pub fn allocated() -> MutationAck {
    ack(buddyscope_client::STATUS_ALLOCATED)
}

/// A `"deallocated"` acknowledgment.
pub fn deallocated() -> MutationAck {
    ack(buddyscope_client::STATUS_DEALLOCATED)
}

/// Scripted implementation of [`AllocatorApi`].
///
/// Responses are queued per operation with the `push_*` methods and
/// consumed in order; an exhausted queue yields a transport error so a
/// mis-scripted test fails its assertions instead of panicking inside
/// the session. Every received call is recorded for inspection via
/// [`calls`](ScriptedAllocator::calls).
#[derive(Debug, Default)]
pub struct ScriptedAllocator {
    inits: Mutex<VecDeque<Result<(), ClientError>>>,
    adds: Mutex<VecDeque<Result<MutationAck, ClientError>>>,
    removes: Mutex<VecDeque<Result<MutationAck, ClientError>>>,
    trees: Mutex<VecDeque<Result<BlockNode, ClientError>>>,
    calls: Mutex<Vec<CallRecord>>,
}

impl ScriptedAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_init(&self, result: Result<(), ClientError>) {
        self.inits.lock().unwrap().push_back(result);
    }

    pub fn push_add(&self, result: Result<MutationAck, ClientError>) {
        self.adds.lock().unwrap().push_back(result);
    }

    pub fn push_remove(&self, result: Result<MutationAck, ClientError>) {
        self.removes.lock().unwrap().push_back(result);
    }

    pub fn push_tree(&self, result: Result<BlockNode, ClientError>) {
        self.trees.lock().unwrap().push_back(result);
    }

    /// Calls observed so far, in arrival order.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CallRecord) {
        self.calls.lock().unwrap().push(call);
    }

    fn exhausted(op: &str) -> ClientError {
        ClientError::Transport {
            reason: format!("scripted allocator has no response queued for {op}"),
        }
    }
}

#[async_trait]
impl AllocatorApi for ScriptedAllocator {
    async fn init(&self, total_size: u64, unit: SizeUnit) -> Result<(), ClientError> {
        self.record(CallRecord::Init { total_size, unit });
        self.inits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("init")))
    }

    async fn add_process(
        &self,
        id: &str,
        size: u64,
        unit: SizeUnit,
    ) -> Result<MutationAck, ClientError> {
        self.record(CallRecord::Add {
            id: id.to_owned(),
            size,
            unit,
        });
        self.adds
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("add_process")))
    }

    async fn remove_process(&self, id: &str) -> Result<MutationAck, ClientError> {
        self.record(CallRecord::Remove { id: id.to_owned() });
        self.removes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("remove_process")))
    }

    async fn fetch_tree(&self) -> Result<BlockNode, ClientError> {
        self.record(CallRecord::FetchTree);
        self.trees
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("tree")))
    }
}
