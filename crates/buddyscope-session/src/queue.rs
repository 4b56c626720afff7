//! Single-in-flight serialization of mutating actions.
//!
//! Nothing in the session prevents an embedder from dispatching a
//! second mutation while a first is still awaiting its round trip —
//! and two interleaved commits can record history in an order that
//! disagrees with the authoritative snapshot. [`ActionQueue`] closes
//! that race: commands enqueue, and [`begin`](ActionQueue::begin)
//! hands out at most one command until [`complete`](ActionQueue::complete)
//! resolves it.
//!
//! The queue is bounded; a submission at capacity is rejected with a
//! receipt rather than dropped silently.

use crate::session::{ActionReceipt, Session};
use buddyscope_core::SizeUnit;
use std::collections::VecDeque;
use std::fmt;

/// A deferred mutating action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// (Re)initialize the allocator.
    Init {
        /// Requested total size.
        total_size: u64,
        /// Unit of `total_size`.
        unit: SizeUnit,
    },
    /// Allocate a process.
    Add {
        /// Process identifier.
        id: String,
        /// Requested size.
        size: u64,
        /// Unit of `size`.
        unit: SizeUnit,
    },
    /// Deallocate a process.
    Remove {
        /// Process identifier.
        id: String,
    },
}

/// Why a submission was not enqueued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueRejection {
    /// The queue is at capacity.
    Full,
}

impl fmt::Display for QueueRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "action queue is full"),
        }
    }
}

/// Receipt for one submitted command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueReceipt {
    /// Whether the command was enqueued.
    pub accepted: bool,
    /// The reason it was not, if applicable.
    pub reason: Option<QueueRejection>,
}

/// Bounded FIFO of mutating actions with a single-in-flight guarantee.
pub struct ActionQueue {
    queue: VecDeque<SessionCommand>,
    capacity: usize,
    in_flight: bool,
    rejections: u64,
}

impl ActionQueue {
    /// Create a queue with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ActionQueue capacity must be at least 1");
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            in_flight: false,
            rejections: 0,
        }
    }

    /// Submit a command for later execution.
    pub fn submit(&mut self, command: SessionCommand) -> QueueReceipt {
        if self.queue.len() >= self.capacity {
            self.rejections += 1;
            return QueueReceipt {
                accepted: false,
                reason: Some(QueueRejection::Full),
            };
        }
        self.queue.push_back(command);
        QueueReceipt {
            accepted: true,
            reason: None,
        }
    }

    /// Take the next command, if none is currently in flight.
    ///
    /// The caller must resolve it with [`complete`](ActionQueue::complete)
    /// before another command is handed out.
    pub fn begin(&mut self) -> Option<SessionCommand> {
        if self.in_flight {
            return None;
        }
        let command = self.queue.pop_front()?;
        self.in_flight = true;
        Some(command)
    }

    /// Mark the in-flight command as resolved (committed or failed).
    pub fn complete(&mut self) {
        self.in_flight = false;
    }

    /// Execute every queued command against `session`, one at a time.
    ///
    /// Returns the receipts in execution order. Each command's commit
    /// or failure fully resolves before the next begins.
    pub async fn drain(&mut self, session: &mut Session) -> Vec<ActionReceipt> {
        let mut receipts = Vec::with_capacity(self.queue.len());
        while let Some(command) = self.begin() {
            let receipt = session.dispatch(command).await;
            self.complete();
            receipts.push(receipt);
        }
        receipts
    }

    /// Number of commands waiting (not counting one in flight).
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no commands are waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Maximum number of waiting commands.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a command is currently executing.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Cumulative number of submissions rejected at capacity.
    pub fn rejection_count(&self) -> u64 {
        self.rejections
    }
}
