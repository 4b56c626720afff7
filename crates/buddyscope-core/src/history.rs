//! The audit history of accepted operations.
//!
//! [`HistoryLog`] is an append-only, newest-first record of mutations
//! the remote allocator has *confirmed*. It is an audit trail of
//! accepted operations, not a command log of attempts: a failed or
//! rejected action never touches it. The log is cleared only on a
//! successful re-initialization.

use crate::units::SizeUnit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a confirmed mutation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryAction {
    /// A process was allocated.
    Added,
    /// A process was deallocated.
    Removed,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "Added"),
            Self::Removed => write!(f, "Removed"),
        }
    }
}

/// One confirmed mutation.
///
/// Removals carry no size: the user names only the process, and the
/// block size it freed is visible in the refreshed snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What happened.
    pub action: HistoryAction,
    /// The process identifier.
    pub name: String,
    /// Requested size, for additions.
    pub size: Option<u64>,
    /// Unit of `size`, for additions.
    pub unit: Option<SizeUnit>,
}

impl HistoryEntry {
    /// Entry for a confirmed allocation.
    pub fn added(name: impl Into<String>, size: u64, unit: SizeUnit) -> Self {
        Self {
            action: HistoryAction::Added,
            name: name.into(),
            size: Some(size),
            unit: Some(unit),
        }
    }

    /// Entry for a confirmed deallocation.
    pub fn removed(name: impl Into<String>) -> Self {
        Self {
            action: HistoryAction::Removed,
            name: name.into(),
            size: None,
            unit: None,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.name)?;
        if let (Some(size), Some(unit)) = (self.size, self.unit) {
            write!(f, " ({size} {unit})")?;
        }
        Ok(())
    }
}

/// Newest-first log of confirmed mutations.
///
/// # Examples
///
/// ```
/// use buddyscope_core::{HistoryLog, HistoryEntry, SizeUnit};
///
/// let mut log = HistoryLog::new();
/// log.record(HistoryEntry::added("P1", 3, SizeUnit::Mb));
/// log.record(HistoryEntry::removed("P1"));
/// assert_eq!(log.entries()[0].to_string(), "Removed P1");
/// assert_eq!(log.entries()[1].to_string(), "Added P1 (3 MB)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a confirmed mutation.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Drop every entry. Called only on successful re-initialization.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
