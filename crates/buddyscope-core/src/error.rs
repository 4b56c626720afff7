//! Validation error types.
//!
//! Pre-flight rejection reasons surfaced to the user before any remote
//! call is made. One variant per rejected invariant so the session can
//! notify with a specific message.

use std::error::Error;
use std::fmt;

/// Why a user request was rejected locally, before reaching the remote
/// allocator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The requested total memory size is not a power of two.
    TotalNotPowerOfTwo {
        /// The rejected magnitude, in the unit the user entered.
        value: u64,
    },
    /// The process identifier is empty.
    EmptyProcessId,
    /// The requested process size is below one unit.
    ProcessSizeTooSmall,
    /// The requested process size exceeds the configured total.
    ExceedsTotal {
        /// Requested size, normalized to KB.
        requested_kb: u64,
        /// Current total, normalized to KB.
        total_kb: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalNotPowerOfTwo { value } => {
                write!(f, "total memory size must be a power of two (got {value})")
            }
            Self::EmptyProcessId => write!(f, "process name must not be empty"),
            Self::ProcessSizeTooSmall => write!(f, "process size must be at least 1"),
            Self::ExceedsTotal {
                requested_kb,
                total_kb,
            } => write!(
                f,
                "process exceeds the total available memory ({requested_kb} KB > {total_kb} KB)"
            ),
        }
    }
}

impl Error for ValidationError {}
