//! The client-side failure taxonomy.
//!
//! Three distinguishable failure modes, all visible to the session
//! orchestrator but rendered to the user as a single transient
//! notification carrying the most specific message available.

use std::error::Error;
use std::fmt;

/// Why a remote allocator operation failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientError {
    /// Network failure, or a non-2xx response with no parseable error
    /// body. No usable response reached the client.
    Transport {
        /// Human-readable description of the transport failure.
        reason: String,
    },
    /// The service rejected the request with a well-formed error body
    /// (capacity exceeded, duplicate identifier, not initialized, ...).
    Rejected {
        /// The service-provided reason string.
        detail: String,
    },
    /// The response arrived but its body does not match the expected
    /// shape.
    Malformed {
        /// What was wrong with the body.
        reason: String,
    },
}

impl ClientError {
    /// The most specific message available for user notification.
    pub fn detail(&self) -> &str {
        match self {
            Self::Transport { reason } | Self::Malformed { reason } => reason,
            Self::Rejected { detail } => detail,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => write!(f, "transport failure: {reason}"),
            Self::Rejected { detail } => write!(f, "rejected by service: {detail}"),
            Self::Malformed { reason } => write!(f, "malformed response: {reason}"),
        }
    }
}

impl Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed {
                reason: err.to_string(),
            }
        } else {
            Self::Transport {
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_picks_the_specific_message() {
        let rejected = ClientError::Rejected {
            detail: "duplicate process name".to_owned(),
        };
        assert_eq!(rejected.detail(), "duplicate process name");
        let transport = ClientError::Transport {
            reason: "connection refused".to_owned(),
        };
        assert_eq!(transport.detail(), "connection refused");
    }

    #[test]
    fn display_names_the_failure_mode() {
        let err = ClientError::Malformed {
            reason: "missing status field".to_owned(),
        };
        assert_eq!(err.to_string(), "malformed response: missing status field");
    }
}
