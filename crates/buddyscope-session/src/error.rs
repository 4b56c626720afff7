//! Action failure reasons.

use buddyscope_client::ClientError;
use buddyscope_core::ValidationError;
use std::error::Error;
use std::fmt;

/// Why a session action did not commit.
///
/// Every variant is caught at the session boundary and converted into
/// a [`Notice`](crate::Notice); none is fatal to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// Rejected locally; the remote service was never contacted.
    Validation(ValidationError),
    /// The remote call failed or the service rejected it.
    Client(ClientError),
    /// The service returned a well-formed response whose status did not
    /// match the expected success token.
    UnexpectedStatus {
        /// The status token the service returned.
        status: String,
    },
    /// The mutation was confirmed, but the commit refetch failed; the
    /// display cache has been cleared rather than shown stale.
    RefetchFailed(ClientError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "request rejected: {err}"),
            Self::Client(err) => write!(f, "{err}"),
            Self::UnexpectedStatus { status } => {
                write!(f, "service returned unexpected status {status:?}")
            }
            Self::RefetchFailed(err) => {
                write!(f, "mutation confirmed but tree refresh failed: {err}")
            }
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Client(err) | Self::RefetchFailed(err) => Some(err),
            Self::UnexpectedStatus { .. } => None,
        }
    }
}
