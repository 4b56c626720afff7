//! Session-level counters.
//!
//! [`SessionMetrics`] accumulates outcome counts over the life of a
//! session for telemetry and debugging. The session updates them on
//! every action; consumers read them from the session.

use buddyscope_client::ClientError;

/// Cumulative outcome counters for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionMetrics {
    /// Requests rejected locally before any remote call.
    pub validation_rejections: u64,
    /// Remote calls that failed at the transport level.
    pub transport_failures: u64,
    /// Remote calls the service rejected with a reason.
    pub service_rejections: u64,
    /// Responses that did not match the expected shape.
    pub malformed_responses: u64,
    /// Mutations confirmed and committed.
    pub confirmed_commits: u64,
    /// Confirmed mutations whose commit refetch failed, clearing the
    /// display cache.
    pub refetch_failures: u64,
}

impl SessionMetrics {
    /// Count a failed remote call by failure mode.
    pub(crate) fn note_client_error(&mut self, err: &ClientError) {
        match err {
            ClientError::Transport { .. } => self.transport_failures += 1,
            ClientError::Rejected { .. } => self.service_rejections += 1,
            ClientError::Malformed { .. } => self.malformed_responses += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SessionMetrics::default();
        assert_eq!(m.validation_rejections, 0);
        assert_eq!(m.confirmed_commits, 0);
        assert_eq!(m.refetch_failures, 0);
    }

    #[test]
    fn client_errors_count_by_mode() {
        let mut m = SessionMetrics::default();
        m.note_client_error(&ClientError::Transport {
            reason: "x".into(),
        });
        m.note_client_error(&ClientError::Rejected { detail: "x".into() });
        m.note_client_error(&ClientError::Malformed { reason: "x".into() });
        assert_eq!(m.transport_failures, 1);
        assert_eq!(m.service_rejections, 1);
        assert_eq!(m.malformed_responses, 1);
    }
}
