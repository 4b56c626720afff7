//! The validate → invoke → confirm → commit state machine.

use crate::error::ActionError;
use crate::metrics::SessionMetrics;
use crate::notice::{Notice, Severity};
use crate::queue::SessionCommand;
use buddyscope_client::{
    AllocatorApi, ClientError, MutationAck, STATUS_ALLOCATED, STATUS_DEALLOCATED,
};
use buddyscope_core::{
    check_process_request, check_remove_request, check_total, BlockNode, HistoryEntry, HistoryLog,
    SizeUnit, ValidationError,
};

/// Outcome of one session action.
///
/// Always carries the [`Notice`] to show the user; `reason` preserves
/// the distinguishable failure for callers that dispatch on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReceipt {
    /// Whether the action committed.
    pub accepted: bool,
    /// The transient notification for the user.
    pub notice: Notice,
    /// The failure, when not accepted.
    pub reason: Option<ActionError>,
}

impl ActionReceipt {
    fn ok(notice: Notice) -> Self {
        Self {
            accepted: true,
            notice,
            reason: None,
        }
    }

    fn fail(notice: Notice, reason: ActionError) -> Self {
        Self {
            accepted: false,
            notice,
            reason: Some(reason),
        }
    }
}

/// Client-side owner of all displayed allocator state.
///
/// The session holds the only mutable references to the snapshot slot
/// and the history log; the layout engine and audit view consume them
/// read-only. Every fetch replaces the snapshot wholesale, so
/// consumers always see a complete, consistent tree.
///
/// # Invariant
///
/// History and the displayed tree derive exclusively from confirmed
/// remote successes. A locally rejected or remotely failed attempt is
/// fully invisible in both.
pub struct Session {
    api: Box<dyn AllocatorApi>,
    snapshot: Option<BlockNode>,
    history: HistoryLog,
    total: Option<(u64, SizeUnit)>,
    metrics: SessionMetrics,
}

impl Session {
    /// A session with no allocator state yet.
    pub fn new(api: Box<dyn AllocatorApi>) -> Self {
        Self {
            api,
            snapshot: None,
            history: HistoryLog::new(),
            total: None,
            metrics: SessionMetrics::default(),
        }
    }

    /// The current snapshot, if allocator state is known.
    pub fn snapshot(&self) -> Option<&BlockNode> {
        self.snapshot.as_ref()
    }

    /// The audit history, newest first.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The last successfully initialized total, as entered.
    pub fn total(&self) -> Option<(u64, SizeUnit)> {
        self.total
    }

    /// Cumulative outcome counters.
    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// (Re)initialize the allocator.
    ///
    /// On confirmation the history is cleared — the audit trail belongs
    /// to the allocator lifetime that just ended — and the fresh tree
    /// is fetched.
    pub async fn init(&mut self, total_size: u64, unit: SizeUnit) -> ActionReceipt {
        if let Err(err) = check_total(total_size, unit) {
            return self.reject(err);
        }
        if let Err(err) = self.api.init(total_size, unit).await {
            return self.remote_failure(err, "could not initialize memory");
        }
        self.history.clear();
        self.total = Some((total_size, unit));
        match self.api.fetch_tree().await {
            Ok(tree) => {
                self.snapshot = Some(tree);
                self.metrics.confirmed_commits += 1;
                ActionReceipt::ok(Notice::success("memory initialized"))
            }
            Err(err) => self.refetch_failure(err),
        }
    }

    /// Request an allocation.
    ///
    /// Before the first successful init the capacity check is skipped —
    /// there is no confirmed total to compare against — and the service
    /// rejects the request with its own reason.
    pub async fn add(&mut self, id: &str, size: u64, unit: SizeUnit) -> ActionReceipt {
        let validation = match self.total {
            Some((total, total_unit)) => check_process_request(id, size, unit, total, total_unit),
            None => {
                if id.is_empty() {
                    Err(ValidationError::EmptyProcessId)
                } else if size < 1 {
                    Err(ValidationError::ProcessSizeTooSmall)
                } else {
                    Ok(())
                }
            }
        };
        if let Err(err) = validation {
            return self.reject(err);
        }
        let ack = match self.api.add_process(id, size, unit).await {
            Ok(ack) => ack,
            Err(err) => return self.remote_failure(err, "could not add the process"),
        };
        if !ack.confirms(STATUS_ALLOCATED) {
            return self.unconfirmed(ack, "could not add the process");
        }
        self.commit(HistoryEntry::added(id, size, unit), "process added")
            .await
    }

    /// Request a deallocation.
    pub async fn remove(&mut self, id: &str) -> ActionReceipt {
        if let Err(err) = check_remove_request(id) {
            return self.reject(err);
        }
        let ack = match self.api.remove_process(id).await {
            Ok(ack) => ack,
            Err(err) => return self.remote_failure(err, "could not remove the process"),
        };
        if !ack.confirms(STATUS_DEALLOCATED) {
            return self.unconfirmed(ack, "could not remove the process");
        }
        self.commit(HistoryEntry::removed(id), "process removed")
            .await
    }

    /// Refetch the snapshot without mutating anything server-side.
    ///
    /// On failure the snapshot slot is cleared: allocator state is
    /// unknown, and unknown must never be displayed as stale.
    pub async fn refresh(&mut self) -> ActionReceipt {
        match self.api.fetch_tree().await {
            Ok(tree) => {
                self.snapshot = Some(tree);
                ActionReceipt::ok(Notice::success("memory tree refreshed"))
            }
            Err(err) => {
                self.snapshot = None;
                self.remote_failure(err, "could not refresh the memory tree")
            }
        }
    }

    /// Run a queued command.
    pub async fn dispatch(&mut self, command: SessionCommand) -> ActionReceipt {
        match command {
            SessionCommand::Init { total_size, unit } => self.init(total_size, unit).await,
            SessionCommand::Add { id, size, unit } => self.add(&id, size, unit).await,
            SessionCommand::Remove { id } => self.remove(&id).await,
        }
    }

    /// Commit a confirmed mutation: refetch, then record history.
    ///
    /// The history entry is recorded even when the refetch fails — the
    /// remote mutation *was* confirmed — but the display cache is
    /// cleared so the user never sees a tree that predates it.
    async fn commit(&mut self, entry: HistoryEntry, success: &str) -> ActionReceipt {
        match self.api.fetch_tree().await {
            Ok(tree) => {
                self.snapshot = Some(tree);
                self.history.record(entry);
                self.metrics.confirmed_commits += 1;
                ActionReceipt::ok(Notice::success(success))
            }
            Err(err) => {
                self.history.record(entry);
                self.refetch_failure(err)
            }
        }
    }

    fn reject(&mut self, err: ValidationError) -> ActionReceipt {
        self.metrics.validation_rejections += 1;
        // Missing fields are correctable slips; the rest are real errors.
        let severity = match err {
            ValidationError::EmptyProcessId | ValidationError::ProcessSizeTooSmall => {
                Severity::Warning
            }
            _ => Severity::Error,
        };
        ActionReceipt::fail(
            Notice {
                severity,
                message: err.to_string(),
            },
            ActionError::Validation(err),
        )
    }

    fn remote_failure(&mut self, err: ClientError, fallback: &str) -> ActionReceipt {
        self.metrics.note_client_error(&err);
        let message = match &err {
            ClientError::Rejected { detail } => detail.clone(),
            _ => fallback.to_owned(),
        };
        ActionReceipt::fail(Notice::error(message), ActionError::Client(err))
    }

    fn unconfirmed(&mut self, ack: MutationAck, fallback: &str) -> ActionReceipt {
        self.metrics.service_rejections += 1;
        let message = ack.detail.clone().unwrap_or_else(|| fallback.to_owned());
        ActionReceipt::fail(
            Notice::error(message),
            ActionError::UnexpectedStatus { status: ack.status },
        )
    }

    fn refetch_failure(&mut self, err: ClientError) -> ActionReceipt {
        self.snapshot = None;
        self.metrics.refetch_failures += 1;
        ActionReceipt::fail(
            Notice::error("memory state is unknown; refresh and retry"),
            ActionError::RefetchFailed(err),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddyscope_test_utils::{allocated, deallocated, fixtures, ScriptedAllocator};

    fn session(api: ScriptedAllocator) -> Session {
        Session::new(Box::new(api))
    }

    #[tokio::test]
    async fn validation_rejection_never_reaches_the_service() {
        let api = ScriptedAllocator::new();
        let mut s = session(api);
        let receipt = s.init(10, SizeUnit::Mb).await;
        assert!(!receipt.accepted);
        assert!(matches!(
            receipt.reason,
            Some(ActionError::Validation(ValidationError::TotalNotPowerOfTwo { value: 10 }))
        ));
        assert_eq!(s.metrics().validation_rejections, 1);
    }

    #[tokio::test]
    async fn confirmed_init_clears_history_and_fetches() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        let mut s = session(api);
        let receipt = s.init(8, SizeUnit::Mb).await;
        assert!(receipt.accepted);
        assert_eq!(receipt.notice.severity, Severity::Success);
        assert!(s.history().is_empty());
        assert_eq!(s.snapshot().unwrap().size_kb(), 8192);
        assert_eq!(s.total(), Some((8, SizeUnit::Mb)));
    }

    #[tokio::test]
    async fn rejected_add_changes_nothing() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        api.push_add(Err(ClientError::Rejected {
            detail: "a process with that name already exists".to_owned(),
        }));
        let mut s = session(api);
        s.init(8, SizeUnit::Mb).await;
        let before = s.snapshot().cloned();

        let receipt = s.add("P1", 3, SizeUnit::Mb).await;
        assert!(!receipt.accepted);
        // Most specific message available: the service's own detail.
        assert_eq!(
            receipt.notice.message,
            "a process with that name already exists"
        );
        assert_eq!(s.history().len(), 0);
        assert_eq!(s.snapshot().cloned(), before);
        assert_eq!(s.metrics().service_rejections, 1);
    }

    #[tokio::test]
    async fn unexpected_status_is_treated_as_failure() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        api.push_add(Ok(buddyscope_test_utils::ack("pending")));
        let mut s = session(api);
        s.init(8, SizeUnit::Mb).await;

        let receipt = s.add("P1", 3, SizeUnit::Mb).await;
        assert!(!receipt.accepted);
        assert!(matches!(
            receipt.reason,
            Some(ActionError::UnexpectedStatus { .. })
        ));
        assert!(s.history().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_uses_the_generic_message() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        api.push_add(Err(ClientError::Transport {
            reason: "connection refused".to_owned(),
        }));
        let mut s = session(api);
        s.init(8, SizeUnit::Mb).await;

        let receipt = s.add("P1", 3, SizeUnit::Mb).await;
        assert_eq!(receipt.notice.message, "could not add the process");
        assert_eq!(s.metrics().transport_failures, 1);
    }

    #[tokio::test]
    async fn confirmed_add_commits_history_and_tree() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        api.push_add(Ok(allocated()));
        api.push_tree(Ok(fixtures::fragmented_1mb()));
        let mut s = session(api);
        s.init(8, SizeUnit::Mb).await;

        let receipt = s.add("P1", 3, SizeUnit::Mb).await;
        assert!(receipt.accepted);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history().entries()[0].to_string(), "Added P1 (3 MB)");
        assert_eq!(s.snapshot().unwrap().leaf_count(), 3);
        assert_eq!(s.metrics().confirmed_commits, 2);
    }

    #[tokio::test]
    async fn confirmed_remove_records_without_size() {
        let api = ScriptedAllocator::new();
        api.push_remove(Ok(deallocated()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        let mut s = session(api);

        let receipt = s.remove("P1").await;
        assert!(receipt.accepted);
        assert_eq!(s.history().entries()[0].to_string(), "Removed P1");
    }

    #[tokio::test]
    async fn empty_remove_id_warns_locally() {
        let api = ScriptedAllocator::new();
        let mut s = session(api);
        let receipt = s.remove("").await;
        assert!(!receipt.accepted);
        assert_eq!(receipt.notice.severity, Severity::Warning);
    }

    #[tokio::test]
    async fn capacity_excess_rejects_before_any_remote_call() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        let mut s = session(api);
        s.init(8, SizeUnit::Mb).await;

        let receipt = s.add("P2", 10, SizeUnit::Mb).await;
        assert!(!receipt.accepted);
        assert!(matches!(
            receipt.reason,
            Some(ActionError::Validation(ValidationError::ExceedsTotal { .. }))
        ));
    }

    #[tokio::test]
    async fn refetch_failure_clears_the_display_but_keeps_history() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        api.push_add(Ok(allocated()));
        api.push_tree(Err(ClientError::Transport {
            reason: "connection reset".to_owned(),
        }));
        let mut s = session(api);
        s.init(8, SizeUnit::Mb).await;

        let receipt = s.add("P1", 3, SizeUnit::Mb).await;
        assert!(!receipt.accepted);
        assert!(matches!(
            receipt.reason,
            Some(ActionError::RefetchFailed(_))
        ));
        // The mutation was confirmed server-side: the audit trail keeps it.
        assert_eq!(s.history().len(), 1);
        // But unknown state is never displayed as stale.
        assert!(s.snapshot().is_none());
        assert_eq!(s.metrics().refetch_failures, 1);
    }

    #[tokio::test]
    async fn failed_refresh_clears_the_snapshot() {
        let api = ScriptedAllocator::new();
        api.push_init(Ok(()));
        api.push_tree(Ok(fixtures::fresh(8192)));
        api.push_tree(Err(ClientError::Transport {
            reason: "timeout".to_owned(),
        }));
        let mut s = session(api);
        s.init(8, SizeUnit::Mb).await;
        assert!(s.snapshot().is_some());

        let receipt = s.refresh().await;
        assert!(!receipt.accepted);
        assert!(s.snapshot().is_none());
    }
}
