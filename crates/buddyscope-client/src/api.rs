//! The allocator operation trait and mutation acknowledgments.

use crate::error::ClientError;
use async_trait::async_trait;
use buddyscope_core::{BlockNode, SizeUnit};

/// Status token the service returns for a confirmed allocation.
pub const STATUS_ALLOCATED: &str = "allocated";
/// Status token the service returns for a confirmed deallocation.
pub const STATUS_DEALLOCATED: &str = "deallocated";

/// A mutation response as reported by the service.
///
/// The client does not judge success: the orchestrator compares
/// `status` against the expected token and treats anything else as a
/// failure, exactly like a rejection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationAck {
    /// The service's status token.
    pub status: String,
    /// Optional explanation accompanying a non-success status.
    pub detail: Option<String>,
}

impl MutationAck {
    /// Whether the service confirmed the mutation with `token`.
    pub fn confirms(&self, token: &str) -> bool {
        self.status == token
    }
}

/// The four allocator operations.
///
/// Implemented by [`HttpAllocator`](crate::HttpAllocator) for the real
/// service and by scripted mocks in tests. Object safe so the session
/// can hold `Box<dyn AllocatorApi>`.
#[async_trait]
pub trait AllocatorApi: Send + Sync {
    /// (Re)initialize allocator state; any prior tree is discarded
    /// server-side.
    async fn init(&self, total_size: u64, unit: SizeUnit) -> Result<(), ClientError>;

    /// Request an allocation for `id`.
    async fn add_process(
        &self,
        id: &str,
        size: u64,
        unit: SizeUnit,
    ) -> Result<MutationAck, ClientError>;

    /// Request a deallocation of `id`.
    async fn remove_process(&self, id: &str) -> Result<MutationAck, ClientError>;

    /// Fetch the current full snapshot.
    async fn fetch_tree(&self) -> Result<BlockNode, ClientError>;
}

#[async_trait]
impl<T: AllocatorApi + ?Sized> AllocatorApi for std::sync::Arc<T> {
    async fn init(&self, total_size: u64, unit: SizeUnit) -> Result<(), ClientError> {
        (**self).init(total_size, unit).await
    }

    async fn add_process(
        &self,
        id: &str,
        size: u64,
        unit: SizeUnit,
    ) -> Result<MutationAck, ClientError> {
        (**self).add_process(id, size, unit).await
    }

    async fn remove_process(&self, id: &str) -> Result<MutationAck, ClientError> {
        (**self).remove_process(id).await
    }

    async fn fetch_tree(&self) -> Result<BlockNode, ClientError> {
        (**self).fetch_tree().await
    }
}
