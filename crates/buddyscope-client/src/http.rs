//! HTTP implementation of the allocator operations.

use crate::api::{AllocatorApi, MutationAck};
use crate::config::{ClientConfig, ConfigError};
use crate::error::ClientError;
use crate::wire::{AddProcessRequest, ErrorBody, InitRequest, RemoveProcessRequest, StatusBody, WireNode};
use async_trait::async_trait;
use buddyscope_core::{BlockNode, SizeUnit};
use serde::Serialize;

/// HTTP client for the allocator service.
///
/// Holds a pooled [`reqwest::Client`] and the service base URL; cheap
/// to clone. All four operations translate failures into the
/// [`ClientError`] taxonomy — callers never see raw HTTP errors.
#[derive(Clone, Debug)]
pub struct HttpAllocator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAllocator {
    /// Build a client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The service base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Classify a non-2xx response: a parseable `{"detail"}` body is a
    /// service rejection, anything else is a transport failure.
    async fn rejection(response: reqwest::Response) -> ClientError {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => ClientError::Rejected {
                detail: body.detail,
            },
            Err(_) => ClientError::Transport {
                reason: format!("service returned {status} with no error detail"),
            },
        }
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(path, "allocator request");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Ok(response)
    }

    async fn mutate<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<MutationAck, ClientError> {
        let response = self.post(path, body).await?;
        if !response.status().is_success() {
            let err = Self::rejection(response).await;
            tracing::warn!(path, %err, "allocator request failed");
            return Err(err);
        }
        let body: StatusBody = response.json().await.map_err(|e| ClientError::Malformed {
            reason: format!("mutation response body: {e}"),
        })?;
        Ok(body.into())
    }
}

#[async_trait]
impl AllocatorApi for HttpAllocator {
    async fn init(&self, total_size: u64, unit: SizeUnit) -> Result<(), ClientError> {
        let response = self
            .post("/init", &InitRequest { total_size, unit })
            .await?;
        if !response.status().is_success() {
            let err = Self::rejection(response).await;
            tracing::warn!(%err, "init failed");
            return Err(err);
        }
        Ok(())
    }

    async fn add_process(
        &self,
        id: &str,
        size: u64,
        unit: SizeUnit,
    ) -> Result<MutationAck, ClientError> {
        self.mutate(
            "/add_process",
            &AddProcessRequest {
                process_id: id.to_owned(),
                process_size: size,
                unit,
            },
        )
        .await
    }

    async fn remove_process(&self, id: &str) -> Result<MutationAck, ClientError> {
        self.mutate(
            "/remove_process",
            &RemoveProcessRequest {
                process_id: id.to_owned(),
            },
        )
        .await
    }

    async fn fetch_tree(&self) -> Result<BlockNode, ClientError> {
        tracing::debug!("fetching allocator tree");
        let response = self.client.get(self.url("/tree")).send().await?;
        if !response.status().is_success() {
            let err = Self::rejection(response).await;
            tracing::warn!(%err, "tree fetch failed");
            return Err(err);
        }
        let wire: WireNode = response.json().await.map_err(|e| ClientError::Malformed {
            reason: format!("tree response body: {e}"),
        })?;
        wire.into_block()
    }
}
