//! Client configuration and its validation.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Connection settings for [`HttpAllocator`](crate::HttpAllocator).
///
/// # Examples
///
/// ```
/// use buddyscope_client::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.base_url, "http://127.0.0.1:8000");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the allocator service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// A config pointing at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Check structural invariants before a client is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Errors from client configuration or construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is empty.
    EmptyBaseUrl,
    /// The request timeout is zero.
    ZeroTimeout,
    /// The underlying HTTP client could not be built.
    HttpClient {
        /// Builder failure description.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBaseUrl => write!(f, "base URL must not be empty"),
            Self::ZeroTimeout => write!(f, "request timeout must be non-zero"),
            Self::HttpClient { reason } => write!(f, "failed to build HTTP client: {reason}"),
        }
    }
}

impl Error for ConfigError {}
