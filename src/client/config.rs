//! Client configuration.

use crate::protocol::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RETRIES};
use serde::{Deserialize, Serialize};

/// Configuration for [`TusClient`](crate::TusClient) and
/// [`ReqwestTransport`](crate::client::ReqwestTransport).
///
/// # Examples
///
/// ```
/// use tus_client::client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_chunk_size(4 * 1024 * 1024)
///     .with_max_retries(3);
/// assert_eq!(config.chunk_size, 4 * 1024 * 1024);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Attempts per creation or chunk request (transport failures only)
    pub max_retries: u32,
    /// Base delay for exponential backoff between attempts; 0 retries immediately
    pub retry_delay_ms: u64,
    /// Maximum bytes sent in one PATCH request
    pub chunk_size: usize,
    /// Per-request timeout applied by the transport
    pub request_timeout_ms: u64,
    /// Maximum idle connections kept per host
    pub max_total_connections: u32,
    /// Proxy URL for all requests; empty disables the proxy
    pub proxy_url: String,
    /// Log retried attempts
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout_ms: 300_000,
            max_total_connections: 4,
            proxy_url: String::new(),
            enable_logging: true,
        }
    }
}

impl ClientConfig {
    /// Set the maximum chunk size (clamped to at least one byte)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the number of attempts per request (clamped to at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the backoff base delay
    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout_ms(mut self, request_timeout_ms: u64) -> Self {
        self.request_timeout_ms = request_timeout_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.chunk_size, 100 * 1024 * 1024);
        assert_eq!(config.retry_delay_ms, 0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"chunk_size": 1024, "enable_logging": false}"#).unwrap();
        assert_eq!(config.chunk_size, 1024);
        assert!(!config.enable_logging);
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_builders_clamp() {
        let config = ClientConfig::default().with_chunk_size(0).with_max_retries(0);
        assert_eq!(config.chunk_size, 1);
        assert_eq!(config.max_retries, 1);
    }
}
