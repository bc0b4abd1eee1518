//! HTTP transport used by the client.
//!
//! A [`Transport`] performs exactly one request/response exchange. It never
//! retries; retry policy lives in the client. Any failure before a response
//! arrives (connect, TLS, timeout, reading the body) is reported as
//! [`TusError::Transport`](crate::TusError::Transport).
//!
//! ```ignore
//! use tus_client::client::{ClientConfig, ReqwestTransport, Transport};
//! use tus_client::TusRequest;
//! use url::Url;
//!
//! let origin = Url::parse("http://localhost:1080/")?;
//! let transport = ReqwestTransport::new(&origin, &ClientConfig::default())?;
//! let response = transport.send(TusRequest::new(http::Method::OPTIONS, "/files/")).await?;
//! println!("Status: {}", response.status);
//! ```

use crate::client::ClientConfig;
use crate::error::{Result, TusError};
use crate::types::{TusRequest, TusResponse};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// A single request/response exchange with the server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the response, whatever its status.
    async fn send(&self, request: TusRequest) -> Result<TusResponse>;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    origin: Url,
}

impl ReqwestTransport {
    /// Create a transport for the server at `origin`.
    ///
    /// Request paths are resolved against `origin`, so only its scheme, host,
    /// and port matter.
    pub fn new(origin: &Url, config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_total_connections as usize);

        if !config.proxy_url.is_empty() {
            builder = builder.proxy(reqwest::Proxy::all(&config.proxy_url)?);
        }

        Ok(ReqwestTransport {
            client: builder.build()?,
            origin: origin.clone(),
        })
    }

    /// The server origin requests are sent to
    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TusRequest) -> Result<TusResponse> {
        let url = self.origin.join(&request.path)?;
        tracing::debug!(method = %request.method, %url, body_len = request.body.len(), "sending request");

        let mut req_builder = self.client.request(request.method, url);

        for (k, v) in &request.headers {
            req_builder = req_builder.header(k.as_str(), v.as_str());
        }

        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| TusError::Transport(e.to_string()))?;

        let status = response.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TusError::Transport(e.to_string()))?;

        tracing::debug!(status, "received response");

        Ok(TusResponse {
            status,
            headers,
            body,
        })
    }
}
