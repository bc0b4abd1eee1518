//! The tus upload client.
//!
//! A [`TusClient`] is a session with one tus endpoint. Construction negotiates
//! capabilities once; every upload then runs:
//!
//! 1. **Create** - `POST` to the endpoint, obtaining the resource locator
//! 2. **Resolve** - `HEAD` the locator for its (offset, length)
//! 3. **Transfer** - `PATCH` each chunk in order, verifying the offset the
//!    server acknowledges
//! 4. **Finalize** - close the byte source
//!
//! # Examples
//!
//! ```ignore
//! use tus_client::TusClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TusClient::new("http://localhost:1080/files/").await?;
//!     let upload = client.upload_file("./world_domination_plan.pdf").await?;
//!     println!("Uploaded {} bytes to {}", upload.length, upload.location);
//!     Ok(())
//! }
//! ```
//!
//! ## Resuming a resource by hand
//!
//! The client never resumes on its own, but the building blocks are public:
//!
//! ```ignore
//! let progress = client.resolve_offset(&location).await?;
//! // Skip `progress.offset` bytes of the source, then:
//! client.transfer(&location, progress.offset, progress.length, &mut source).await?;
//! ```

use crate::client::retry::{self, RetryPolicy};
use crate::client::{ByteSource, ClientConfig, FileSource, ReqwestTransport, Transport};
use crate::error::{Result, TusError};
use crate::protocol::{
    self,
    constants::{extensions, headers, status, OFFSET_OCTET_STREAM},
};
use crate::types::{Capabilities, TusRequest, TusResponse, Upload, UploadOffset};
use bytes::Bytes;
use http::Method;
use std::path::Path;
use url::Url;

/// A session with a tus server.
///
/// Holds the endpoint, the transport, and the capabilities negotiated at
/// construction. Operations take `&self` but are not meant to run
/// concurrently on one session; callers serialize uploads.
pub struct TusClient<T: Transport = ReqwestTransport> {
    endpoint: Url,
    transport: Option<T>,
    capabilities: Capabilities,
    config: ClientConfig,
}

impl TusClient<ReqwestTransport> {
    /// Connect to a tus endpoint with default configuration
    pub async fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, ClientConfig::default()).await
    }

    /// Connect to a tus endpoint with custom configuration
    pub async fn with_config(endpoint: &str, config: ClientConfig) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let transport = ReqwestTransport::new(&endpoint, &config)?;
        Self::connect(endpoint, transport, config).await
    }
}

impl<T: Transport> TusClient<T> {
    /// Create a session over an existing transport and negotiate capabilities.
    ///
    /// Negotiation is not retried; a transport failure here is returned as is.
    pub async fn connect(endpoint: Url, transport: T, config: ClientConfig) -> Result<Self> {
        let mut client = TusClient {
            endpoint,
            transport: Some(transport),
            capabilities: Capabilities::default(),
            config,
        };
        client.capabilities = client.negotiate().await?;
        tracing::debug!(
            endpoint = %client.endpoint,
            extensions = ?client.capabilities.extensions,
            "negotiated capabilities"
        );
        Ok(client)
    }

    /// Capabilities negotiated at construction
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The tus endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if the session still has a transport
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Release the transport. Later operations fail with
    /// [`TusError::SessionUninitialized`].
    pub fn close(&mut self) {
        self.transport = None;
    }

    fn transport(&self) -> Result<&T> {
        self.transport.as_ref().ok_or(TusError::SessionUninitialized)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_config(&self.config)
    }

    /// Ask the server which extensions it supports (`OPTIONS`).
    pub async fn negotiate(&self) -> Result<Capabilities> {
        let transport = self.transport()?;
        let response = transport
            .send(TusRequest::new(Method::OPTIONS, self.endpoint.path()))
            .await?;
        Ok(Capabilities::from_response(&response))
    }

    /// Register a new upload resource and return its locator path.
    ///
    /// # Errors
    ///
    /// - [`TusError::UnknownSize`] if `size` is `None`
    /// - [`TusError::UnsupportedOperation`] if the server lacks `creation`;
    ///   no request is sent
    /// - [`TusError::ResourceCreationFailed`] on any status other than 201
    /// - [`TusError::MalformedServerResponse`] if `Location` is missing
    /// - [`TusError::Transport`] if every attempt failed in transport
    pub async fn create(&self, file_name: &str, size: Option<u64>) -> Result<String> {
        let size = size.ok_or(TusError::UnknownSize)?;

        if !self.capabilities.supports(extensions::CREATION) {
            return Err(TusError::UnsupportedOperation(
                extensions::CREATION.to_string(),
            ));
        }

        if let Some(max) = self.capabilities.max_size {
            if size > max {
                tracing::warn!(size, max, "upload exceeds the server's advertised Tus-Max-Size");
            }
        }

        let transport = self.transport()?;
        let request = TusRequest::new(Method::POST, self.endpoint.path())
            .with_header(headers::CONTENT_LENGTH, 0)
            .with_header(headers::UPLOAD_LENGTH, size)
            .resumable()
            .with_header(
                headers::UPLOAD_METADATA,
                protocol::format_upload_metadata(file_name),
            );

        let response = retry::attempt(self.retry_policy(), |_| {
            transport.send(request.clone())
        })
        .await?;

        if response.status != status::CREATED {
            return Err(TusError::ResourceCreationFailed(response.status));
        }

        let location = response.require_header(&headers::LOCATION)?;
        let path = protocol::location_path(&self.endpoint, location)?;
        tracing::info!(file_name, size, location = %path, "created upload resource");
        Ok(path)
    }

    /// Query the server for the progress of a resource (`HEAD`).
    ///
    /// Not retried.
    pub async fn resolve_offset(&self, location: &str) -> Result<UploadOffset> {
        let transport = self.transport()?;
        let response = transport
            .send(TusRequest::new(Method::HEAD, location).resumable())
            .await?;

        let offset = response.require_u64(&headers::UPLOAD_OFFSET)?;
        let length = response.require_u64(&headers::UPLOAD_LENGTH)?;
        if offset > length {
            return Err(TusError::MalformedServerResponse(format!(
                "Upload-Offset {} exceeds Upload-Length {}",
                offset, length
            )));
        }

        tracing::debug!(location, offset, length, "resolved upload offset");
        Ok(UploadOffset { offset, length })
    }

    /// Send the rest of `source` to the resource, starting at `offset`.
    ///
    /// Returns the final offset, which equals `length`. Any failure is wrapped
    /// in [`TusError::BrokenUpload`]; see [`TusError::cause`].
    pub async fn transfer<S>(
        &self,
        location: &str,
        offset: u64,
        length: u64,
        source: &mut S,
    ) -> Result<u64>
    where
        S: ByteSource + ?Sized,
    {
        self.transfer_chunks(location, offset, length, source)
            .await
            .map_err(|e| TusError::BrokenUpload(Box::new(e)))
    }

    async fn transfer_chunks<S>(
        &self,
        location: &str,
        mut offset: u64,
        length: u64,
        source: &mut S,
    ) -> Result<u64>
    where
        S: ByteSource + ?Sized,
    {
        while let Some(chunk) = source.read_chunk(self.config.chunk_size).await? {
            offset = self.upload_chunk(location, offset, chunk).await?;
        }

        if offset != length {
            return Err(TusError::IncompleteUpload { offset, length });
        }
        Ok(offset)
    }

    /// Send one chunk at `offset` and return the verified new offset.
    async fn upload_chunk(&self, location: &str, offset: u64, chunk: Bytes) -> Result<u64> {
        let transport = self.transport()?;
        let expected = offset.checked_add(chunk.len() as u64).ok_or_else(|| {
            TusError::MalformedServerResponse(format!(
                "Chunk of {} bytes at offset {} overflows the upload length",
                chunk.len(),
                offset
            ))
        })?;
        tracing::debug!(location, offset, len = chunk.len(), "uploading chunk");

        let request = TusRequest::new(Method::PATCH, location)
            .with_header(headers::CONTENT_TYPE, OFFSET_OCTET_STREAM)
            .with_header(headers::UPLOAD_OFFSET, offset)
            .resumable()
            .with_body(chunk);

        let response: TusResponse = retry::attempt(self.retry_policy(), |_| {
            transport.send(request.clone())
        })
        .await?;

        if response.status != status::NO_CONTENT {
            return Err(TusError::ChunkUploadFailed {
                offset,
                status: response.status,
            });
        }

        let actual = response.require_u64(&headers::UPLOAD_OFFSET)?;
        if actual != expected {
            return Err(TusError::ChunkUploadBroken { expected, actual });
        }
        Ok(actual)
    }

    /// Upload a whole byte source to a new resource.
    ///
    /// The source is closed whether the upload succeeds or not. A failure
    /// leaves any created resource on the server.
    pub async fn upload<S>(&self, mut source: S) -> Result<Upload>
    where
        S: ByteSource,
    {
        let result = self.run_upload(&mut source).await;
        let closed = source.close().await;
        let upload = result?;
        closed?;
        tracing::info!(location = %upload.location, length = upload.length, "upload complete");
        Ok(upload)
    }

    async fn run_upload<S>(&self, source: &mut S) -> Result<Upload>
    where
        S: ByteSource,
    {
        let location = self.create(source.name(), source.len()).await?;
        let progress = self.resolve_offset(&location).await?;
        let length = self
            .transfer(&location, progress.offset, progress.length, source)
            .await?;
        Ok(Upload { location, length })
    }

    /// Upload the file at `path` to a new resource.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<Upload> {
        let source = FileSource::open(path).await?;
        self.upload(source).await
    }
}

impl<T: Transport> std::fmt::Debug for TusClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TusClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("open", &self.transport.is_some())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
