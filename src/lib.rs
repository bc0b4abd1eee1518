#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # tus_client: resumable uploads over HTTP
//!
//! This crate implements the client side of the [tus resumable upload protocol]
//! v1.0.0 with the `creation` extension. Data is sent to the server in
//! bounded-size chunks, transport failures are retried a bounded number of
//! times, and every offset the server acknowledges is checked against the
//! client's own byte accounting.
//!
//! ## Overview
//!
//! An upload goes through four exchanges:
//!
//! 1. **Capability discovery** - `OPTIONS` the endpoint once per session
//! 2. **Creation** - `POST` the endpoint with the declared length and metadata
//! 3. **Offset resolution** - `HEAD` the new resource
//! 4. **Transfer** - `PATCH` each chunk in sequence until the source is exhausted
//!
//! ## Status Codes
//!
//! - `201 Created` - Resource created (creation)
//! - `204 No Content` - Chunk accepted (transfer)
//!
//! Any other status on creation or transfer fails the upload immediately.
//!
//! ## Client Usage
//!
//! ```ignore
//! use tus_client::TusClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TusClient::new("http://localhost:1080/files/").await?;
//!     println!("Extensions: {:?}", client.capabilities().extensions);
//!
//!     let upload = client.upload_file("video.mp4").await?;
//!     println!("Uploaded {} bytes to {}", upload.length, upload.location);
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Transports
//!
//! ```ignore
//! use async_trait::async_trait;
//! use tus_client::{Result, Transport, TusRequest, TusResponse};
//!
//! struct LoggingTransport<T>(T);
//!
//! #[async_trait]
//! impl<T: Transport> Transport for LoggingTransport<T> {
//!     async fn send(&self, request: TusRequest) -> Result<TusResponse> {
//!         println!("{} {}", request.method, request.path);
//!         self.0.send(request).await
//!     }
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Request, response, capability, and offset types
//! - **[error]** - Error types and result handling
//! - **[client]** - Upload client, transport, byte sources, retry
//! - **[protocol]** - Protocol constants and header parsing
//!
//! [tus resumable upload protocol]: https://tus.io/protocols/resumable-upload

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{ByteSource, ClientConfig, FileSource, MemorySource, ReqwestTransport, Transport, TusClient};
pub use error::{Result, TusError};
pub use types::{Capabilities, TusRequest, TusResponse, Upload, UploadOffset};
