//! tus HTTP client implementation.
//!
//! This module provides the upload client and its collaborators, enabling
//! clients to:
//!
//! - **Negotiate capabilities** once per session via OPTIONS
//! - **Create upload resources** with the `creation` extension
//! - **Resolve offsets** of existing resources via HEAD
//! - **Transfer data in chunks** via PATCH, verifying every acknowledged offset
//! - **Retry transport failures** with a bounded number of attempts
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── session   - TusClient and the upload sequence
//! ├── transport - Transport trait and the reqwest implementation
//! ├── source    - ByteSource trait, file and memory sources
//! ├── retry     - Bounded retry with exponential backoff
//! └── config    - Client configuration
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TusClient`] | Upload session with one tus endpoint |
//! | [`Transport`] | Single request/response exchange |
//! | [`ReqwestTransport`] | `reqwest`-backed transport |
//! | [`ByteSource`] | Sequential chunk reader |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```ignore
//! use tus_client::client::{ClientConfig, TusClient};
//!
//! // Default configuration
//! let client = TusClient::new("http://localhost:1080/files/").await?;
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     chunk_size: 8 * 1024 * 1024,
//!     retry_delay_ms: 500,
//!     ..Default::default()
//! };
//! let client = TusClient::with_config("http://localhost:1080/files/", config).await?;
//! ```
//!
//! ## Uploading from memory
//!
//! ```ignore
//! use tus_client::client::MemorySource;
//!
//! let upload = client.upload(MemorySource::new("notes.txt", "hello")).await?;
//! assert_eq!(upload.length, 5);
//! ```

mod config;
mod retry;
mod session;
mod source;
mod transport;

pub use config::ClientConfig;
pub use retry::{attempt, exponential_backoff, RetryPolicy};
pub use session::TusClient;
pub use source::{ByteSource, FileSource, MemorySource};
pub use transport::{ReqwestTransport, Transport};
