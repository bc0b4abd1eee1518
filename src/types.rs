//! Core tus protocol types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TusRequest`] | A single request handed to a [`Transport`](crate::Transport) |
//! | [`TusResponse`] | Status, lowercase headers, and body of a response |
//! | [`Capabilities`] | What the server advertised in reply to OPTIONS |
//! | [`UploadOffset`] | Server-side (offset, length) of a resource |
//! | [`Upload`] | A completed upload |

use crate::error::{Result, TusError};
use crate::protocol::{self, constants::headers};
use bytes::Bytes;
use http::{HeaderName, Method};
use std::collections::{BTreeMap, BTreeSet};

/// A request for a single exchange with the server.
///
/// `path` is relative to the server origin; the transport decides scheme,
/// host, and port.
#[derive(Clone, Debug)]
pub struct TusRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute path on the server, e.g. `/files/` or `/files/24e533e0`
    pub path: String,
    /// Request headers (lowercase names)
    pub headers: BTreeMap<String, String>,
    /// Request body (empty for OPTIONS, POST, and HEAD)
    pub body: Bytes,
}

impl TusRequest {
    /// Create a request with no headers and an empty body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        TusRequest {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: HeaderName, value: impl ToString) -> Self {
        self.headers.insert(name.as_str().to_string(), value.to_string());
        self
    }

    /// Add the `Tus-Resumable` header
    pub fn resumable(self) -> Self {
        self.with_header(headers::TUS_RESUMABLE, protocol::TUS_VERSION)
    }

    /// Set the body
    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Get a header value by name
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name.as_str()).map(String::as_str)
    }
}

/// A response received from the server.
#[derive(Clone, Debug, Default)]
pub struct TusResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, keys normalized to lowercase
    pub headers: BTreeMap<String, String>,
    /// Response body
    pub body: Bytes,
}

impl TusResponse {
    /// Create a response with the given status and no headers
    pub fn new(status: u16) -> Self {
        TusResponse {
            status,
            ..Default::default()
        }
    }

    /// Add a header (the name is lowercased)
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl ToString) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.to_string());
        self
    }

    /// Get a header value by name
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name.as_str()).map(String::as_str)
    }

    /// Get a header value, failing if it is absent
    pub fn require_header(&self, name: &HeaderName) -> Result<&str> {
        self.header(name).ok_or_else(|| {
            TusError::MalformedServerResponse(format!("Missing {} header", name))
        })
    }

    /// Get an integer header value, failing if it is absent or not an integer
    pub fn require_u64(&self, name: &HeaderName) -> Result<u64> {
        let value = self.require_header(name)?;
        protocol::parse_u64_header(name.as_str(), value)
    }
}

/// Server capabilities discovered via OPTIONS.
///
/// Cached by the client for its whole lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Supported extensions (`Tus-Extension`)
    pub extensions: BTreeSet<String>,
    /// Supported protocol versions (`Tus-Version`)
    pub versions: BTreeSet<String>,
    /// Maximum upload size (`Tus-Max-Size`)
    pub max_size: Option<u64>,
}

impl Capabilities {
    /// Build the capability set from an OPTIONS response.
    ///
    /// Absent headers yield empty sets. An unparseable `Tus-Max-Size` is
    /// ignored since it is advisory.
    pub fn from_response(response: &TusResponse) -> Self {
        Capabilities {
            extensions: response
                .header(&headers::TUS_EXTENSION)
                .map(protocol::parse_extension_list)
                .unwrap_or_default(),
            versions: response
                .header(&headers::TUS_VERSION)
                .map(protocol::parse_extension_list)
                .unwrap_or_default(),
            max_size: response
                .header(&headers::TUS_MAX_SIZE)
                .and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Check if an extension is supported
    pub fn supports(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}

/// Server-side progress of an upload resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadOffset {
    /// Bytes acknowledged by the server
    pub offset: u64,
    /// Total bytes declared at creation
    pub length: u64,
}

impl UploadOffset {
    /// Check if every byte has been acknowledged
    pub fn is_complete(&self) -> bool {
        self.offset == self.length
    }

    /// Bytes still to send
    pub fn remaining(&self) -> u64 {
        self.length.saturating_sub(self.offset)
    }
}

/// A finished upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    /// Path of the resource on the server
    pub location: String,
    /// Number of bytes uploaded
    pub length: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_from_response() {
        let response = TusResponse::new(204)
            .with_header("Tus-Extension", "creation,termination")
            .with_header("Tus-Version", "1.0.0,0.2.2")
            .with_header("Tus-Max-Size", "1073741824");
        let caps = Capabilities::from_response(&response);
        assert!(caps.supports("creation"));
        assert!(caps.versions.contains("1.0.0"));
        assert_eq!(caps.max_size, Some(1_073_741_824));
    }

    #[test]
    fn test_capabilities_absent_header_is_empty() {
        let caps = Capabilities::from_response(&TusResponse::new(200));
        assert!(caps.extensions.is_empty());
        assert!(!caps.supports("creation"));
        assert_eq!(caps.max_size, None);
    }

    #[test]
    fn test_require_u64() {
        let response = TusResponse::new(204).with_header("Upload-Offset", "100");
        assert_eq!(response.require_u64(&headers::UPLOAD_OFFSET).unwrap(), 100);
        assert!(matches!(
            response.require_u64(&headers::UPLOAD_LENGTH),
            Err(TusError::MalformedServerResponse(_))
        ));
    }

    #[test]
    fn test_remaining_saturates() {
        let progress = UploadOffset { offset: 20, length: 10 };
        assert_eq!(progress.remaining(), 0);
        assert_eq!(UploadOffset { offset: 4, length: 10 }.remaining(), 6);
    }

    #[test]
    fn test_request_builder() {
        let request = TusRequest::new(Method::HEAD, "/files/abc").resumable();
        assert_eq!(request.header(&headers::TUS_RESUMABLE), Some("1.0.0"));
        assert!(request.body.is_empty());
    }
}
