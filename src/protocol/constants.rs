//! Protocol constants for tus v1.0.0.

/// Protocol version sent in every `Tus-Resumable` header
pub const TUS_VERSION: &str = "1.0.0";

/// Default maximum chunk size (100 MiB)
pub const DEFAULT_CHUNK_SIZE: usize = 100 * 1024 * 1024;

/// Default number of attempts for creation and chunk requests
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Content type required on PATCH request bodies
pub const OFFSET_OCTET_STREAM: &str = "application/offset+octet-stream";

/// Metadata key carrying the base64 file name
pub const METADATA_FILENAME: &str = "filename";

/// Value-less metadata key marking the upload as confidential
pub const METADATA_CONFIDENTIAL: &str = "is_confidential";

/// Header names used by the protocol (lowercase, as stored in responses)
pub mod headers {
    use http::HeaderName;

    /// Protocol version used by the client or the server
    pub const TUS_RESUMABLE: HeaderName = HeaderName::from_static("tus-resumable");
    /// Comma-separated list of protocol versions supported by the server
    pub const TUS_VERSION: HeaderName = HeaderName::from_static("tus-version");
    /// Comma-separated list of extensions supported by the server
    pub const TUS_EXTENSION: HeaderName = HeaderName::from_static("tus-extension");
    /// Maximum allowed size of an entire upload in bytes
    pub const TUS_MAX_SIZE: HeaderName = HeaderName::from_static("tus-max-size");
    /// Byte offset within a resource
    pub const UPLOAD_OFFSET: HeaderName = HeaderName::from_static("upload-offset");
    /// Size of the entire upload in bytes
    pub const UPLOAD_LENGTH: HeaderName = HeaderName::from_static("upload-length");
    /// Comma-separated `key base64value` pairs
    pub const UPLOAD_METADATA: HeaderName = HeaderName::from_static("upload-metadata");
    /// Locator of a newly created resource
    pub const LOCATION: HeaderName = http::header::LOCATION;
    /// Request body type
    pub const CONTENT_TYPE: HeaderName = http::header::CONTENT_TYPE;
    /// Request body length
    pub const CONTENT_LENGTH: HeaderName = http::header::CONTENT_LENGTH;
}

/// Extension identifiers advertised in `Tus-Extension`
pub mod extensions {
    /// Creating new upload resources via POST
    pub const CREATION: &str = "creation";
}

/// Status codes the client checks for
pub mod status {
    /// Resource created
    pub const CREATED: u16 = 201;
    /// Chunk accepted
    pub const NO_CONTENT: u16 = 204;
}
