//! Shared header parsing and formatting for tus.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | Tus-Extension | Comma-separated tokens | `creation,termination` |
//! | Upload-Offset | Non-negative integer | `1024` |
//! | Upload-Metadata | Comma-separated `key base64` pairs | `filename d29ybGQ=,is_confidential` |
//! | Location | Absolute or relative URL | `/files/24e533e0` |
//!
//! # Examples
//!
//! ```
//! use tus_client::protocol::{
//!     parse_extension_list, format_upload_metadata, parse_u64_header,
//! };
//!
//! let extensions = parse_extension_list("creation, termination");
//! assert!(extensions.contains("creation"));
//!
//! let metadata = format_upload_metadata("world_domination_plan.pdf");
//! assert!(metadata.starts_with("filename "));
//!
//! assert_eq!(parse_u64_header("upload-offset", "100").unwrap(), 100);
//! ```

use crate::error::{Result, TusError};
use crate::protocol::constants::{METADATA_CONFIDENTIAL, METADATA_FILENAME};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::BTreeSet;
use url::Url;

/// Parse a comma-separated token list such as `Tus-Extension` or `Tus-Version`.
///
/// Entries are trimmed and empty entries are skipped, so an empty header
/// yields an empty set.
///
/// # Examples
///
/// ```
/// use tus_client::protocol::parse_extension_list;
///
/// let set = parse_extension_list("creation,expiration");
/// assert_eq!(set.len(), 2);
///
/// assert!(parse_extension_list("").is_empty());
/// ```
pub fn parse_extension_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format the `Upload-Metadata` value for a new resource.
///
/// The file name is base64-encoded and followed by the value-less
/// confidentiality key.
///
/// # Examples
///
/// ```
/// use tus_client::protocol::format_upload_metadata;
///
/// assert_eq!(format_upload_metadata("hello"), "filename aGVsbG8=,is_confidential");
/// ```
pub fn format_upload_metadata(file_name: &str) -> String {
    format!(
        "{} {},{}",
        METADATA_FILENAME,
        STANDARD.encode(file_name),
        METADATA_CONFIDENTIAL
    )
}

/// Parse an integer header value such as `Upload-Offset`.
///
/// # Errors
///
/// Returns [`TusError::MalformedServerResponse`] if the value is not a
/// non-negative integer.
pub fn parse_u64_header(name: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        TusError::MalformedServerResponse(format!("Invalid {} header: '{}'", name, value))
    })
}

/// Extract the path of a `Location` header value.
///
/// Relative locations are resolved against `base`. Scheme and host are
/// dropped since later requests reuse the session's connection.
///
/// # Examples
///
/// ```
/// use tus_client::protocol::location_path;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:1080/files/").unwrap();
/// assert_eq!(location_path(&base, "http://localhost:1080/files/abc").unwrap(), "/files/abc");
/// assert_eq!(location_path(&base, "/files/abc").unwrap(), "/files/abc");
/// assert_eq!(location_path(&base, "abc").unwrap(), "/files/abc");
/// ```
pub fn location_path(base: &Url, location: &str) -> Result<String> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(TusError::MalformedServerResponse(
            "Empty Location header".to_string(),
        ));
    }
    let resolved = base.join(trimmed)?;
    Ok(resolved.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extension_list() {
        let result = parse_extension_list("creation,creation-with-upload, termination");
        assert_eq!(result.len(), 3);
        assert!(result.contains("termination"));
    }

    #[test]
    fn test_parse_extension_list_skips_empty_entries() {
        let result = parse_extension_list(" , creation,,");
        assert_eq!(result.len(), 1);
        assert!(result.contains("creation"));
    }

    #[test]
    fn test_format_upload_metadata_round_trips_name() {
        let header = format_upload_metadata("report 2024.pdf");
        let encoded = header
            .strip_prefix("filename ")
            .and_then(|rest| rest.strip_suffix(",is_confidential"))
            .unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), b"report 2024.pdf");
    }

    #[test]
    fn test_parse_u64_header() {
        assert_eq!(parse_u64_header("upload-offset", " 42 ").unwrap(), 42);
    }

    #[test]
    fn test_parse_u64_header_invalid() {
        assert!(matches!(
            parse_u64_header("upload-offset", "-1"),
            Err(TusError::MalformedServerResponse(_))
        ));
        assert!(parse_u64_header("upload-length", "abc").is_err());
    }

    #[test]
    fn test_location_path_strips_host() {
        let base = Url::parse("https://tus.example.com/files/").unwrap();
        let path = location_path(&base, "https://other.example.com/files/xyz").unwrap();
        assert_eq!(path, "/files/xyz");
    }

    #[test]
    fn test_location_path_empty() {
        let base = Url::parse("https://tus.example.com/files/").unwrap();
        assert!(matches!(
            location_path(&base, "  "),
            Err(TusError::MalformedServerResponse(_))
        ));
    }
}
