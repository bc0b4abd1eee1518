//! tus protocol constants and header helpers.
//!
//! # Key Items
//!
//! | Item | Description |
//! |------|-------------|
//! | [`TUS_VERSION`] | Version sent in `Tus-Resumable` |
//! | [`constants::headers`] | Header names used by the protocol |
//! | [`parse_extension_list`] | Parse `Tus-Extension` |
//! | [`format_upload_metadata`] | Build `Upload-Metadata` |
//! | [`location_path`] | Reduce a `Location` to its path |
//!
//! # Specification
//!
//! Based on the [tus resumable upload protocol 1.0.0](https://tus.io/protocols/resumable-upload),
//! core protocol plus the `creation` extension.

pub mod constants;
mod headers;

pub use constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RETRIES, TUS_VERSION};
pub use headers::{format_upload_metadata, location_path, parse_extension_list, parse_u64_header};
