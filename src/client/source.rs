//! Byte sources for uploads.
//!
//! A [`ByteSource`] knows its name and total length upfront and hands out
//! sequential chunks until it is exhausted. It is a finite, non-restartable
//! sequence: once [`ByteSource::read_chunk`] returns `None`, the upload is
//! over.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FileSource`] | A file on disk |
//! | [`MemorySource`] | An in-memory buffer |

use crate::error::{Result, TusError};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// A sequential reader of upload data.
#[async_trait]
pub trait ByteSource: Send {
    /// Name sent in the upload metadata
    fn name(&self) -> &str;

    /// Total length in bytes, if known
    fn len(&self) -> Option<u64>;

    /// Check if the source is known to hold no data
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Read the next chunk of at most `max` bytes.
    ///
    /// Returns `None` once the source is exhausted. A returned chunk is never
    /// empty.
    async fn read_chunk(&mut self, max: usize) -> Result<Option<Bytes>>;

    /// Release the underlying resource. Reads after closing return `None`.
    async fn close(&mut self) -> Result<()>;
}

/// Upload data read from a file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    name: String,
    len: u64,
    position: u64,
    file: Option<tokio::fs::File>,
}

impl FileSource {
    /// Open a file for upload.
    ///
    /// # Errors
    ///
    /// Returns [`TusError::FileNotFound`] if `path` is not a regular file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return Err(TusError::FileNotFound(path.to_path_buf())),
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file = tokio::fs::File::open(path).await?;

        Ok(FileSource {
            path: path.to_path_buf(),
            name,
            len: metadata.len(),
            position: 0,
            file: Some(file),
        })
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file has been closed
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }
}

#[async_trait]
impl ByteSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> Option<u64> {
        Some(self.len)
    }

    async fn read_chunk(&mut self, max: usize) -> Result<Option<Bytes>> {
        let Some(file) = self.file.as_mut() else {
            return Ok(None);
        };

        // Never read past the length reported at open time.
        let want = (self.len - self.position).min(max as u64) as usize;
        if want == 0 {
            return Ok(None);
        }

        let mut buf = BytesMut::zeroed(want);
        let mut total = 0;
        while total < want {
            match file.read(&mut buf[total..]).await? {
                0 => break,
                n => total += n,
            }
        }

        if total == 0 {
            return Ok(None);
        }
        buf.truncate(total);
        self.position += total as u64;
        Ok(Some(buf.freeze()))
    }

    async fn close(&mut self) -> Result<()> {
        self.file = None;
        Ok(())
    }
}

/// Upload data held in memory.
///
/// The declared length may differ from the data length, which is useful for
/// streams whose size is reported separately from their content.
///
/// # Examples
///
/// ```
/// use tus_client::client::{ByteSource, MemorySource};
///
/// # tokio_test::block_on(async {
/// let mut source = MemorySource::new("greeting.txt", "hello world");
/// assert_eq!(source.len(), Some(11));
///
/// let chunk = source.read_chunk(5).await.unwrap().unwrap();
/// assert_eq!(&chunk[..], b"hello");
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct MemorySource {
    name: String,
    data: Bytes,
    declared_len: Option<u64>,
    position: usize,
    closed: bool,
}

impl MemorySource {
    /// Create a source whose declared length is the data length
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let declared_len = Some(data.len() as u64);
        MemorySource {
            name: name.into(),
            data,
            declared_len,
            position: 0,
            closed: false,
        }
    }

    /// Override the declared length (`None` for an unknown size)
    pub fn with_declared_len(mut self, len: Option<u64>) -> Self {
        self.declared_len = len;
        self
    }

    /// Check if the source has been closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> Option<u64> {
        self.declared_len
    }

    async fn read_chunk(&mut self, max: usize) -> Result<Option<Bytes>> {
        if self.closed || self.position >= self.data.len() || max == 0 {
            return Ok(None);
        }
        let end = (self.position + max).min(self.data.len());
        let chunk = self.data.slice(self.position..end);
        self.position = end;
        Ok(Some(chunk))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_memory_source_chunks() {
        let mut source = MemorySource::new("data.bin", vec![7u8; 250]);
        let mut sizes = Vec::new();
        while let Some(chunk) = source.read_chunk(100).await.unwrap() {
            sizes.push(chunk.len());
        }
        assert_eq!(sizes, vec![100, 100, 50]);
        assert!(source.read_chunk(100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_source_closed_yields_nothing() {
        let mut source = MemorySource::new("data.bin", "abc");
        tokio_test::assert_ok!(source.close().await);
        assert!(source.is_closed());
        assert!(source.read_chunk(10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_source_reads_whole_file() {
        let contents: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let dir = TempDir::new().unwrap();
        let path = temp_file(&dir, "whole.bin", &contents);

        let mut source = FileSource::open(&path).await.unwrap();
        assert_eq!(source.name(), "whole.bin");
        assert_eq!(source.len(), Some(1000));

        let mut read = Vec::new();
        while let Some(chunk) = source.read_chunk(300).await.unwrap() {
            assert!(chunk.len() <= 300);
            read.extend_from_slice(&chunk);
        }
        assert_eq!(read, contents);

        source.close().await.unwrap();
        assert!(source.is_closed());
    }

    #[tokio::test]
    async fn test_file_source_small_file_reads_only_its_length() {
        let dir = TempDir::new().unwrap();
        let path = temp_file(&dir, "small.txt", b"tiny");

        let mut source = FileSource::open(&path).await.unwrap();
        let chunk = source.read_chunk(100 * 1024 * 1024).await.unwrap().unwrap();
        assert_eq!(&chunk[..], b"tiny");
        assert_eq!(chunk.len(), 4);
        assert!(source.read_chunk(100 * 1024 * 1024).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_source_stops_at_length_from_open() {
        let dir = TempDir::new().unwrap();
        let path = temp_file(&dir, "growing.log", b"0123456789");
        let mut source = FileSource::open(&path).await.unwrap();

        std::fs::write(&path, b"0123456789abcdef").unwrap();

        let mut read = Vec::new();
        while let Some(chunk) = source.read_chunk(4).await.unwrap() {
            read.extend_from_slice(&chunk);
        }
        assert_eq!(read, b"0123456789");
    }

    #[test]
    fn test_is_empty() {
        assert!(MemorySource::new("empty", Vec::<u8>::new()).is_empty());
        assert!(!MemorySource::new("one", "x").is_empty());
        assert!(!MemorySource::new("stream", "x").with_declared_len(None).is_empty());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let err = FileSource::open("/definitely/not/here.bin").await.unwrap_err();
        assert!(matches!(err, TusError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_file_source_rejects_directory() {
        let err = FileSource::open(std::env::temp_dir()).await.unwrap_err();
        assert!(matches!(err, TusError::FileNotFound(_)));
    }
}
