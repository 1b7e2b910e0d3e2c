//! Client-side file handle fed into the upload executor.

use std::path::Path;

use bytes::Bytes;
use tidecast_core::UploadError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An in-memory file selected for upload: bytes, display name, and content
/// type. The pipeline never touches the filesystem after construction.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl FileSource {
    pub fn new(
        bytes: impl Into<Bytes>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    /// Read a file from disk, sniffing the content type from its magic
    /// bytes. Unrecognized content falls back to `application/octet-stream`
    /// and is then subject to the executor's MIME prefix check.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            UploadError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let content_type = infer::get(&data)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        Ok(Self {
            bytes: Bytes::from(data),
            filename,
            content_type,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
