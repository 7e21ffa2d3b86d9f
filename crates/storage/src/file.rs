use crate::models::ByteReader;
use bytes::Bytes;
use std::io::Cursor;

/// A file received from a client, readable as a byte stream
#[async_trait::async_trait]
pub trait UploadedFile: Send + Sync {
    /// File name as sent by the client
    fn file_name(&self) -> &str;

    fn content_type(&self) -> Option<&str> {
        None
    }

    /// Open a fresh stream over the file contents. The stream is closed when dropped.
    async fn open_read_stream(&self) -> std::io::Result<ByteReader>;
}

/// Uploaded file held in memory, as decoded from a multipart form field
#[derive(Debug, Clone)]
pub struct FormFile {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

impl FormFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }
}

#[async_trait::async_trait]
impl UploadedFile for FormFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    async fn open_read_stream(&self) -> std::io::Result<ByteReader> {
        // Bytes clones share the buffer
        Ok(Box::new(Cursor::new(self.data.clone())))
    }
}
