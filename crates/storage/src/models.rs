use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

/// Byte stream handed to a container for upload
pub type ByteReader = Box<dyn AsyncRead + Send + Unpin>;

/// Reference to a blob inside a container, as produced by the storage backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobHandle {
    container: String,
    name: String,
    url: String,
}

impl BlobHandle {
    pub fn new(container: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
