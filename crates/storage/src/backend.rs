use crate::models::{BlobHandle, ByteReader};
use crate::StorageError;
use std::sync::Arc;

/// Resolves containers on a storage connection
#[async_trait::async_trait]
pub trait ContainerProvider: Send + Sync {
    /// Get a handle to the named container, or the default one when `name` is `None`
    async fn get_container(&self, name: Option<&str>) -> Result<Arc<dyn BlobContainer>, StorageError>;

    /// Name of the container used when none is requested
    fn default_container(&self) -> &str;

    /// Short backend identifier ("local", "s3")
    fn kind(&self) -> &'static str;

    /// Check if backend is local or remote
    fn is_remote(&self) -> bool;
}

/// A container handle, valid for the call that obtained it
#[async_trait::async_trait]
pub trait BlobContainer: Send + Sync {
    fn name(&self) -> &str;

    /// Build a reference to a blob in this container. No I/O.
    fn blob_reference(&self, blob_name: &str) -> BlobHandle;

    /// Stream the full contents of `stream` into `blob`
    async fn upload_stream(
        &self,
        blob: &BlobHandle,
        stream: ByteReader,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;
}
