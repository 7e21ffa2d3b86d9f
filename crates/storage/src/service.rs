use crate::backend::{BlobContainer, ContainerProvider};
use crate::file::UploadedFile;
use crate::models::BlobHandle;
use crate::naming;
use crate::{StorageError, UploadError};
use std::sync::Arc;

/// Forwards uploaded files to blob storage under unique names
#[derive(Clone)]
pub struct BlobUploadService {
    provider: Arc<dyn ContainerProvider>,
    clock: fn() -> u64,
}

impl BlobUploadService {
    pub fn new(provider: Arc<dyn ContainerProvider>) -> Self {
        Self::with_clock(provider, naming::utc_ticks)
    }

    /// Uses `clock` as the tick source for blob names
    pub fn with_clock(provider: Arc<dyn ContainerProvider>, clock: fn() -> u64) -> Self {
        Self { provider, clock }
    }

    pub fn provider(&self) -> &Arc<dyn ContainerProvider> {
        &self.provider
    }

    /// Uploads one file to `container`, or to the provider's default container.
    pub async fn upload_file<F>(
        &self,
        file: Option<&F>,
        container: Option<&str>,
    ) -> Result<BlobHandle, UploadError>
    where
        F: UploadedFile + ?Sized,
    {
        let file = file.ok_or(UploadError::InvalidArgument("file"))?;

        let blob_container = self.provider.get_container(container).await?;
        let blob = self.upload_one(blob_container.as_ref(), file).await?;

        Ok(blob)
    }

    /// Uploads `files` one after another, in order, into a single container.
    ///
    /// The first failure ends the call. Blobs uploaded before it are left in place.
    pub async fn upload_files<F>(
        &self,
        files: Option<&[F]>,
        container: Option<&str>,
    ) -> Result<Vec<BlobHandle>, UploadError>
    where
        F: UploadedFile,
    {
        let files = files.ok_or(UploadError::InvalidArgument("files"))?;

        let blob_container = self.provider.get_container(container).await?;

        let mut blobs = Vec::with_capacity(files.len());
        for file in files {
            let blob = self.upload_one(blob_container.as_ref(), file).await?;
            blobs.push(blob);
        }

        Ok(blobs)
    }

    async fn upload_one<F>(
        &self,
        container: &dyn BlobContainer,
        file: &F,
    ) -> Result<BlobHandle, StorageError>
    where
        F: UploadedFile + ?Sized,
    {
        let blob_name = naming::unique_blob_name_at(file.file_name(), (self.clock)());
        let blob = container.blob_reference(&blob_name);

        tracing::debug!(
            "Uploading '{}' as {}/{}",
            file.file_name(),
            container.name(),
            blob.name()
        );

        // The stream is moved into the upload and dropped on every path
        let stream = file.open_read_stream().await?;
        container
            .upload_stream(&blob, stream, file.content_type())
            .await?;

        Ok(blob)
    }
}
