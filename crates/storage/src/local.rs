use crate::backend::{BlobContainer, ContainerProvider};
use crate::models::{BlobHandle, ByteReader};
use crate::StorageError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage backend.
/// Containers are directories below `base_path`, blobs are files inside them.
pub struct LocalBackend {
    base_url: String,
    base_path: PathBuf,
    default_container: String,
}

impl LocalBackend {
    pub fn new(base_url: String, base_path: PathBuf, default_container: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            base_path,
            default_container,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait::async_trait]
impl ContainerProvider for LocalBackend {
    async fn get_container(&self, name: Option<&str>) -> Result<Arc<dyn BlobContainer>, StorageError> {
        let name = name.unwrap_or(&self.default_container);
        validate_container_name(name)
            .map_err(|reason| StorageError::InvalidContainerName(name.to_string(), reason.to_string()))?;

        let path = self.base_path.join(name);
        if !path.exists() {
            tokio::fs::create_dir_all(&path).await.map_err(|e| {
                StorageError::ContainerUnavailable(name.to_string(), e.to_string())
            })?;
            tracing::debug!("Created container directory: {}", path.display());
        }

        Ok(Arc::new(LocalContainer {
            name: name.to_string(),
            path,
            base_url: self.base_url.clone(),
        }))
    }

    fn default_container(&self) -> &str {
        &self.default_container
    }

    fn kind(&self) -> &'static str {
        "local"
    }

    fn is_remote(&self) -> bool {
        false
    }
}

struct LocalContainer {
    name: String,
    path: PathBuf,
    base_url: String,
}

#[async_trait::async_trait]
impl BlobContainer for LocalContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn blob_reference(&self, blob_name: &str) -> BlobHandle {
        BlobHandle::new(
            &self.name,
            blob_name,
            format!("{}/{}/{}", self.base_url, self.name, blob_name),
        )
    }

    async fn upload_stream(
        &self,
        blob: &BlobHandle,
        mut stream: ByteReader,
        _content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        validate_blob_name(blob.name())
            .map_err(|reason| StorageError::InvalidBlobName(blob.name().to_string(), reason.to_string()))?;

        let target = self.path.join(blob.name());
        let mut file = tokio::fs::File::create(&target).await?;

        let written = tokio::io::copy(&mut stream, &mut file)
            .await
            .map_err(|e| StorageError::UploadError(blob.name().to_string(), e.to_string()))?;
        file.flush().await?;

        tracing::debug!("Wrote {} bytes to {}", written, target.display());
        Ok(())
    }
}

/// Container names become directory names, so they are checked on every platform
fn validate_container_name(name: &str) -> Result<(), &'static str> {
    validate_component(name)?;

    // Windows drive letters (C:, D:, etc.)
    if name.len() >= 2 && name.chars().nth(1) == Some(':') {
        return Err("drive letters are not allowed");
    }

    Ok(())
}

/// Blob names carry the client's file stem, which may legitimately contain `:`
fn validate_blob_name(name: &str) -> Result<(), &'static str> {
    validate_component(name)?;

    // Drive letters and NTFS alternate data streams
    if cfg!(windows) && name.contains(':') {
        return Err("':' is not allowed in file names on this platform");
    }

    Ok(())
}

/// Validates a name so it stays a single path component
fn validate_component(component: &str) -> Result<(), &'static str> {
    if component.is_empty() {
        return Err("name is empty");
    }

    if component == "." || component == ".." {
        return Err("name refers to a directory (path traversal attempt)");
    }

    if component.contains('\0') {
        return Err("name contains null byte");
    }

    if component.contains('/') || component.contains('\\') {
        return Err("name contains a path separator");
    }

    Ok(())
}
