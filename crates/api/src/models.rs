use cdts_storage::BlobHandle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobInfo {
    pub container: String,
    pub name: String,
    pub url: String,
}

impl From<BlobHandle> for BlobInfo {
    fn from(blob: BlobHandle) -> Self {
        Self {
            container: blob.container().to_string(),
            name: blob.name().to_string(),
            url: blob.url().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub blob: BlobInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUploadResponse {
    pub blobs: Vec<BlobInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub default_container: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
