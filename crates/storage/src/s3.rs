use crate::backend::{BlobContainer, ContainerProvider};
use crate::models::{BlobHandle, ByteReader};
use crate::StorageError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// S3-compatible storage backend, one bucket per container.
/// Compatible with: Cloudflare R2, AWS S3, MinIO, DigitalOcean Spaces, etc.
pub struct S3Backend {
    client: Client,
    default_bucket: String,
    public_url: String,
    bucket_prefix: String,
}

impl S3Backend {
    pub async fn new(
        endpoint_url: String,
        region: String,
        access_key_id: String,
        secret_access_key: String,
        default_bucket: String,
        public_url: String,
        bucket_prefix: String,
    ) -> Result<Self, StorageError> {
        if endpoint_url.is_empty() {
            return Err(StorageError::ConfigError("storage.s3.endpoint_url is empty".to_string()));
        }

        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "cdts-s3",
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(region))
            .endpoint_url(endpoint_url.clone())
            .load()
            .await;

        let client = Client::new(&config);

        let public_url = if public_url.is_empty() { endpoint_url } else { public_url };

        Ok(Self {
            client,
            default_bucket,
            public_url: public_url.trim_end_matches('/').to_string(),
            bucket_prefix: bucket_prefix.trim_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ContainerProvider for S3Backend {
    async fn get_container(&self, name: Option<&str>) -> Result<Arc<dyn BlobContainer>, StorageError> {
        let bucket = name.unwrap_or(&self.default_bucket).to_string();

        self.client
            .head_bucket()
            .bucket(&bucket)
            .send()
            .await
            .map_err(|e| StorageError::ContainerUnavailable(bucket.clone(), e.to_string()))?;

        Ok(Arc::new(S3Container {
            client: self.client.clone(),
            bucket,
            public_url: self.public_url.clone(),
            bucket_prefix: self.bucket_prefix.clone(),
        }))
    }

    fn default_container(&self) -> &str {
        &self.default_bucket
    }

    fn kind(&self) -> &'static str {
        "s3"
    }

    fn is_remote(&self) -> bool {
        true
    }
}

struct S3Container {
    client: Client,
    bucket: String,
    public_url: String,
    bucket_prefix: String,
}

impl S3Container {
    fn build_key(&self, blob_name: &str) -> String {
        if self.bucket_prefix.is_empty() {
            blob_name.to_string()
        } else {
            format!("{}/{}", self.bucket_prefix, blob_name)
        }
    }
}

#[async_trait::async_trait]
impl BlobContainer for S3Container {
    fn name(&self) -> &str {
        &self.bucket
    }

    fn blob_reference(&self, blob_name: &str) -> BlobHandle {
        let key = self.build_key(blob_name);
        BlobHandle::new(
            &self.bucket,
            blob_name,
            format!("{}/{}/{}", self.public_url, self.bucket, key),
        )
    }

    async fn upload_stream(
        &self,
        blob: &BlobHandle,
        mut stream: ByteReader,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let key = self.build_key(blob.name());

        tracing::info!("Uploading {} to S3 bucket {}", key, self.bucket);

        let mut data = Vec::new();
        stream.read_to_end(&mut data).await?;
        let byte_stream = ByteStream::from(data);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(byte_stream);
        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::S3SdkError(format!("{}: {}", key, e)))?;

        tracing::info!("Upload complete: {}", blob.url());
        Ok(())
    }
}
