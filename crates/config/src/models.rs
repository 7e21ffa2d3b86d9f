use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    #[serde(default = "super::defaults::storage_settings")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_body_size")]
    pub max_body_size_mb: usize,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    S3,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Local => "local",
            StorageBackend::S3 => "s3",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "super::defaults::storage_backend")]
    pub backend: StorageBackend,
    /// Container used when a request does not name one
    #[serde(default = "super::defaults::default_container")]
    pub default_container: String,
    #[serde(default = "super::defaults::local_settings")]
    pub local: LocalSettings,
    #[serde(default = "super::defaults::s3_settings")]
    pub s3: S3Settings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalSettings {
    #[serde(default = "super::defaults::local_base_path")]
    pub base_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint_url: String,
    #[serde(default = "super::defaults::s3_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default)]
    pub public_url: String,
    #[serde(default)]
    pub bucket_prefix: String,
}

impl Config {
    pub fn validate(&self) -> Result<(), super::ConfigError> {
        if self.storage.default_container.trim().is_empty() {
            return Err(super::ConfigError::InvalidConfig(
                "storage.default_container must not be empty".to_string(),
            ));
        }

        if self.server.max_concurrent_requests == 0 {
            return Err(super::ConfigError::InvalidConfig(
                "server.max_concurrent_requests must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
