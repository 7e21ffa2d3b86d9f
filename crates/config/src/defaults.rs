/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_body_size() -> usize {
    100
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

// Storage defaults
pub fn storage_backend() -> super::models::StorageBackend {
    super::models::StorageBackend::Local
}

pub fn default_container() -> String {
    "uploads".to_string()
}

pub fn local_base_path() -> String {
    "storage".to_string()
}

pub fn local_settings() -> super::models::LocalSettings {
    super::models::LocalSettings {
        base_path: local_base_path(),
    }
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        backend: storage_backend(),
        default_container: default_container(),
        local: local_settings(),
        s3: s3_settings(),
    }
}

pub fn s3_region() -> String {
    "auto".to_string()
}

pub fn s3_settings() -> super::models::S3Settings {
    super::models::S3Settings {
        enabled: false,
        endpoint_url: String::new(),
        region: s3_region(),
        access_key_id: String::new(),
        secret_access_key: String::new(),
        public_url: String::new(),
        bucket_prefix: String::new(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# CDTS Blob Upload Server Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 8080                          # Server port
base_url = "http://localhost:8080"   # Public base URL of this server

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 1000       # Max simultaneous connections
max_body_size_mb = 100               # Max upload request size in MB

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://example.com"] for production

# ===============================================================================
# STORAGE BACKEND
# ===============================================================================
[storage]
backend = "local"                    # Storage backend: "local" or "s3"
default_container = "uploads"        # Container used when a request names none

# Local Configuration (only used if backend = "local")
[storage.local]
base_path = "storage"                # Containers are folders below this path

# S3 Configuration (only used if backend = "s3"), containers map to buckets
[storage.s3]
enabled = false                      # Enable S3 storage backend
endpoint_url = ""                    # S3 endpoint (e.g., https://s3.amazonaws.com)
region = "auto"                      # S3 region (e.g., us-east-1 or "auto")
access_key_id = ""                   # AWS Access Key ID
secret_access_key = ""               # AWS Secret Access Key
public_url = ""                      # Public URL for blob downloads (optional)
bucket_prefix = ""                   # Prefix for all S3 keys (optional)
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Config, StorageBackend};

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.allowed_origins, allowed_origins());
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.storage.default_container, default_container());
        assert_eq!(config.storage.local.base_path, local_base_path());
        assert!(!config.storage.s3.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_storage_section_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            base_url = "http://localhost:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.timeout_secs, timeout_secs());
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.storage.default_container, "uploads");
    }

    #[test]
    fn test_empty_default_container_is_rejected() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        config.storage.default_container = "  ".to_string();

        assert!(config.validate().is_err());
    }
}
