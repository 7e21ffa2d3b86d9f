mod bootstrap;

use cdts_api::AppState;
use cdts_config::{Config, StorageBackend as StorageBackendType};
use cdts_events::{AppEvent, EventBus};
use cdts_storage::{BlobUploadService, ContainerProvider, LocalBackend};
#[cfg(feature = "s3")]
use cdts_storage::S3Backend;
use crate::bootstrap::{config, logging, router};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(true);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("CDTS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    let storage = initialize_storage(&config).await?;
    events.emit(AppEvent::StorageReady {
        backend: storage.kind().to_string(),
        location: storage_location(&config),
    });

    let local_blobs = (!storage.is_remote()).then(|| PathBuf::from(&config.storage.local.base_path));
    let app_state = AppState::new(BlobUploadService::new(storage), Arc::clone(&events));
    let app = router::build(&config, app_state, local_blobs);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = bind_server(&addr).await?;

    events.emit(AppEvent::Ready {
        addr: addr.to_string(),
        base_url: config.server.base_url.clone(),
    });

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received, initiating graceful shutdown...");
    };

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}

async fn initialize_storage(config: &Config) -> Result<Arc<dyn ContainerProvider>> {
    match config.storage.backend {
        StorageBackendType::Local => {
            let backend = LocalBackend::new(
                format!("{}/blobs", config.server.base_url.trim_end_matches('/')),
                PathBuf::from(&config.storage.local.base_path),
                config.storage.default_container.clone(),
            );
            Ok(Arc::new(backend) as Arc<dyn ContainerProvider>)
        }
        #[cfg(feature = "s3")]
        StorageBackendType::S3 => {
            let s3 = &config.storage.s3;
            if !s3.enabled {
                anyhow::bail!("S3 backend selected but not enabled in configuration");
            }

            let backend = S3Backend::new(
                s3.endpoint_url.clone(),
                s3.region.clone(),
                s3.access_key_id.clone(),
                s3.secret_access_key.clone(),
                config.storage.default_container.clone(),
                s3.public_url.clone(),
                s3.bucket_prefix.clone(),
            ).await?;

            tracing::info!(
                "Initialized S3 storage backend: default bucket={}, endpoint={}",
                config.storage.default_container,
                s3.endpoint_url
            );

            Ok(Arc::new(backend) as Arc<dyn ContainerProvider>)
        }
        #[cfg(not(feature = "s3"))]
        StorageBackendType::S3 => {
            anyhow::bail!(
                "S3 backend selected but not compiled. Rebuild with --features s3 to enable S3 support.\n\
                Note: S3 support requires cmake to be installed on your system."
            )
        }
    }
}

fn storage_location(config: &Config) -> String {
    match config.storage.backend {
        StorageBackendType::Local => config.storage.local.base_path.clone(),
        StorageBackendType::S3 => config.storage.s3.endpoint_url.clone(),
    }
}

async fn bind_server(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.split(':').last().unwrap_or("unknown");
            tracing::error!("❌ Port {} is already in use", port);
            tracing::error!("Another application is using this port");
            tracing::error!("Solutions:");
            tracing::error!("1. Stop the other application");
            tracing::error!("2. Change the port in config.toml");
            #[cfg(target_os = "windows")]
            tracing::error!("3. Find process: netstat -ano | findstr :{}", port);
            #[cfg(not(target_os = "windows"))]
            tracing::error!("3. Find process: lsof -i :{}", port);
        } else {
            tracing::error!("❌ Failed to bind server on {}: {}", addr, e);
        }
        anyhow::anyhow!("Failed to bind server: {}", e)
    })
}
