use cdts_events::{AppEvent, EventBus};
use cdts_config::Config;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub async fn load(config_path: &str, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = absolute_path_string(config_path)?;

    events.emit(AppEvent::ConfigLoading {
        path: abs_config_path.clone(),
    });

    let config_exists = Path::new(config_path).exists();
    let config = Config::from_file_with_events(config_path, Some(events)).await?;

    if !config_exists {
        events.emit(AppEvent::ConfigCreated {
            path: abs_config_path,
        });
    }

    events.emit(AppEvent::ConfigLoaded {
        backend: config.storage.backend.as_str().to_string(),
        default_container: config.storage.default_container.clone(),
    });

    Ok(config)
}

fn absolute_path_string(path: &str) -> Result<String> {
    let path = Path::new(path);
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(abs_path.to_string_lossy().to_string())
}
