use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, base_url: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { backend: String, default_container: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },

    // Storage
    StorageReady { backend: String, location: String },

    // Uploads
    BlobUploaded { container: String, blob: String },
    BatchUploaded { container: String, count: usize },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
