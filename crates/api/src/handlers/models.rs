use cdts_events::EventBus;
use cdts_storage::BlobUploadService;
use serde::Deserialize;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) uploader: BlobUploadService,
    pub(super) events: Arc<EventBus>,
}

/// Query string accepted by the upload endpoints
#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    /// Target container; the storage default is used when absent
    pub container: Option<String>,
}
