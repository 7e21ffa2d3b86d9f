use super::models::AppState;
use cdts_events::EventBus;
use cdts_storage::BlobUploadService;
use std::sync::Arc;

impl AppState {
    pub fn new(uploader: BlobUploadService, events: Arc<EventBus>) -> Self {
        Self { uploader, events }
    }
}
