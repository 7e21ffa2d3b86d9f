use super::models::AppState;
use crate::models::HealthResponse;
use axum::{extract::State, response::Json};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.uploader.provider();

    Json(HealthResponse {
        status: "ok".to_string(),
        storage: provider.kind().to_string(),
        default_container: provider.default_container().to_string(),
    })
}
