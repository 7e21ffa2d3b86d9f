use super::form;
use super::models::{AppState, UploadQuery};
use crate::errors::ApiError;
use crate::models::{BatchUploadResponse, UploadResponse};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    http::StatusCode,
    response::Json,
};
use cdts_events::AppEvent;

/// `POST /files`: uploads the first file part of the form
pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let file = match multipart {
        Ok(multipart) => form::read_files(multipart, Some(1)).await?.into_iter().next(),
        Err(rejection) => {
            tracing::debug!("upload_file: request has no multipart form: {}", rejection);
            None
        }
    };

    let blob = state
        .uploader
        .upload_file(file.as_ref(), query.container.as_deref())
        .await?;

    state.events.emit(AppEvent::BlobUploaded {
        container: blob.container().to_string(),
        blob: blob.name().to_string(),
    });

    Ok((StatusCode::CREATED, Json(UploadResponse { blob: blob.into() })))
}

/// `POST /files/batch`: uploads every file part of the form, in form order
pub async fn upload_files(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<BatchUploadResponse>), ApiError> {
    // A request that is not a form carries no file collection at all
    let files = match multipart {
        Ok(multipart) => Some(form::read_files(multipart, None).await?),
        Err(rejection) => {
            tracing::debug!("upload_files: request has no multipart form: {}", rejection);
            None
        }
    };

    let blobs = state
        .uploader
        .upload_files(files.as_deref(), query.container.as_deref())
        .await?;

    let container = blobs
        .first()
        .map(|blob| blob.container().to_string())
        .or_else(|| query.container.clone())
        .unwrap_or_else(|| state.uploader.provider().default_container().to_string());
    state.events.emit(AppEvent::BatchUploaded {
        container,
        count: blobs.len(),
    });

    Ok((
        StatusCode::CREATED,
        Json(BatchUploadResponse {
            blobs: blobs.into_iter().map(Into::into).collect(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::health;
    use crate::models::{ErrorResponse, HealthResponse};
    use axum::{
        body::Body,
        http::{header, Request},
        routing::{get, post},
        Router,
    };
    use cdts_events::EventBus;
    use cdts_storage::{BlobUploadService, LocalBackend};
    use serde::de::DeserializeOwned;
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "cdts-test-boundary";
    const TICKS: u64 = 638123456789000000;

    fn fixed_clock() -> u64 {
        TICKS
    }

    fn app(dir: &Path) -> Router {
        let backend = LocalBackend::new(
            "http://localhost:8080/blobs".to_string(),
            dir.to_path_buf(),
            "uploads".to_string(),
        );
        let uploader = BlobUploadService::with_clock(Arc::new(backend), fixed_clock);
        let state = AppState::new(uploader, EventBus::new(true));

        Router::new()
            .route("/health", get(health))
            .route("/files", post(upload_file))
            .route("/files/batch", post(upload_files))
            .with_state(state)
    }

    /// (field name, optional file name, content)
    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    fn form_request(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(&[
            ("note", None, "ignored"),
            ("file", Some("a.png"), "png-data"),
        ]);

        let response = app(dir.path())
            .oneshot(form_request("/files", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload: UploadResponse = read_json(response).await;
        assert_eq!(payload.blob.name, "a_638123456789000000.png");
        assert_eq!(payload.blob.container, "uploads");
        assert_eq!(
            payload.blob.url,
            "http://localhost:8080/blobs/uploads/a_638123456789000000.png"
        );

        let stored = std::fs::read(dir.path().join("uploads").join("a_638123456789000000.png")).unwrap();
        assert_eq!(stored, b"png-data");
    }

    #[tokio::test]
    async fn test_upload_single_file_honours_container() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(&[("file", Some("readme"), "hi")]);

        let response = app(dir.path())
            .oneshot(form_request("/files?container=docs", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload: UploadResponse = read_json(response).await;
        assert_eq!(payload.blob.container, "docs");
        assert_eq!(payload.blob.name, "readme_638123456789000000");
        assert!(dir.path().join("docs").join("readme_638123456789000000").exists());
    }

    #[tokio::test]
    async fn test_upload_without_file_part_is_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(&[("note", None, "no file here")]);

        let response = app(dir.path())
            .oneshot(form_request("/files", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: ErrorResponse = read_json(response).await;
        assert_eq!(payload.error.code, "INVALID_ARGUMENT");
        // Nothing touched storage
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_batch_upload_keeps_form_order() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(&[
            ("files", Some("one.txt"), "1"),
            ("files", Some("two.txt"), "2"),
            ("files", Some("three.txt"), "3"),
        ]);

        let response = app(dir.path())
            .oneshot(form_request("/files/batch?container=batch", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload: BatchUploadResponse = read_json(response).await;
        let names: Vec<_> = payload.blobs.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "one_638123456789000000.txt",
                "two_638123456789000000.txt",
                "three_638123456789000000.txt",
            ]
        );
        assert!(payload.blobs.iter().all(|b| b.container == "batch"));
    }

    #[tokio::test]
    async fn test_batch_upload_empty_form_returns_empty_list() {
        let dir = tempfile::tempdir().unwrap();

        let response = app(dir.path())
            .oneshot(form_request("/files/batch", multipart_body(&[])))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload: BatchUploadResponse = read_json(response).await;
        assert!(payload.blobs.is_empty());
    }

    #[tokio::test]
    async fn test_batch_upload_without_form_is_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/files/batch")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app(dir.path()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: ErrorResponse = read_json(response).await;
        assert_eq!(payload.error.code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_invalid_container_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(&[("file", Some("a.png"), "x")]);

        let response = app(dir.path())
            .oneshot(form_request("/files?container=..", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: ErrorResponse = read_json(response).await;
        assert_eq!(payload.error.code, "INVALID_CONTAINER");
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app(dir.path()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload: HealthResponse = read_json(response).await;
        assert_eq!(payload.storage, "local");
        assert_eq!(payload.default_container, "uploads");
    }
}
