use crate::errors::ApiError;
use axum::extract::Multipart;
use cdts_storage::FormFile;

/// Reads file parts from a multipart form, in form order.
/// Parts without a file name are plain form values and are skipped, as are parts
/// with an empty file name (sent by browsers for an empty file input).
pub async fn read_files(mut multipart: Multipart, limit: Option<usize>) -> Result<Vec<FormFile>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?
    {
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let content_type = field
            .content_type()
            .map(str::to_string)
            .or_else(|| mime_guess::from_path(&file_name).first().map(|m| m.to_string()));

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?;

        tracing::debug!("Received form file '{}' ({} bytes)", file_name, data.len());
        files.push(FormFile::new(file_name, content_type, data));

        if limit.is_some_and(|limit| files.len() >= limit) {
            break;
        }
    }

    Ok(files)
}
