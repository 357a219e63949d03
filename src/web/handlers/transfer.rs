//! Upload and download handlers.

use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::content::mime;
use crate::tree::FileMeta;
use crate::web::dto::{ApiResponse, EntryResponse, PathQuery};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::ManagerAccess;

/// Multipart field names accepted as file payloads.
const FILE_FIELDS: [&str; 2] = ["files", "file"];

/// Build a Content-Disposition value that is safe for any file name.
///
/// Control characters are dropped and quotes, backslashes and non-ASCII
/// characters replaced in the plain `filename`. Such names also get an
/// RFC 5987 `filename*`.
pub fn content_disposition_header(filename: &str) -> String {
    let needs_encoding = !filename.is_ascii()
        || filename
            .chars()
            .any(|c| c.is_control() || c == '"' || c == '\\');

    if !needs_encoding {
        return format!("attachment; filename=\"{filename}\"");
    }

    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '"' || c == '\\' || !c.is_ascii() { '_' } else { c })
        .collect();
    let encoded = urlencoding::encode(filename);

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

/// POST /api/shares/:id/upload - Upload one or more files into a folder.
///
/// Request body: multipart/form-data with one `files` part per file. A file
/// that already exists in the folder is overwritten.
#[utoipa::path(
    post,
    path = "/api/shares/{id}/upload",
    tag = "transfer",
    params(
        ("id" = i64, Path, description = "Share ID"),
        PathQuery
    ),
    responses(
        (status = 201, description = "Files stored", body = Vec<EntryResponse>),
        (status = 400, description = "No files, bad folder or share not connected"),
        (status = 404, description = "Share or folder not found"),
        (status = 409, description = "A folder exists with a file's name"),
        (status = 413, description = "File too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    _manager: ManagerAccess,
    Path(share_id): Path<i64>,
    Query(query): Query<PathQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Vec<EntryResponse>>>), ApiError> {
    state.shares.require_connected(share_id).await?;

    let mut stored = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        if !field.name().is_some_and(|n| FILE_FIELDS.contains(&n)) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("File part without a file name"))?;
        let content = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read file content: {}", e);
            ApiError::bad_request("Failed to read file")
        })?;

        if content.len() > state.max_upload_size {
            return Err(ApiError::payload_too_large(format!(
                "File too large (max {}MB)",
                state.max_upload_size / 1024 / 1024
            )));
        }

        let key = state.content.save(&content, &file_name).await?;
        let meta = FileMeta {
            size: content.len() as i64,
            mime_type: Some(mime::classify(&file_name)),
            stored_name: Some(key.clone()),
        };

        let written = match state
            .tree
            .write_file(share_id, &query.path, &file_name, meta)
            .await
        {
            Ok(written) => written,
            Err(e) => {
                if let Err(cleanup) = state.content.delete(&key).await {
                    tracing::warn!("Failed to remove orphaned content {}: {}", key, cleanup);
                }
                return Err(e.into());
            }
        };

        if let Some(previous) = written.previous_stored_name.as_deref() {
            if let Err(e) = state.content.delete(previous).await {
                tracing::warn!("Failed to remove replaced content {}: {}", previous, e);
            }
        }

        tracing::info!(
            "Uploaded {} ({} bytes) to share {}",
            written.entry.path,
            content.len(),
            share_id
        );
        stored.push(EntryResponse::from(written.entry));
    }

    if stored.is_empty() {
        return Err(ApiError::bad_request("No files provided"));
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(stored))))
}

/// GET /api/shares/:id/download - Download a file.
///
/// Files without uploaded content are served a generated placeholder body.
#[utoipa::path(
    get,
    path = "/api/shares/{id}/download",
    tag = "transfer",
    params(
        ("id" = i64, Path, description = "Share ID"),
        PathQuery
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 400, description = "Path is a folder or share not connected"),
        (status = 404, description = "Share or file not found")
    )
)]
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<i64>,
    Query(query): Query<PathQuery>,
) -> Result<Response<Body>, ApiError> {
    let session = state.shares.require_connected(share_id).await?;

    let entry = state
        .tree
        .get_entry(share_id, &query.path)
        .await?
        .ok_or_else(|| ApiError::not_found("File not found"))?;
    if entry.is_folder() {
        return Err(ApiError::bad_request(format!(
            "{} is a folder",
            entry.path
        )));
    }

    let content = match entry.stored_name.as_deref() {
        Some(key) => state.content.load(key).await?,
        None => session.placeholder_content(&entry.path),
    };

    let content_type = entry
        .mime_type
        .clone()
        .unwrap_or_else(|| mime::classify(&entry.name));

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&entry.name),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain_ascii() {
        assert_eq!(
            content_disposition_header("report.pdf"),
            "attachment; filename=\"report.pdf\""
        );
        assert_eq!(
            content_disposition_header("Manual presentacion.xlsx"),
            "attachment; filename=\"Manual presentacion.xlsx\""
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let value = content_disposition_header("presentación.pptx");
        assert!(value.starts_with("attachment; filename=\"presentaci_n.pptx\""));
        assert!(value.contains("filename*=UTF-8''presentaci%C3%B3n.pptx"));
    }

    #[test]
    fn test_content_disposition_strips_header_injection() {
        let value = content_disposition_header("a\"\r\nX-Evil: 1.txt");
        assert!(!value.contains('\r'));
        assert!(!value.contains('\n'));
        assert!(value.contains("filename=\"a_X-Evil: 1.txt\""));
    }
}
