//! Tree navigation and mutation handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    entry_list, ApiResponse, BreadcrumbResponse, CreateFolderRequest, DeletedResponse,
    EntryResponse, PathQuery, SearchQuery, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::ManagerAccess;

/// GET /api/shares/:id/browse - List the direct children of a folder.
#[utoipa::path(
    get,
    path = "/api/shares/{id}/browse",
    tag = "browse",
    params(
        ("id" = i64, Path, description = "Share ID"),
        PathQuery
    ),
    responses(
        (status = 200, description = "Folder contents", body = Vec<EntryResponse>),
        (status = 400, description = "Share not connected or path is not a folder"),
        (status = 404, description = "Share or folder not found")
    )
)]
pub async fn browse(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<i64>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<Vec<EntryResponse>>>, ApiError> {
    state.shares.require_connected(share_id).await?;
    let entries = state.tree.list_children(share_id, &query.path).await?;
    Ok(Json(ApiResponse::new(entry_list(entries))))
}

/// GET /api/shares/:id/search - Search entry names in a folder.
#[utoipa::path(
    get,
    path = "/api/shares/{id}/search",
    tag = "browse",
    params(
        ("id" = i64, Path, description = "Share ID"),
        SearchQuery
    ),
    responses(
        (status = 200, description = "Matching entries", body = Vec<EntryResponse>),
        (status = 400, description = "Empty query or share not connected"),
        (status = 404, description = "Share or folder not found")
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<EntryResponse>>>, ApiError> {
    state.shares.require_connected(share_id).await?;
    let entries = if query.recursive {
        state
            .tree
            .search_recursive(share_id, &query.path, &query.q)
            .await?
    } else {
        state.tree.search(share_id, &query.path, &query.q).await?
    };
    Ok(Json(ApiResponse::new(entry_list(entries))))
}

/// GET /api/shares/:id/breadcrumb - Navigation trail for a path.
#[utoipa::path(
    get,
    path = "/api/shares/{id}/breadcrumb",
    tag = "browse",
    params(
        ("id" = i64, Path, description = "Share ID"),
        PathQuery
    ),
    responses(
        (status = 200, description = "Trail from the share root", body = Vec<BreadcrumbResponse>),
        (status = 404, description = "Share not found")
    )
)]
pub async fn breadcrumb(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<i64>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<Vec<BreadcrumbResponse>>>, ApiError> {
    let trail = state.tree.breadcrumb(share_id, &query.path).await?;
    Ok(Json(ApiResponse::new(
        trail.into_iter().map(BreadcrumbResponse::from).collect(),
    )))
}

/// POST /api/shares/:id/folder - Create a folder.
#[utoipa::path(
    post,
    path = "/api/shares/{id}/folder",
    tag = "browse",
    params(
        ("id" = i64, Path, description = "Share ID")
    ),
    request_body = CreateFolderRequest,
    responses(
        (status = 201, description = "Folder created", body = EntryResponse),
        (status = 400, description = "Invalid name, parent or share not connected"),
        (status = 404, description = "Share or parent folder not found"),
        (status = 409, description = "An entry with that name already exists"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    _manager: ManagerAccess,
    Path(share_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EntryResponse>>), ApiError> {
    state.shares.require_connected(share_id).await?;
    let folder = state
        .tree
        .create_folder(share_id, &req.path, &req.name)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(EntryResponse::from(folder))),
    ))
}

/// DELETE /api/shares/:id/entries - Delete a file or folder.
///
/// Folders are deleted with everything below them.
#[utoipa::path(
    delete,
    path = "/api/shares/{id}/entries",
    tag = "browse",
    params(
        ("id" = i64, Path, description = "Share ID"),
        PathQuery
    ),
    responses(
        (status = 200, description = "Whether anything was removed", body = DeletedResponse),
        (status = 400, description = "Root path or share not connected"),
        (status = 404, description = "Share not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    _manager: ManagerAccess,
    Path(share_id): Path<i64>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.shares.require_connected(share_id).await?;
    let removed = state.tree.remove_entry(share_id, &query.path).await?;
    state.release_content(&removed).await;
    Ok(Json(ApiResponse::new(DeletedResponse {
        deleted: !removed.is_empty(),
    })))
}
