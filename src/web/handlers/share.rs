//! Share handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    ApiResponse, ConnectionStatusResponse, CreateShareRequest, DeletedResponse, ShareResponse,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AdminAccess;

/// GET /api/shares - List all shares.
#[utoipa::path(
    get,
    path = "/api/shares",
    tag = "shares",
    responses(
        (status = 200, description = "All configured shares", body = Vec<ShareResponse>)
    )
)]
pub async fn list_shares(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ShareResponse>>>, ApiError> {
    let shares = state.shares.list().await?;
    Ok(Json(ApiResponse::new(
        shares.into_iter().map(ShareResponse::from).collect(),
    )))
}

/// POST /api/shares - Create a share.
#[utoipa::path(
    post,
    path = "/api/shares",
    tag = "shares",
    request_body = CreateShareRequest,
    responses(
        (status = 201, description = "Share created", body = ShareResponse),
        (status = 400, description = "Invalid JSON"),
        (status = 401, description = "Missing admin token"),
        (status = 403, description = "Wrong admin token"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_share(
    State(state): State<Arc<AppState>>,
    _admin: AdminAccess,
    ValidatedJson(req): ValidatedJson<CreateShareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShareResponse>>), ApiError> {
    let share = state.shares.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ShareResponse::from(share))),
    ))
}

/// GET /api/shares/:id - Get a share.
#[utoipa::path(
    get,
    path = "/api/shares/{id}",
    tag = "shares",
    params(
        ("id" = i64, Path, description = "Share ID")
    ),
    responses(
        (status = 200, description = "Share details", body = ShareResponse),
        (status = 404, description = "Share not found")
    )
)]
pub async fn get_share(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<i64>,
) -> Result<Json<ApiResponse<ShareResponse>>, ApiError> {
    let share = state.shares.get(share_id).await?;
    Ok(Json(ApiResponse::new(ShareResponse::from(share))))
}

/// POST /api/shares/:id/connect - Open a session.
///
/// A rejected share path answers 502 with the failure in the body.
#[utoipa::path(
    post,
    path = "/api/shares/{id}/connect",
    tag = "shares",
    params(
        ("id" = i64, Path, description = "Share ID")
    ),
    responses(
        (status = 200, description = "Connected", body = ConnectionStatusResponse),
        (status = 404, description = "Share not found"),
        (status = 502, description = "Connection failed", body = ConnectionStatusResponse)
    )
)]
pub async fn connect_share(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<ConnectionStatusResponse>>), ApiError> {
    let status = state.shares.connect(share_id).await?;
    let code = if status.is_connected {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    Ok((code, Json(ApiResponse::new(status.into()))))
}

/// POST /api/shares/:id/disconnect - Close a session.
#[utoipa::path(
    post,
    path = "/api/shares/{id}/disconnect",
    tag = "shares",
    params(
        ("id" = i64, Path, description = "Share ID")
    ),
    responses(
        (status = 200, description = "Disconnected", body = ConnectionStatusResponse),
        (status = 404, description = "Share not found")
    )
)]
pub async fn disconnect_share(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<i64>,
) -> Result<Json<ApiResponse<ConnectionStatusResponse>>, ApiError> {
    let status = state.shares.disconnect(share_id).await?;
    Ok(Json(ApiResponse::new(status.into())))
}

/// DELETE /api/shares/:id - Delete a share and its whole tree.
#[utoipa::path(
    delete,
    path = "/api/shares/{id}",
    tag = "shares",
    params(
        ("id" = i64, Path, description = "Share ID")
    ),
    responses(
        (status = 200, description = "Share deleted", body = DeletedResponse),
        (status = 401, description = "Missing admin token"),
        (status = 403, description = "Wrong admin token"),
        (status = 404, description = "Share not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_share(
    State(state): State<Arc<AppState>>,
    _admin: AdminAccess,
    Path(share_id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let removed = state.shares.delete(share_id).await?;
    state.release_content(&removed).await;
    Ok(Json(ApiResponse::new(DeletedResponse { deleted: true })))
}
