//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::datetime::to_rfc3339;
use crate::share::{ConnectionStatus, Share};
use crate::tree::{BreadcrumbItem, Entry};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Share as returned by the API.
///
/// Credentials are echoed as stored.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auto_connect: bool,
    pub is_connected: bool,
    /// RFC 3339 creation time.
    pub created_at: String,
}

impl From<Share> for ShareResponse {
    fn from(share: Share) -> Self {
        Self {
            id: share.id,
            name: share.name,
            path: share.path,
            username: share.username,
            password: share.password,
            auto_connect: share.auto_connect,
            is_connected: share.is_connected,
            created_at: to_rfc3339(&share.created_at),
        }
    }
}

/// File or folder in a share.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub name: String,
    /// Canonical path, e.g. `/Documents/meeting_notes.docx`.
    pub path: String,
    /// `file` or `folder`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            kind: entry.kind.as_str().to_string(),
            name: entry.name,
            path: entry.path,
            size: entry.size,
            mime_type: entry.mime_type,
            modified_at: entry.modified_at.as_ref().map(to_rfc3339),
        }
    }
}

/// Convert a list of entries.
pub fn entry_list(entries: Vec<Entry>) -> Vec<EntryResponse> {
    entries.into_iter().map(EntryResponse::from).collect()
}

/// One breadcrumb step.
#[derive(Debug, Serialize, ToSchema)]
pub struct BreadcrumbResponse {
    pub name: String,
    /// Relative cumulative path (`""` for the share root).
    pub path: String,
}

impl From<BreadcrumbItem> for BreadcrumbResponse {
    fn from(item: BreadcrumbItem) -> Self {
        Self {
            name: item.name,
            path: item.path,
        }
    }
}

/// Outcome of a connect or disconnect request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatusResponse {
    pub share_id: i64,
    pub is_connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ConnectionStatus> for ConnectionStatusResponse {
    fn from(status: ConnectionStatus) -> Self {
        Self {
            share_id: status.share_id,
            is_connected: status.is_connected,
            error: status.error,
        }
    }
}

/// Outcome of a delete request.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: bool,
}
