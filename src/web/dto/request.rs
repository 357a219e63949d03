//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::share::NewShare;

/// Share creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    /// Display name.
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub name: String,
    /// UNC-like share root, e.g. `//host/share`.
    #[validate(
        length(max = 1024, message = "Path must be at most 1024 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub path: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub auto_connect: bool,
}

impl From<CreateShareRequest> for NewShare {
    fn from(req: CreateShareRequest) -> Self {
        NewShare::new(req.name, req.path)
            .with_credentials(req.username, req.password)
            .with_auto_connect(req.auto_connect)
    }
}

/// Folder creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFolderRequest {
    /// Name of the new folder.
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub name: String,
    /// Parent folder (root when omitted).
    #[serde(default)]
    pub path: String,
}

/// Query carrying a single tree path.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PathQuery {
    /// Path inside the share (root when omitted).
    #[serde(default)]
    pub path: String,
}

/// Search query parameters.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring to match against entry names.
    #[serde(default, alias = "query")]
    pub q: String,
    /// Folder to search in (root when omitted).
    #[serde(default)]
    pub path: String,
    /// Search the whole subtree instead of direct children only.
    #[serde(default)]
    pub recursive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_share_request_camel_case() {
        let req: CreateShareRequest = serde_json::from_str(
            r#"{"name":"Office","path":"//office/docs","autoConnect":true}"#,
        )
        .unwrap();
        assert!(req.auto_connect);
        assert!(req.validate().is_ok());

        let share: NewShare = req.into();
        assert_eq!(share.name, "Office");
        assert!(share.auto_connect);
        assert!(share.username.is_none());
    }

    #[test]
    fn test_create_share_request_rejects_blank_name() {
        let req: CreateShareRequest =
            serde_json::from_str(r#"{"name":"  ","path":"//a/b"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_folder_request_defaults_to_root() {
        let req: CreateFolderRequest = serde_json::from_str(r#"{"name":"Reports"}"#).unwrap();
        assert_eq!(req.path, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_search_query_alias() {
        let q: SearchQuery = serde_json::from_str(r#"{"query":"doc"}"#).unwrap();
        assert_eq!(q.q, "doc");
        assert!(!q.recursive);
    }

    #[test]
    fn test_search_query_missing_q_defaults_to_empty() {
        let q: SearchQuery = serde_json::from_str(r#"{"path":"Documents"}"#).unwrap();
        assert_eq!(q.q, "");
        assert_eq!(q.path, "Documents");
    }
}
