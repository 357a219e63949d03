//! Logical path handling for the virtual tree.
//!
//! Canonical paths always start with a single `/`, never end with one and
//! never contain empty segments. The share root is `/`. Every path that
//! enters the tree goes through [`normalize`] first, so `""`, `"/"`,
//! `"Documents"` and `"/Documents/"` are all accepted.

use crate::{ExplorerError, Result};

/// Canonical form of the share root.
pub const ROOT: &str = "/";

/// Normalize a user-supplied path into canonical form.
///
/// Backslashes are treated as separators, empty and `.` segments are
/// dropped. `..` is rejected rather than resolved.
pub fn normalize(path: &str) -> Result<String> {
    let mut segments = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(ExplorerError::InvalidPath(format!(
                    "'..' is not allowed in path: {path}"
                )))
            }
            s if s.chars().any(char::is_control) => {
                return Err(ExplorerError::InvalidPath(format!(
                    "control characters are not allowed in path: {}",
                    path.escape_debug()
                )))
            }
            s => segments.push(s),
        }
    }

    Ok(from_segments(&segments))
}

fn from_segments(segments: &[&str]) -> String {
    if segments.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Whether a canonical path is the share root.
pub fn is_root(path: &str) -> bool {
    path == ROOT
}

/// Split a canonical path into its segments (empty for root).
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Parent of a canonical path. The root is its own parent.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => ROOT,
        Some(idx) => &path[..idx],
    }
}

/// Final segment of a canonical path (empty for root).
pub fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Join a canonical folder path and a validated entry name.
pub fn join(parent: &str, name: &str) -> String {
    if is_root(parent) {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Prefix every descendant of a canonical folder path starts with.
pub fn descendant_prefix(path: &str) -> String {
    if is_root(path) {
        ROOT.to_string()
    } else {
        format!("{path}/")
    }
}

/// Relative form used by breadcrumbs: no leading slash, root is `""`.
pub fn to_relative(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Validate and trim a single entry name.
pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ExplorerError::InvalidArgument("name is required".to_string()));
    }
    if name == "." || name == ".." {
        return Err(ExplorerError::InvalidArgument(format!(
            "'{name}' is not a valid name"
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(ExplorerError::InvalidArgument(format!(
            "name must not contain path separators: {name}"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(ExplorerError::InvalidArgument(
            "name must not contain control characters".to_string(),
        ));
    }

    Ok(name.to_string())
}
