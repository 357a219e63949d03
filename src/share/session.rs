//! Mock SMB session registry.
//!
//! A session stands in for a live SMB client handle. Opening one only
//! validates the share path; no network traffic takes place.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::types::Share;
use crate::{ExplorerError, Result};

/// Share path that always fails to connect.
pub const INVALID_SHARE_PATH: &str = "//invalid/path";

/// An open session to a share.
#[derive(Debug, Clone)]
pub struct ShareSession {
    /// Share this session belongs to.
    pub share_id: i64,
    /// UNC-like root the session was opened against.
    pub root: String,
    /// When the session was opened.
    pub connected_at: DateTime<Utc>,
}

impl ShareSession {
    /// Content served for files that have no uploaded body.
    pub fn placeholder_content(&self, path: &str) -> Vec<u8> {
        format!(
            "Mock content for file: {path}\n\n\
             This is simulated file content from the virtual SMB share.\n\
             File path: {path}\n"
        )
        .into_bytes()
    }
}

/// Registry of open sessions keyed by share ID.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<i64, ShareSession>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for a share, replacing any existing one.
    pub async fn open(&self, share: &Share) -> Result<ShareSession> {
        let root = share.path.trim();
        if root.is_empty() || root == INVALID_SHARE_PATH {
            return Err(ExplorerError::ConnectionUnavailable(
                "Invalid SMB share path".to_string(),
            ));
        }

        let session = ShareSession {
            share_id: share.id,
            root: root.to_string(),
            connected_at: Utc::now(),
        };
        self.sessions.write().await.insert(share.id, session.clone());
        debug!("Opened session for share {} at {}", share.id, session.root);

        Ok(session)
    }

    /// Close a share's session. Returns whether one was open.
    pub async fn close(&self, share_id: i64) -> bool {
        self.sessions.write().await.remove(&share_id).is_some()
    }

    /// Get the session of a share, if open.
    pub async fn get(&self, share_id: i64) -> Option<ShareSession> {
        self.sessions.read().await.get(&share_id).cloned()
    }

    /// Whether a share has an open session.
    pub async fn is_open(&self, share_id: i64) -> bool {
        self.sessions.read().await.contains_key(&share_id)
    }
}
