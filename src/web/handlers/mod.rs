//! API handlers.

pub mod browse;
pub mod share;
pub mod transfer;

pub use browse::*;
pub use share::*;
pub use transfer::*;

use tracing::warn;

use crate::content::ContentStorage;
use crate::share::ShareService;
use crate::tree::{Entry, VirtualTree};
use crate::web::middleware::AccessTokens;

/// Default upload limit (50MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Shared state of the API handlers.
pub struct AppState {
    /// Virtual tree operations.
    pub tree: VirtualTree,
    /// Share management and sessions.
    pub shares: ShareService,
    /// Uploaded file bodies.
    pub content: ContentStorage,
    /// Maximum size of a single uploaded file in bytes.
    pub max_upload_size: usize,
    /// Guards for privileged routes.
    pub tokens: AccessTokens,
}

impl AppState {
    /// Create a new state with open guards and the default upload limit.
    pub fn new(tree: VirtualTree, shares: ShareService, content: ContentStorage) -> Self {
        Self {
            tree,
            shares,
            content,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            tokens: AccessTokens::open(),
        }
    }

    /// Set the upload limit in bytes.
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Set the route guards.
    pub fn with_tokens(mut self, tokens: AccessTokens) -> Self {
        self.tokens = tokens;
        self
    }

    /// Remove the stored bodies of deleted entries.
    ///
    /// Failures are logged; the entries are already gone.
    pub async fn release_content(&self, entries: &[Entry]) {
        for key in entries.iter().filter_map(|e| e.stored_name.as_deref()) {
            if let Err(e) = self.content.delete(key).await {
                warn!("Failed to remove content {}: {}", key, e);
            }
        }
    }
}
