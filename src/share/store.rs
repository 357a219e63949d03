//! Persistence capability for shares.

use async_trait::async_trait;

use super::types::{NewShare, Share};
use crate::Result;

/// Storage backend for share records.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// List all shares, oldest first.
    async fn list(&self) -> Result<Vec<Share>>;

    /// Get a share by ID.
    async fn get(&self, id: i64) -> Result<Option<Share>>;

    /// Get the first share with the given name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Share>>;

    /// Insert a new share, initially disconnected.
    async fn insert(&self, share: &NewShare) -> Result<Share>;

    /// Persist the connection flag. Returns `false` if the share is unknown.
    async fn set_connected(&self, id: i64, connected: bool) -> Result<bool>;

    /// Mark every share as disconnected.
    async fn set_all_disconnected(&self) -> Result<()>;

    /// Delete a share. Returns `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool>;
}
