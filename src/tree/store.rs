//! Persistence capability for tree entries.

use async_trait::async_trait;

use super::entry::{Entry, FileUpdate, NewEntry};
use crate::Result;

/// Storage backend for tree entries.
///
/// Paths passed to a store are always canonical. Implementations must
/// enforce uniqueness of `(share_id, path)` and report a duplicate insert as
/// [`ExplorerError::Conflict`](crate::ExplorerError::Conflict).
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Get the entry at an exact path.
    async fn get(&self, share_id: i64, path: &str) -> Result<Option<Entry>>;

    /// List entries whose parent is `parent_path`, in insertion order.
    async fn list_by_parent(&self, share_id: i64, parent_path: &str) -> Result<Vec<Entry>>;

    /// Insert a new entry.
    async fn insert(&self, entry: &NewEntry) -> Result<Entry>;

    /// Overwrite file metadata in place. Returns `None` if the ID is unknown.
    async fn update_file(&self, id: i64, update: &FileUpdate) -> Result<Option<Entry>>;

    /// Delete the entry at `path` and everything below it.
    ///
    /// Returns the removed entries.
    async fn delete_subtree(&self, share_id: i64, path: &str) -> Result<Vec<Entry>>;

    /// Delete every entry of a share. Returns the removed entries.
    async fn delete_share(&self, share_id: i64) -> Result<Vec<Entry>>;
}
