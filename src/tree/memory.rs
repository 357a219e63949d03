//! In-memory entry store, used by tests and embedders without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::entry::{Entry, FileUpdate, NewEntry};
use super::path;
use super::store::EntryStore;
use crate::{ExplorerError, Result};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    entries: Vec<Entry>,
}

/// Entry store holding rows in a vector, preserving insertion order.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    state: RwLock<State>,
}

impl MemoryEntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn in_subtree(entry: &Entry, share_id: i64, path: &str, prefix: &str) -> bool {
    entry.share_id == share_id && (entry.path == path || entry.path.starts_with(prefix))
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn get(&self, share_id: i64, path: &str) -> Result<Option<Entry>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .iter()
            .find(|e| e.share_id == share_id && e.path == path)
            .cloned())
    }

    async fn list_by_parent(&self, share_id: i64, parent_path: &str) -> Result<Vec<Entry>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.share_id == share_id && e.parent_path == parent_path)
            .cloned()
            .collect())
    }

    async fn insert(&self, entry: &NewEntry) -> Result<Entry> {
        let mut state = self.state.write().await;

        if state
            .entries
            .iter()
            .any(|e| e.share_id == entry.share_id && e.path == entry.path)
        {
            return Err(ExplorerError::Conflict(format!("{} already exists", entry.path)));
        }

        state.next_id += 1;
        let created = Entry {
            id: state.next_id,
            share_id: entry.share_id,
            name: entry.name.clone(),
            path: entry.path.clone(),
            parent_path: entry.parent_path.clone(),
            kind: entry.kind,
            size: entry.size,
            mime_type: entry.mime_type.clone(),
            stored_name: entry.stored_name.clone(),
            modified_at: entry.modified_at,
            created_at: crate::datetime::now(),
        };
        state.entries.push(created.clone());

        Ok(created)
    }

    async fn update_file(&self, id: i64, update: &FileUpdate) -> Result<Option<Entry>> {
        let mut state = self.state.write().await;

        let Some(entry) = state
            .entries
            .iter_mut()
            .find(|e| e.id == id && e.is_file())
        else {
            return Ok(None);
        };

        entry.size = Some(update.size);
        entry.mime_type = update.mime_type.clone();
        entry.stored_name = update.stored_name.clone();
        entry.modified_at = Some(update.modified_at);

        Ok(Some(entry.clone()))
    }

    async fn delete_subtree(&self, share_id: i64, path: &str) -> Result<Vec<Entry>> {
        let prefix = path::descendant_prefix(path);
        let mut state = self.state.write().await;

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.entries)
            .into_iter()
            .partition(|e| in_subtree(e, share_id, path, &prefix));
        state.entries = kept;

        Ok(removed)
    }

    async fn delete_share(&self, share_id: i64) -> Result<Vec<Entry>> {
        let mut state = self.state.write().await;

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.entries)
            .into_iter()
            .partition(|e| e.share_id == share_id);
        state.entries = kept;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryEntryStore::new();
        let a = store.insert(&NewEntry::folder(1, "/a")).await.unwrap();
        let b = store.insert(&NewEntry::folder(1, "/b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_same_path_in_different_shares() {
        let store = MemoryEntryStore::new();
        store.insert(&NewEntry::folder(1, "/a")).await.unwrap();
        store.insert(&NewEntry::folder(2, "/a")).await.unwrap();

        let result = store.insert(&NewEntry::folder(1, "/a")).await;
        assert!(matches!(result, Err(ExplorerError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_share_only_removes_that_share() {
        let store = MemoryEntryStore::new();
        store.insert(&NewEntry::folder(1, "/a")).await.unwrap();
        store.insert(&NewEntry::folder(1, "/a/b")).await.unwrap();
        store.insert(&NewEntry::folder(2, "/a")).await.unwrap();

        let removed = store.delete_share(1).await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(store.get(2, "/a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_subtree() {
        let store = MemoryEntryStore::new();
        store.insert(&NewEntry::folder(1, "/a")).await.unwrap();
        store.insert(&NewEntry::file(1, "/a/x", 1, None)).await.unwrap();
        store.insert(&NewEntry::folder(1, "/ab")).await.unwrap();

        let removed = store.delete_subtree(1, "/a").await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(store.get(1, "/ab").await.unwrap().is_some());
    }
}
