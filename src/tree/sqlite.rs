//! SQLite-backed entry store.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::entry::{Entry, FileUpdate, NewEntry};
use super::path;
use super::store::EntryStore;
use crate::{ExplorerError, Result};

const ENTRY_COLUMNS: &str = "id, share_id, name, path, parent_path, type, size, mime_type, \
                             stored_name, modified_at, created_at";

/// Entry store over the `file_items` table.
#[derive(Debug, Clone)]
pub struct SqliteEntryStore {
    pool: SqlitePool,
}

impl SqliteEntryStore {
    /// Create a new store on the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for SqliteEntryStore {
    async fn get(&self, share_id: i64, path: &str) -> Result<Option<Entry>> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM file_items WHERE share_id = ? AND path = ?");
        let entry = sqlx::query_as::<_, Entry>(&sql)
            .bind(share_id)
            .bind(path)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    async fn list_by_parent(&self, share_id: i64, parent_path: &str) -> Result<Vec<Entry>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM file_items
             WHERE share_id = ? AND parent_path = ? ORDER BY id"
        );
        let entries = sqlx::query_as::<_, Entry>(&sql)
            .bind(share_id)
            .bind(parent_path)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn insert(&self, entry: &NewEntry) -> Result<Entry> {
        let sql = format!(
            "INSERT INTO file_items
                 (share_id, name, path, parent_path, type, size, mime_type, stored_name,
                  modified_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&sql)
            .bind(entry.share_id)
            .bind(&entry.name)
            .bind(&entry.path)
            .bind(&entry.parent_path)
            .bind(entry.kind.as_str())
            .bind(entry.size)
            .bind(&entry.mime_type)
            .bind(&entry.stored_name)
            .bind(entry.modified_at)
            .bind(crate::datetime::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match ExplorerError::from(e) {
                ExplorerError::Conflict(_) => {
                    ExplorerError::Conflict(format!("{} already exists", entry.path))
                }
                other => other,
            })
    }

    async fn update_file(&self, id: i64, update: &FileUpdate) -> Result<Option<Entry>> {
        let sql = format!(
            "UPDATE file_items SET size = ?, mime_type = ?, stored_name = ?, modified_at = ?
             WHERE id = ? AND type = 'file'
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, Entry>(&sql)
            .bind(update.size)
            .bind(&update.mime_type)
            .bind(&update.stored_name)
            .bind(update.modified_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    async fn delete_subtree(&self, share_id: i64, path: &str) -> Result<Vec<Entry>> {
        let prefix = path::descendant_prefix(path);
        let sql = format!(
            "DELETE FROM file_items
             WHERE share_id = ? AND (path = ? OR substr(path, 1, ?) = ?)
             RETURNING {ENTRY_COLUMNS}"
        );
        let removed = sqlx::query_as::<_, Entry>(&sql)
            .bind(share_id)
            .bind(path)
            .bind(prefix.chars().count() as i64)
            .bind(&prefix)
            .fetch_all(&self.pool)
            .await?;

        Ok(removed)
    }

    async fn delete_share(&self, share_id: i64) -> Result<Vec<Entry>> {
        let sql = format!("DELETE FROM file_items WHERE share_id = ? RETURNING {ENTRY_COLUMNS}");
        let removed = sqlx::query_as::<_, Entry>(&sql)
            .bind(share_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::tree::entry::EntryKind;

    async fn setup() -> (Database, SqliteEntryStore, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let share_id: i64 = sqlx::query_scalar(
            "INSERT INTO smb_shares (name, path, created_at) VALUES ('Test', '//t/s', '2024-01-01T00:00:00Z')
             RETURNING id",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        let store = SqliteEntryStore::new(db.pool().clone());
        (db, store, share_id)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (_db, store, share_id) = setup().await;

        let created = store
            .insert(&NewEntry::file(share_id, "/data.xlsx", 512000, None))
            .await
            .unwrap();
        assert_eq!(created.name, "data.xlsx");
        assert_eq!(created.parent_path, "/");
        assert_eq!(created.kind, EntryKind::File);

        let fetched = store.get(share_id, "/data.xlsx").await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(store.get(share_id, "/missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let (_db, store, share_id) = setup().await;

        store.insert(&NewEntry::folder(share_id, "/Documents")).await.unwrap();
        let result = store.insert(&NewEntry::folder(share_id, "/Documents")).await;

        assert!(matches!(result, Err(ExplorerError::Conflict(msg)) if msg.contains("/Documents")));
    }

    #[tokio::test]
    async fn test_list_by_parent_only_direct_children() {
        let (_db, store, share_id) = setup().await;

        store.insert(&NewEntry::folder(share_id, "/Documents")).await.unwrap();
        store.insert(&NewEntry::folder(share_id, "/Documents/contracts")).await.unwrap();
        store
            .insert(&NewEntry::file(share_id, "/Documents/contracts/c.pdf", 10, None))
            .await
            .unwrap();

        let root = store.list_by_parent(share_id, "/").await.unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].path, "/Documents");

        let docs = store.list_by_parent(share_id, "/Documents").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path, "/Documents/contracts");
    }

    #[tokio::test]
    async fn test_delete_subtree_does_not_touch_siblings_with_common_prefix() {
        let (_db, store, share_id) = setup().await;

        store.insert(&NewEntry::folder(share_id, "/Doc")).await.unwrap();
        store.insert(&NewEntry::file(share_id, "/Doc/a.txt", 1, None)).await.unwrap();
        store.insert(&NewEntry::folder(share_id, "/Documents")).await.unwrap();

        let removed = store.delete_subtree(share_id, "/Doc").await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(store.get(share_id, "/Documents").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_file_skips_folders() {
        let (_db, store, share_id) = setup().await;

        let folder = store.insert(&NewEntry::folder(share_id, "/f")).await.unwrap();
        let update = FileUpdate {
            size: 5,
            mime_type: None,
            stored_name: None,
            modified_at: crate::datetime::now(),
        };
        assert!(store.update_file(folder.id, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_share_delete_cascades_rows() {
        let (db, store, share_id) = setup().await;
        store.insert(&NewEntry::folder(share_id, "/Documents")).await.unwrap();

        sqlx::query("DELETE FROM smb_shares WHERE id = ?")
            .bind(share_id)
            .execute(db.pool())
            .await
            .unwrap();

        assert!(store.list_by_parent(share_id, "/").await.unwrap().is_empty());
    }
}
