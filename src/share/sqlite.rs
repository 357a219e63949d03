//! SQLite-backed share store.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::store::ShareStore;
use super::types::{NewShare, Share};
use crate::Result;

const SHARE_COLUMNS: &str =
    "id, name, path, username, password, auto_connect, is_connected, created_at";

/// Share store over the `smb_shares` table.
#[derive(Debug, Clone)]
pub struct SqliteShareStore {
    pool: SqlitePool,
}

impl SqliteShareStore {
    /// Create a new store on the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for SqliteShareStore {
    async fn list(&self) -> Result<Vec<Share>> {
        let sql = format!("SELECT {SHARE_COLUMNS} FROM smb_shares ORDER BY id");
        let shares = sqlx::query_as::<_, Share>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(shares)
    }

    async fn get(&self, id: i64) -> Result<Option<Share>> {
        let sql = format!("SELECT {SHARE_COLUMNS} FROM smb_shares WHERE id = ?");
        let share = sqlx::query_as::<_, Share>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(share)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Share>> {
        let sql = format!("SELECT {SHARE_COLUMNS} FROM smb_shares WHERE name = ? ORDER BY id LIMIT 1");
        let share = sqlx::query_as::<_, Share>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(share)
    }

    async fn insert(&self, share: &NewShare) -> Result<Share> {
        let sql = format!(
            "INSERT INTO smb_shares (name, path, username, password, auto_connect, is_connected, created_at)
             VALUES (?, ?, ?, ?, ?, 0, ?)
             RETURNING {SHARE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Share>(&sql)
            .bind(&share.name)
            .bind(&share.path)
            .bind(&share.username)
            .bind(&share.password)
            .bind(share.auto_connect)
            .bind(crate::datetime::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn set_connected(&self, id: i64, connected: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE smb_shares SET is_connected = ? WHERE id = ?")
            .bind(connected)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_all_disconnected(&self) -> Result<()> {
        sqlx::query("UPDATE smb_shares SET is_connected = 0")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM smb_shares WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
