//! Share management and connection lifecycle.

use std::sync::Arc;

use tracing::{info, warn};

use super::session::{SessionRegistry, ShareSession};
use super::store::ShareStore;
use super::types::{ConnectionStatus, NewShare, Share};
use crate::tree::{Entry, EntryStore};
use crate::{ExplorerError, Result};

/// Share CRUD plus mock connect/disconnect.
#[derive(Clone)]
pub struct ShareService {
    shares: Arc<dyn ShareStore>,
    entries: Arc<dyn EntryStore>,
    sessions: Arc<SessionRegistry>,
}

impl ShareService {
    /// Create a new service.
    pub fn new(
        shares: Arc<dyn ShareStore>,
        entries: Arc<dyn EntryStore>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            shares,
            entries,
            sessions,
        }
    }

    /// The session registry.
    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// List all shares.
    pub async fn list(&self) -> Result<Vec<Share>> {
        self.shares.list().await
    }

    /// Get a share by ID.
    pub async fn get(&self, id: i64) -> Result<Share> {
        self.shares
            .get(id)
            .await?
            .ok_or_else(|| ExplorerError::NotFound(format!("share {id}")))
    }

    /// Find a share by name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Share>> {
        self.shares.find_by_name(name).await
    }

    /// Create a new share. Name and path are trimmed and must be non-empty.
    pub async fn create(&self, share: NewShare) -> Result<Share> {
        let name = share.name.trim();
        if name.is_empty() {
            return Err(ExplorerError::InvalidArgument(
                "share name is required".to_string(),
            ));
        }
        let path = share.path.trim();
        if path.is_empty() {
            return Err(ExplorerError::InvalidArgument(
                "share path is required".to_string(),
            ));
        }

        let share = NewShare {
            name: name.to_string(),
            path: path.to_string(),
            username: share.username.filter(|u| !u.is_empty()),
            password: share.password.filter(|p| !p.is_empty()),
            auto_connect: share.auto_connect,
        };
        let created = self.shares.insert(&share).await?;
        info!("Created share {} ({})", created.name, created.id);

        Ok(created)
    }

    /// Open a session for a share.
    ///
    /// A rejected path is reported in the returned status rather than as an
    /// error; the persisted flag follows the outcome either way.
    pub async fn connect(&self, id: i64) -> Result<ConnectionStatus> {
        let share = self.get(id).await?;

        match self.sessions.open(&share).await {
            Ok(_) => {
                self.shares.set_connected(id, true).await?;
                info!("Connected share {} ({})", share.name, id);
                Ok(ConnectionStatus::connected(id))
            }
            Err(ExplorerError::ConnectionUnavailable(reason)) => {
                self.shares.set_connected(id, false).await?;
                warn!("Failed to connect share {} ({}): {}", share.name, id, reason);
                Ok(ConnectionStatus::failed(id, reason))
            }
            Err(e) => Err(e),
        }
    }

    /// Close a share's session.
    pub async fn disconnect(&self, id: i64) -> Result<ConnectionStatus> {
        let share = self.get(id).await?;
        self.sessions.close(id).await;
        self.shares.set_connected(id, false).await?;
        info!("Disconnected share {} ({})", share.name, id);

        Ok(ConnectionStatus::disconnected(id))
    }

    /// Delete a share together with all of its entries.
    ///
    /// Returns the removed entries so their content can be released.
    pub async fn delete(&self, id: i64) -> Result<Vec<Entry>> {
        let share = self.get(id).await?;
        self.sessions.close(id).await;

        let removed = self.entries.delete_share(id).await?;
        if !self.shares.delete(id).await? {
            return Err(ExplorerError::NotFound(format!("share {id}")));
        }
        info!(
            "Deleted share {} ({}) with {} entries",
            share.name,
            id,
            removed.len()
        );

        Ok(removed)
    }

    /// Reset connection flags and connect every auto-connect share.
    ///
    /// Failures are logged and skipped. Returns the number of shares
    /// connected.
    pub async fn auto_connect_all(&self) -> Result<usize> {
        self.shares.set_all_disconnected().await?;

        let mut connected = 0;
        for share in self.shares.list().await? {
            if !share.auto_connect {
                continue;
            }
            match self.connect(share.id).await {
                Ok(status) if status.is_connected => connected += 1,
                Ok(_) => {}
                Err(e) => warn!("Auto-connect of share {} failed: {}", share.id, e),
            }
        }

        Ok(connected)
    }

    /// Get the live session of a share.
    pub async fn require_connected(&self, id: i64) -> Result<ShareSession> {
        self.get(id).await?;
        self.sessions.get(id).await.ok_or_else(|| {
            ExplorerError::ConnectionUnavailable("SMB share not connected".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::{MemoryShareStore, INVALID_SHARE_PATH};
    use crate::tree::{MemoryEntryStore, NewEntry};

    fn service() -> (ShareService, Arc<MemoryEntryStore>) {
        let entries = Arc::new(MemoryEntryStore::new());
        let service = ShareService::new(
            Arc::new(MemoryShareStore::new()),
            entries.clone(),
            Arc::new(SessionRegistry::new()),
        );
        (service, entries)
    }

    #[tokio::test]
    async fn test_create_trims_and_validates() {
        let (service, _) = service();

        let share = service
            .create(NewShare::new("  Office ", " //office/docs "))
            .await
            .unwrap();
        assert_eq!(share.name, "Office");
        assert_eq!(share.path, "//office/docs");

        let err = service.create(NewShare::new(" ", "//x/y")).await.unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidArgument(_)));
        let err = service.create(NewShare::new("x", "")).await.unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let (service, _) = service();
        let share = service.create(NewShare::new("A", "//a/s")).await.unwrap();

        let status = service.connect(share.id).await.unwrap();
        assert_eq!(status, ConnectionStatus::connected(share.id));
        assert!(service.get(share.id).await.unwrap().is_connected);
        assert!(service.require_connected(share.id).await.is_ok());

        let status = service.disconnect(share.id).await.unwrap();
        assert!(!status.is_connected);
        assert!(!service.get(share.id).await.unwrap().is_connected);

        let err = service.require_connected(share.id).await.unwrap_err();
        assert!(matches!(err, ExplorerError::ConnectionUnavailable(_)));
    }

    #[tokio::test]
    async fn test_connect_invalid_path_reports_error() {
        let (service, _) = service();
        let share = service
            .create(NewShare::new("Bad", INVALID_SHARE_PATH))
            .await
            .unwrap();

        let status = service.connect(share.id).await.unwrap();
        assert!(!status.is_connected);
        assert_eq!(status.error.as_deref(), Some("Invalid SMB share path"));
        assert!(!service.get(share.id).await.unwrap().is_connected);
    }

    #[tokio::test]
    async fn test_unknown_share_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.connect(42).await,
            Err(ExplorerError::NotFound(_))
        ));
        assert!(matches!(
            service.require_connected(42).await,
            Err(ExplorerError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(42).await,
            Err(ExplorerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_entries_and_session() {
        let (service, entries) = service();
        let share = service.create(NewShare::new("A", "//a/s")).await.unwrap();
        service.connect(share.id).await.unwrap();
        entries.insert(&NewEntry::folder(share.id, "/Documents")).await.unwrap();
        entries
            .insert(&NewEntry::file(share.id, "/Documents/a.txt", 1, None))
            .await
            .unwrap();

        let removed = service.delete(share.id).await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(entries.list_by_parent(share.id, "/").await.unwrap().is_empty());
        assert!(!service.sessions().is_open(share.id).await);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_auto_connect_all() {
        let (service, _) = service();
        let auto = service
            .create(NewShare::new("Auto", "//a/s").with_auto_connect(true))
            .await
            .unwrap();
        let manual = service.create(NewShare::new("Manual", "//m/s")).await.unwrap();
        service
            .create(NewShare::new("Broken", INVALID_SHARE_PATH).with_auto_connect(true))
            .await
            .unwrap();

        assert_eq!(service.auto_connect_all().await.unwrap(), 1);
        assert!(service.get(auto.id).await.unwrap().is_connected);
        assert!(!service.get(manual.id).await.unwrap().is_connected);
    }
}
