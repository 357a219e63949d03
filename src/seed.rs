//! Sample data for a fresh installation.
//!
//! Creates the "Test Server" share with a small directory tree. Seeding is
//! idempotent: nothing happens if a share with that name already exists.

use tracing::{info, warn};

use crate::content::mime;
use crate::share::{NewShare, ShareService};
use crate::tree::{EntryStore, NewEntry};
use crate::{datetime, ExplorerError, Result};

/// Name of the seeded share.
pub const TEST_SHARE_NAME: &str = "Test Server";

/// Root of the seeded share.
pub const TEST_SHARE_PATH: &str = "//test.server/share";

enum SeedKind {
    Folder,
    File(i64),
}

// Parents are listed before their children.
const SAMPLE_TREE: &[(&str, SeedKind, &str)] = &[
    ("/Documents", SeedKind::Folder, "2024-01-15"),
    ("/Images", SeedKind::Folder, "2024-01-10"),
    ("/ALGORITMOS", SeedKind::Folder, "2024-01-15"),
    ("/COMUNICACIONES", SeedKind::Folder, "2024-01-20"),
    ("/report.pdf", SeedKind::File(2_048_576), "2024-01-20"),
    ("/data.xlsx", SeedKind::File(512_000), "2024-01-18"),
    ("/Manual presentacion.xlsx", SeedKind::File(5_242_880), "2024-01-12"),
    ("/Documents/contracts", SeedKind::Folder, "2024-01-14"),
    ("/Documents/meeting_notes.docx", SeedKind::File(128_000), "2024-01-16"),
    ("/Documents/presentation.pptx", SeedKind::File(3_145_728), "2024-01-12"),
    ("/Documents/contracts/contract_2024.pdf", SeedKind::File(1_572_864), "2024-01-14"),
    ("/Documents/contracts/vendor_agreement.pdf", SeedKind::File(2_097_152), "2024-01-13"),
    ("/Images/logo.png", SeedKind::File(204_800), "2024-01-08"),
    ("/Images/banner.jpg", SeedKind::File(1_024_000), "2024-01-09"),
    ("/Images/screenshots", SeedKind::Folder, "2024-01-07"),
];

/// Create the test share and its sample tree if missing.
///
/// Returns whether anything was created.
pub async fn seed_test_share(shares: &ShareService, entries: &dyn EntryStore) -> Result<bool> {
    if shares.find_by_name(TEST_SHARE_NAME).await?.is_some() {
        return Ok(false);
    }

    let share = shares
        .create(NewShare::new(TEST_SHARE_NAME, TEST_SHARE_PATH).with_auto_connect(true))
        .await?;

    // Later runs skip on the name, so no partial tree may remain.
    if let Err(e) = insert_sample_tree(share.id, entries).await {
        if let Err(rollback) = shares.delete(share.id).await {
            warn!("Failed to remove partially seeded share {}: {}", share.id, rollback);
        }
        return Err(e);
    }

    info!(
        "Seeded share {} with {} entries",
        TEST_SHARE_NAME,
        SAMPLE_TREE.len()
    );
    Ok(true)
}

async fn insert_sample_tree(share_id: i64, entries: &dyn EntryStore) -> Result<()> {
    for (path, kind, date) in SAMPLE_TREE {
        let modified_at = datetime::parse_utc(date)
            .ok_or_else(|| ExplorerError::InvalidArgument(format!("bad seed date {date}")))?;
        let entry = match kind {
            SeedKind::Folder => NewEntry::folder(share_id, *path),
            SeedKind::File(size) => {
                let mime_type = mime::classify(path);
                NewEntry::file(share_id, *path, *size, Some(mime_type))
            }
        };
        entries.insert(&entry.with_modified_at(modified_at)).await?;
    }
    Ok(())
}

/// Seed, logging instead of failing.
pub async fn run(shares: &ShareService, entries: &dyn EntryStore) {
    if let Err(e) = seed_test_share(shares, entries).await {
        warn!("Failed to seed test data: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::share::{MemoryShareStore, SessionRegistry};
    use crate::tree::{Entry, FileUpdate, MemoryEntryStore, VirtualTree};

    /// Entry store that refuses one path.
    struct RefusingStore {
        inner: Arc<MemoryEntryStore>,
        refused: &'static str,
    }

    #[async_trait]
    impl EntryStore for RefusingStore {
        async fn get(&self, share_id: i64, path: &str) -> Result<Option<Entry>> {
            self.inner.get(share_id, path).await
        }

        async fn list_by_parent(&self, share_id: i64, parent_path: &str) -> Result<Vec<Entry>> {
            self.inner.list_by_parent(share_id, parent_path).await
        }

        async fn insert(&self, entry: &NewEntry) -> Result<Entry> {
            if entry.path == self.refused {
                return Err(ExplorerError::Database("disk full".to_string()));
            }
            self.inner.insert(entry).await
        }

        async fn update_file(&self, id: i64, update: &FileUpdate) -> Result<Option<Entry>> {
            self.inner.update_file(id, update).await
        }

        async fn delete_subtree(&self, share_id: i64, path: &str) -> Result<Vec<Entry>> {
            self.inner.delete_subtree(share_id, path).await
        }

        async fn delete_share(&self, share_id: i64) -> Result<Vec<Entry>> {
            self.inner.delete_share(share_id).await
        }
    }

    fn setup() -> (ShareService, VirtualTree, Arc<MemoryEntryStore>) {
        let shares = Arc::new(MemoryShareStore::new());
        let entries = Arc::new(MemoryEntryStore::new());
        let service = ShareService::new(
            shares.clone(),
            entries.clone(),
            Arc::new(SessionRegistry::new()),
        );
        let tree = VirtualTree::new(shares, entries.clone());
        (service, tree, entries)
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let (service, _tree, entries) = setup();

        assert!(seed_test_share(&service, entries.as_ref()).await.unwrap());
        assert!(!seed_test_share(&service, entries.as_ref()).await.unwrap());

        let shares = service.list().await.unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].name, TEST_SHARE_NAME);
        assert!(shares[0].auto_connect);
    }

    #[tokio::test]
    async fn test_seeded_tree_shape() {
        let (service, tree, entries) = setup();
        seed_test_share(&service, entries.as_ref()).await.unwrap();
        let share = service.find_by_name(TEST_SHARE_NAME).await.unwrap().unwrap();

        let root = tree.list_children(share.id, "").await.unwrap();
        assert_eq!(root.len(), 7);
        assert!(root[..4].iter().all(|e| e.is_folder()));

        let docs = tree.list_children(share.id, "/Documents").await.unwrap();
        let names: Vec<_> = docs.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["contracts", "meeting_notes.docx", "presentation.pptx"]
        );
        assert_eq!(docs[1].size, Some(128_000));

        let report = tree.get_entry(share.id, "/report.pdf").await.unwrap().unwrap();
        assert_eq!(report.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(
            report.modified_at.map(|d| datetime::to_rfc3339(&d)),
            Some("2024-01-20T00:00:00Z".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_no_partial_share() {
        let (service, _tree, entries) = setup();
        let refusing = RefusingStore {
            inner: entries.clone(),
            refused: "/Images/logo.png",
        };

        let result = seed_test_share(&service, &refusing).await;
        assert!(matches!(result, Err(ExplorerError::Database(_))));
        assert!(service.find_by_name(TEST_SHARE_NAME).await.unwrap().is_none());
        assert!(entries.list_by_parent(1, "/").await.unwrap().is_empty());

        assert!(seed_test_share(&service, entries.as_ref()).await.unwrap());
        let share = service.find_by_name(TEST_SHARE_NAME).await.unwrap().unwrap();
        let root = entries.list_by_parent(share.id, "/").await.unwrap();
        assert_eq!(root.len(), 7);
    }
}
