//! Virtual tree operations over a flat entry store.
//!
//! Every path argument is normalized here before it reaches a store, so
//! callers may pass root as `""` or `"/"` and relative or absolute paths
//! interchangeably.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info};

use super::entry::{BreadcrumbItem, Entry, FileMeta, FileUpdate, FileWrite, NewEntry};
use super::path;
use super::store::EntryStore;
use crate::share::{Share, ShareStore};
use crate::{ExplorerError, Result};

/// Hierarchical view of each share's entries.
#[derive(Clone)]
pub struct VirtualTree {
    shares: Arc<dyn ShareStore>,
    entries: Arc<dyn EntryStore>,
}

impl VirtualTree {
    /// Create a tree over the given stores.
    pub fn new(shares: Arc<dyn ShareStore>, entries: Arc<dyn EntryStore>) -> Self {
        Self { shares, entries }
    }

    async fn require_share(&self, share_id: i64) -> Result<Share> {
        self.shares
            .get(share_id)
            .await?
            .ok_or_else(|| ExplorerError::NotFound(format!("share {share_id}")))
    }

    /// Check that a canonical path is the root or an existing folder.
    async fn resolve_folder(&self, share_id: i64, folder: &str) -> Result<()> {
        if path::is_root(folder) {
            return Ok(());
        }

        match self.entries.get(share_id, folder).await? {
            Some(entry) if entry.is_folder() => Ok(()),
            Some(_) => Err(ExplorerError::InvalidPath(format!("{folder} is not a folder"))),
            None => Err(ExplorerError::NotFound(format!("folder {folder}"))),
        }
    }

    /// List the direct children of a folder, folders first, then by name.
    pub async fn list_children(&self, share_id: i64, folder: &str) -> Result<Vec<Entry>> {
        self.require_share(share_id).await?;
        let folder = path::normalize(folder)?;
        self.resolve_folder(share_id, &folder).await?;

        let mut children = self.entries.list_by_parent(share_id, &folder).await?;
        sort_entries(&mut children);

        Ok(children)
    }

    /// Find direct children of `folder` whose name contains `query`,
    /// ignoring case.
    pub async fn search(&self, share_id: i64, folder: &str, query: &str) -> Result<Vec<Entry>> {
        let needle = search_needle(query)?;
        let children = self.list_children(share_id, folder).await?;

        Ok(children
            .into_iter()
            .filter(|e| name_matches(e, &needle))
            .collect())
    }

    /// Find matching entries anywhere below `folder`, breadth first.
    pub async fn search_recursive(
        &self,
        share_id: i64,
        folder: &str,
        query: &str,
    ) -> Result<Vec<Entry>> {
        let needle = search_needle(query)?;
        self.require_share(share_id).await?;
        let start = path::normalize(folder)?;
        self.resolve_folder(share_id, &start).await?;

        let mut matches = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            let mut children = self.entries.list_by_parent(share_id, &current).await?;
            sort_entries(&mut children);

            for child in children {
                if child.is_folder() {
                    queue.push_back(child.path.clone());
                }
                if name_matches(&child, &needle) {
                    matches.push(child);
                }
            }
        }

        Ok(matches)
    }

    /// Build the navigation trail from the share root to `target`.
    ///
    /// The target does not need to exist.
    pub async fn breadcrumb(&self, share_id: i64, target: &str) -> Result<Vec<BreadcrumbItem>> {
        let share = self.require_share(share_id).await?;
        let target = path::normalize(target)?;

        let mut trail = vec![BreadcrumbItem::new(
            share.name,
            path::to_relative(path::ROOT),
        )];
        let mut current = path::ROOT.to_string();
        for segment in path::segments(&target) {
            current = path::join(&current, segment);
            trail.push(BreadcrumbItem::new(segment, path::to_relative(&current)));
        }

        Ok(trail)
    }

    /// Get the entry at a path.
    pub async fn get_entry(&self, share_id: i64, entry_path: &str) -> Result<Option<Entry>> {
        self.require_share(share_id).await?;
        let entry_path = path::normalize(entry_path)?;
        if path::is_root(&entry_path) {
            return Ok(None);
        }

        self.entries.get(share_id, &entry_path).await
    }

    /// Create a folder named `name` inside `parent`.
    pub async fn create_folder(&self, share_id: i64, parent: &str, name: &str) -> Result<Entry> {
        self.require_share(share_id).await?;
        let name = path::validate_name(name)?;
        let parent = path::normalize(parent)?;
        self.resolve_folder(share_id, &parent).await?;

        let full_path = path::join(&parent, &name);
        let folder = self
            .entries
            .insert(&NewEntry::folder(share_id, full_path).with_modified_at(crate::datetime::now()))
            .await?;
        info!("Created folder {} in share {}", folder.path, share_id);

        Ok(folder)
    }

    /// Create a file named `name` inside `parent`, overwriting an existing
    /// file with the same name.
    pub async fn create_file(
        &self,
        share_id: i64,
        parent: &str,
        name: &str,
        size: i64,
        mime_type: Option<String>,
    ) -> Result<Entry> {
        let meta = FileMeta {
            size,
            mime_type,
            stored_name: None,
        };
        Ok(self.write_file(share_id, parent, name, meta).await?.entry)
    }

    /// Create or overwrite a file, reporting what was replaced.
    ///
    /// An existing file keeps its ID and creation time. An existing folder
    /// at the target path is a conflict.
    pub async fn write_file(
        &self,
        share_id: i64,
        parent: &str,
        name: &str,
        meta: FileMeta,
    ) -> Result<FileWrite> {
        if meta.size < 0 {
            return Err(ExplorerError::InvalidArgument(
                "file size must not be negative".to_string(),
            ));
        }
        self.require_share(share_id).await?;
        let name = path::validate_name(name)?;
        let parent = path::normalize(parent)?;
        self.resolve_folder(share_id, &parent).await?;

        let full_path = path::join(&parent, &name);
        let now = crate::datetime::now();

        if let Some(existing) = self.entries.get(share_id, &full_path).await? {
            if existing.is_folder() {
                return Err(ExplorerError::Conflict(format!(
                    "{full_path} already exists as a folder"
                )));
            }

            let update = FileUpdate {
                size: meta.size,
                mime_type: meta.mime_type,
                stored_name: meta.stored_name.clone(),
                modified_at: now,
            };
            let entry = self
                .entries
                .update_file(existing.id, &update)
                .await?
                .ok_or_else(|| ExplorerError::NotFound(full_path.clone()))?;
            debug!("Overwrote file {} in share {}", entry.path, share_id);

            let previous_stored_name = existing
                .stored_name
                .filter(|old| meta.stored_name.as_ref() != Some(old));

            return Ok(FileWrite {
                entry,
                replaced: true,
                previous_stored_name,
            });
        }

        let entry = self
            .entries
            .insert(
                &NewEntry::file(share_id, full_path, meta.size, meta.mime_type)
                    .with_stored_name(meta.stored_name)
                    .with_modified_at(now),
            )
            .await?;
        info!("Created file {} in share {}", entry.path, share_id);

        Ok(FileWrite {
            entry,
            replaced: false,
            previous_stored_name: None,
        })
    }

    /// Delete an entry and, for folders, everything below it.
    ///
    /// Returns whether anything was removed.
    pub async fn delete_entry(&self, share_id: i64, entry_path: &str) -> Result<bool> {
        Ok(!self.remove_entry(share_id, entry_path).await?.is_empty())
    }

    /// Delete an entry and its descendants, returning the removed entries.
    pub async fn remove_entry(&self, share_id: i64, entry_path: &str) -> Result<Vec<Entry>> {
        self.require_share(share_id).await?;
        let entry_path = path::normalize(entry_path)?;
        if path::is_root(&entry_path) {
            return Err(ExplorerError::InvalidPath(
                "the share root cannot be deleted".to_string(),
            ));
        }

        let removed = self.entries.delete_subtree(share_id, &entry_path).await?;
        if !removed.is_empty() {
            info!(
                "Deleted {} ({} entries) from share {}",
                entry_path,
                removed.len(),
                share_id
            );
        }

        Ok(removed)
    }
}

fn search_needle(query: &str) -> Result<String> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ExplorerError::InvalidArgument(
            "search query is required".to_string(),
        ));
    }
    Ok(query.to_lowercase())
}

fn name_matches(entry: &Entry, needle: &str) -> bool {
    entry.name.to_lowercase().contains(needle)
}

fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}
