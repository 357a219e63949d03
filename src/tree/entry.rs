//! Entry types for the virtual tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::path;

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Folder that may contain other entries.
    Folder,
}

impl EntryKind {
    /// Convert to the database/wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Folder => "folder",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(EntryKind::File),
            "folder" => Ok(EntryKind::Folder),
            _ => Err(format!("unknown entry type: {s}")),
        }
    }
}

impl TryFrom<String> for EntryKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A file or folder stored in a share's virtual tree.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Entry {
    /// Unique entry ID.
    pub id: i64,
    /// Owning share.
    pub share_id: i64,
    /// Display name, always the final segment of `path`.
    pub name: String,
    /// Canonical path (`/a/b`).
    pub path: String,
    /// Canonical path of the containing folder (`/` for root children).
    pub parent_path: String,
    /// File or folder.
    #[sqlx(rename = "type", try_from = "String")]
    pub kind: EntryKind,
    /// Size in bytes, `None` for folders.
    pub size: Option<i64>,
    /// MIME classification, `None` for folders.
    pub mime_type: Option<String>,
    /// Key of the uploaded content blob, if any.
    pub stored_name: Option<String>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Whether this entry is a file.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Data for inserting a new entry.
///
/// `name` and `parent_path` are derived from `path`, which must already be
/// canonical.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub share_id: i64,
    pub name: String,
    pub path: String,
    pub parent_path: String,
    pub kind: EntryKind,
    pub size: Option<i64>,
    pub mime_type: Option<String>,
    pub stored_name: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl NewEntry {
    fn new(share_id: i64, canonical_path: impl Into<String>, kind: EntryKind) -> Self {
        let path = canonical_path.into();
        Self {
            share_id,
            name: path::name_of(&path).to_string(),
            parent_path: path::parent_of(&path).to_string(),
            path,
            kind,
            size: None,
            mime_type: None,
            stored_name: None,
            modified_at: None,
        }
    }

    /// A folder at `canonical_path`.
    pub fn folder(share_id: i64, canonical_path: impl Into<String>) -> Self {
        Self::new(share_id, canonical_path, EntryKind::Folder)
    }

    /// A file at `canonical_path` with the given size and MIME type.
    pub fn file(
        share_id: i64,
        canonical_path: impl Into<String>,
        size: i64,
        mime_type: Option<String>,
    ) -> Self {
        let mut entry = Self::new(share_id, canonical_path, EntryKind::File);
        entry.size = Some(size);
        entry.mime_type = mime_type;
        entry
    }

    /// Set the modification time.
    pub fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }

    /// Set the content blob key.
    pub fn with_stored_name(mut self, stored_name: Option<String>) -> Self {
        self.stored_name = stored_name;
        self
    }
}

/// Metadata written when a file is overwritten in place.
#[derive(Debug, Clone)]
pub struct FileUpdate {
    pub size: i64,
    pub mime_type: Option<String>,
    pub stored_name: Option<String>,
    pub modified_at: DateTime<Utc>,
}

/// File metadata supplied by an upload.
#[derive(Debug, Clone, Default)]
pub struct FileMeta {
    /// Size in bytes.
    pub size: i64,
    /// MIME classification.
    pub mime_type: Option<String>,
    /// Key of the stored content blob.
    pub stored_name: Option<String>,
}

/// Outcome of writing a file into the tree.
#[derive(Debug, Clone)]
pub struct FileWrite {
    /// The created or updated entry.
    pub entry: Entry,
    /// Whether an existing file was overwritten.
    pub replaced: bool,
    /// Blob key of the overwritten version, if it differs from the new one.
    pub previous_stored_name: Option<String>,
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    /// Segment name (share name for the first item).
    pub name: String,
    /// Cumulative relative path (`""` for the share root).
    pub path: String,
}

impl BreadcrumbItem {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}
