//! Virtual file tree for SMB shares.
//!
//! Entries are stored as flat rows tagged with a canonical path. This module
//! derives the hierarchy from those paths: direct-children listing, search,
//! breadcrumbs and cascading deletes.

mod entry;
mod memory;
pub mod path;
mod service;
mod sqlite;
mod store;

pub use entry::{
    BreadcrumbItem, Entry, EntryKind, FileMeta, FileUpdate, FileWrite, NewEntry,
};
pub use memory::MemoryEntryStore;
pub use service::VirtualTree;
pub use sqlite::SqliteEntryStore;
pub use store::EntryStore;
