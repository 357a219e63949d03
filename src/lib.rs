//! SMB Explorer - web file browser over virtual SMB share trees
//!
//! Shares are registered and connected through a REST API. Each share owns a
//! virtual tree of folders and files stored as flat, path-tagged records,
//! which the API lists, searches, changes and serves for download.

pub mod config;
pub mod content;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod seed;
pub mod share;
pub mod tree;
pub mod web;

pub use config::Config;
pub use content::ContentStorage;
pub use db::Database;
pub use error::{ExplorerError, Result};
pub use share::{ConnectionStatus, NewShare, Share, ShareService};
pub use tree::{BreadcrumbItem, Entry, EntryKind, VirtualTree};
