//! SMB share records and mock connections.

mod memory;
mod service;
mod session;
mod sqlite;
mod store;
mod types;

pub use memory::MemoryShareStore;
pub use service::ShareService;
pub use session::{SessionRegistry, ShareSession, INVALID_SHARE_PATH};
pub use sqlite::SqliteShareStore;
pub use store::ShareStore;
pub use types::{ConnectionStatus, NewShare, Share};
