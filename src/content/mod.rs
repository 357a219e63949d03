//! Stored file bodies and their MIME classification.

pub mod mime;
mod storage;

pub use storage::ContentStorage;
