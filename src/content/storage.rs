//! Blob storage for uploaded file bodies.
//!
//! Blobs are named `{uuid}.{ext}` and sharded by the first two characters of
//! the key:
//! ```text
//! {base}/
//! ├── 3f/
//! │   └── 3f0c9a2e-1d4b-4c8e-9a77-5b1e2f3c4d5e.pdf
//! └── a1/
//!     └── a1b2c3d4-0000-4000-8000-000000000000.bin
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::{ExplorerError, Result};

const DEFAULT_EXTENSION: &str = "bin";

/// Filesystem-backed content store.
#[derive(Debug, Clone)]
pub struct ContentStorage {
    base_path: PathBuf,
}

impl ContentStorage {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub async fn open(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Store a new blob and return its key.
    ///
    /// The extension of `file_name` is kept on the key.
    pub async fn save(&self, content: &[u8], file_name: &str) -> Result<String> {
        let key = Self::new_key(file_name);
        self.save_with_key(content, &key).await?;
        Ok(key)
    }

    /// Store a blob under an existing key, replacing any previous body.
    pub async fn save_with_key(&self, content: &[u8], key: &str) -> Result<()> {
        let blob_path = self.blob_path(key)?;
        if let Some(shard) = blob_path.parent() {
            fs::create_dir_all(shard).await?;
        }
        fs::write(&blob_path, content).await?;
        debug!("Stored blob {} ({} bytes)", key, content.len());
        Ok(())
    }

    /// Read a blob.
    pub async fn load(&self, key: &str) -> Result<Vec<u8>> {
        let blob_path = self.blob_path(key)?;
        match fs::read(&blob_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ExplorerError::NotFound(format!("content {key}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a blob. Returns `false` if it did not exist.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let blob_path = self.blob_path(key)?;
        match fs::remove_file(&blob_path).await {
            Ok(()) => {
                debug!("Removed blob {}", key);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Location of a blob on disk.
    ///
    /// Keys are generated by this store; anything that could step outside
    /// the base directory is rejected.
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\'])
            || key.chars().any(char::is_control)
        {
            return Err(ExplorerError::InvalidArgument(format!(
                "invalid content key: {}",
                key.escape_debug()
            )));
        }

        let shard: String = key.chars().take(2).collect();
        Ok(self.base_path.join(shard).join(key))
    }

    /// Generate a fresh key for a file name.
    pub fn new_key(file_name: &str) -> String {
        format!("{}.{}", Uuid::new_v4(), Self::extension_of(file_name))
    }

    /// Extension to keep on a key, `bin` when absent or unusable.
    fn extension_of(file_name: &str) -> &str {
        Path::new(file_name)
            .extension()
            .and_then(|s| s.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or(DEFAULT_EXTENSION)
    }
}
