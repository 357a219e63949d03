//! In-memory share store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::ShareStore;
use super::types::{NewShare, Share};
use crate::Result;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    shares: BTreeMap<i64, Share>,
}

/// Share store keyed by ID in a sorted map.
#[derive(Debug, Default)]
pub struct MemoryShareStore {
    state: RwLock<State>,
}

impl MemoryShareStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn list(&self) -> Result<Vec<Share>> {
        Ok(self.state.read().await.shares.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Share>> {
        Ok(self.state.read().await.shares.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Share>> {
        let state = self.state.read().await;
        Ok(state.shares.values().find(|s| s.name == name).cloned())
    }

    async fn insert(&self, share: &NewShare) -> Result<Share> {
        let mut state = self.state.write().await;
        state.next_id += 1;

        let created = Share {
            id: state.next_id,
            name: share.name.clone(),
            path: share.path.clone(),
            username: share.username.clone(),
            password: share.password.clone(),
            auto_connect: share.auto_connect,
            is_connected: false,
            created_at: crate::datetime::now(),
        };
        state.shares.insert(created.id, created.clone());

        Ok(created)
    }

    async fn set_connected(&self, id: i64, connected: bool) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.shares.get_mut(&id) {
            Some(share) => {
                share.is_connected = connected;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_all_disconnected(&self) -> Result<()> {
        let mut state = self.state.write().await;
        for share in state.shares.values_mut() {
            share.is_connected = false;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.state.write().await.shares.remove(&id).is_some())
    }
}
