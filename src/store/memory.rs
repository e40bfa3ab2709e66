//! In-memory project store for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::project::types::Project;
use crate::store::{ProjectStore, StoreError};

/// HashMap-backed store with the same contract as the Redis one.
#[derive(Default)]
pub struct MemoryProjectStore {
    inner: RwLock<HashMap<String, Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn get(&self, id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn put(&self, project: &Project) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .insert(project.id.clone(), project.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }
}
