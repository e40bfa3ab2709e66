//! Redis-backed project store.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use redis::AsyncCommands;

use crate::project::types::Project;
use crate::store::{ProjectStore, StoreError};

/// Key prefix for project documents.
const PROJECT_KEY_PREFIX: &str = "project:";

/// Set of all known project ids.
const INDEX_KEY: &str = "projects:index";

/// Projects as JSON documents under `project:{id}`, with an id index set
/// for listing.
pub struct RedisProjectStore {
    client: Arc<redis::Client>,
}

impl RedisProjectStore {
    pub fn new(client: Arc<redis::Client>) -> Self {
        Self { client }
    }

    fn key(id: &str) -> String {
        format!("{}{}", PROJECT_KEY_PREFIX, id)
    }

    fn parse(id: &str, raw: &str) -> Result<Project, StoreError> {
        serde_json::from_str(raw)
            .map_err(|e| StoreError::Corrupt(format!("project {}: {}", id, e)))
    }
}

#[async_trait]
impl ProjectStore for RedisProjectStore {
    async fn get(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(Self::key(id)).await?;
        raw.map(|raw| Self::parse(id, &raw)).transpose()
    }

    async fn put(&self, project: &Project) -> Result<(), StoreError> {
        let body = serde_json::to_string(project)
            .map_err(|e| StoreError::Corrupt(format!("project {}: {}", project.id, e)))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = redis::pipe()
            .atomic()
            .set(Self::key(&project.id), body)
            .sadd(INDEX_KEY, &project.id)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Project>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let ids: Vec<String> = conn.smembers(INDEX_KEY).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| Self::key(id)).collect();
        let raws: Vec<Option<String>> = conn.mget(keys).await?;

        let mut projects = Vec::with_capacity(ids.len());
        for (id, raw) in ids.iter().zip(raws) {
            match raw {
                Some(raw) => projects.push(Self::parse(id, &raw)?),
                // Index entry without a document: stale index, skip it.
                None => warn!("Project {} is indexed but has no document", id),
            }
        }
        Ok(projects)
    }
}
