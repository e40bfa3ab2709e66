//! Key-based project persistence.
//!
//! Projects are whole JSON documents written last-write-wins; there is no
//! optimistic-concurrency token. Handlers read, merge, and write back.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;

use crate::project::types::Project;

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis operation failed: {0}")]
    Redis(String),

    #[error("Stored document is corrupt: {0}")]
    Corrupt(String),
}

impl From<::redis::RedisError> for StoreError {
    fn from(e: ::redis::RedisError) -> Self {
        StoreError::Redis(e.to_string())
    }
}

/// Simple key-based read/write access to project documents.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Project>, StoreError>;

    async fn put(&self, project: &Project) -> Result<(), StoreError>;

    /// All projects, unordered. Filtering and sorting happen in the API
    /// layer; the store stays a dumb document bag.
    async fn list(&self) -> Result<Vec<Project>, StoreError>;
}
