//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{CacheEntryRecord, PayloadRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct NewCacheEntry {
    pub input_text: String,
    pub transformed_text: String,
}

#[async_trait]
pub trait TransformCacheRepo: Send + Sync {
    async fn find(&self, input_text: &str) -> Result<Option<CacheEntryRecord>, RepoError>;

    /// Atomic insert-if-absent: an already-present `input_text` yields
    /// `RepoError::Duplicate` without writing anything. Callers are expected
    /// to recover by re-reading the existing entry.
    async fn insert(&self, entry: NewCacheEntry) -> Result<CacheEntryRecord, RepoError>;
}

#[async_trait]
pub trait PayloadsRepo: Send + Sync {
    async fn insert(&self, record: PayloadRecord) -> Result<(), RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PayloadRecord>, RepoError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
