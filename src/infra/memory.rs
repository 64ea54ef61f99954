//! In-memory repositories for database-less deployments.
//!
//! Backs the same repository contracts as the Postgres adapter. Uniqueness of
//! cache keys is enforced by the shard-locked entry API instead of a SQL
//! constraint, so the service layer sees identical `Duplicate` semantics from
//! both backends. Contents are volatile and vanish on restart.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    HealthProbe, NewCacheEntry, PayloadsRepo, RepoError, TransformCacheRepo,
};
use crate::domain::entities::{CacheEntryRecord, PayloadRecord};

pub const CACHE_KEY_CONSTRAINT: &str = "cache_entries_input_text_key";

#[derive(Default)]
pub struct MemoryRepositories {
    cache: DashMap<String, CacheEntryRecord>,
    payloads: DashMap<Uuid, PayloadRecord>,
}

impl MemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn payload_len(&self) -> usize {
        self.payloads.len()
    }
}

#[async_trait]
impl TransformCacheRepo for MemoryRepositories {
    async fn find(&self, input_text: &str) -> Result<Option<CacheEntryRecord>, RepoError> {
        Ok(self.cache.get(input_text).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, entry: NewCacheEntry) -> Result<CacheEntryRecord, RepoError> {
        let record = CacheEntryRecord {
            id: Uuid::new_v4(),
            input_text: entry.input_text.clone(),
            transformed_text: entry.transformed_text,
            created_at: OffsetDateTime::now_utc(),
        };

        match self.cache.entry(entry.input_text) {
            Entry::Occupied(_) => Err(RepoError::Duplicate {
                constraint: CACHE_KEY_CONSTRAINT.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}

#[async_trait]
impl PayloadsRepo for MemoryRepositories {
    async fn insert(&self, record: PayloadRecord) -> Result<(), RepoError> {
        match self.payloads.entry(record.id) {
            Entry::Occupied(_) => Err(RepoError::Duplicate {
                constraint: "payloads_pkey".to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PayloadRecord>, RepoError> {
        Ok(self.payloads.get(&id).map(|record| record.value().clone()))
    }
}

#[async_trait]
impl HealthProbe for MemoryRepositories {
    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
