use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{NewCacheEntry, RepoError, TransformCacheRepo};
use crate::domain::entities::CacheEntryRecord;

use super::{PostgresRepositories, map_sqlx_error};

const CACHE_KEY_CONSTRAINT: &str = "cache_entries_input_text_key";

#[derive(sqlx::FromRow)]
struct CacheEntryRow {
    id: Uuid,
    input_text: String,
    transformed_text: String,
    created_at: OffsetDateTime,
}

impl From<CacheEntryRow> for CacheEntryRecord {
    fn from(row: CacheEntryRow) -> Self {
        Self {
            id: row.id,
            input_text: row.input_text,
            transformed_text: row.transformed_text,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TransformCacheRepo for PostgresRepositories {
    async fn find(&self, input_text: &str) -> Result<Option<CacheEntryRecord>, RepoError> {
        let row = sqlx::query_as::<_, CacheEntryRow>(
            "SELECT id, input_text, transformed_text, created_at \
             FROM cache_entries \
             WHERE input_text = $1",
        )
        .bind(input_text)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(CacheEntryRecord::from))
    }

    async fn insert(&self, entry: NewCacheEntry) -> Result<CacheEntryRecord, RepoError> {
        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();

        // ON CONFLICT DO NOTHING keeps the write atomic; an absent RETURNING
        // row means another writer holds the key.
        let row = sqlx::query_as::<_, CacheEntryRow>(
            "INSERT INTO cache_entries (id, input_text, transformed_text, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (input_text) DO NOTHING \
             RETURNING id, input_text, transformed_text, created_at",
        )
        .bind(id)
        .bind(&entry.input_text)
        .bind(&entry.transformed_text)
        .bind(now)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(CacheEntryRecord::from).ok_or(RepoError::Duplicate {
            constraint: CACHE_KEY_CONSTRAINT.to_string(),
        })
    }
}
