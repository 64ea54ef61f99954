use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{PayloadsRepo, RepoError};
use crate::domain::entities::PayloadRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct PayloadRow {
    id: Uuid,
    output: String,
    created_at: OffsetDateTime,
}

impl From<PayloadRow> for PayloadRecord {
    fn from(row: PayloadRow) -> Self {
        Self {
            id: row.id,
            output: row.output,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PayloadsRepo for PostgresRepositories {
    async fn insert(&self, record: PayloadRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO payloads (id, output, created_at) \
             VALUES ($1, $2, $3)",
        )
        .bind(record.id)
        .bind(&record.output)
        .bind(record.created_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PayloadRecord>, RepoError> {
        let row = sqlx::query_as::<_, PayloadRow>(
            "SELECT id, output, created_at \
             FROM payloads \
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PayloadRecord::from))
    }
}
