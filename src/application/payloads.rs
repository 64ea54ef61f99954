//! Payload assembly and lifecycle.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::application::cache::TransformCache;
use crate::application::repos::{PayloadsRepo, RepoError};
use crate::domain::entities::PayloadRecord;

/// Separator between interleaved elements in a payload's output.
pub const OUTPUT_SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("input lists must have the same length ({left} != {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("payload not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct PayloadService {
    cache: TransformCache,
    payloads: Arc<dyn PayloadsRepo>,
}

impl PayloadService {
    pub fn new(cache: TransformCache, payloads: Arc<dyn PayloadsRepo>) -> Self {
        Self { cache, payloads }
    }

    /// Resolve both lists through the transformation cache, interleave the
    /// results element-wise, join them and persist the output under a fresh
    /// identifier.
    ///
    /// The length precondition is checked before any cache or store access,
    /// so a mismatch leaves no partial state behind. Two empty lists are
    /// valid and produce an empty output.
    pub async fn create(
        &self,
        list_1: &[String],
        list_2: &[String],
    ) -> Result<PayloadRecord, PayloadError> {
        if list_1.len() != list_2.len() {
            return Err(PayloadError::LengthMismatch {
                left: list_1.len(),
                right: list_2.len(),
            });
        }

        let mut interleaved = Vec::with_capacity(list_1.len() * 2);
        for (first, second) in list_1.iter().zip(list_2) {
            interleaved.push(self.cache.resolve(first).await?);
            interleaved.push(self.cache.resolve(second).await?);
        }
        let output = interleaved.join(OUTPUT_SEPARATOR);

        let record = PayloadRecord {
            id: Uuid::new_v4(),
            output,
            created_at: OffsetDateTime::now_utc(),
        };
        self.payloads.insert(record.clone()).await?;
        counter!("twine_payload_created_total").increment(1);
        debug!(
            target = "twine::payloads",
            id = %record.id,
            elements = interleaved.len(),
            "payload created"
        );

        Ok(record)
    }

    /// Fetch a payload by its textual identifier.
    ///
    /// A malformed identifier is indistinguishable from an absent one; both
    /// report `NotFound`.
    pub async fn get(&self, id: &str) -> Result<PayloadRecord, PayloadError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Err(PayloadError::NotFound);
        };

        self.payloads
            .find_by_id(id)
            .await?
            .ok_or(PayloadError::NotFound)
    }
}
