//! Domain records mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// One memoized transformation.
///
/// `input_text` is unique across all entries. An entry is written exactly
/// once, on the first miss for its input, and is never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntryRecord {
    pub id: Uuid,
    pub input_text: String,
    pub transformed_text: String,
    pub created_at: OffsetDateTime,
}

/// A derived output string stored under a generated identifier.
///
/// Immutable once created; `created_at` is informational only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadRecord {
    pub id: Uuid,
    pub output: String,
    pub created_at: OffsetDateTime,
}
