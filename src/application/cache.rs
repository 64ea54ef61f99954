//! Memoization layer over the transformation seam.
//!
//! `resolve` is get-or-compute: a hit never invokes the transformer, a miss
//! writes exactly one entry. Concurrent misses for the same input race on the
//! persistence layer's uniqueness constraint; the loser adopts the winner's
//! entry instead of surfacing the duplicate to its caller.

use std::sync::Arc;

use metrics::counter;
use tracing::debug;

use crate::application::repos::{NewCacheEntry, RepoError, TransformCacheRepo};
use crate::application::transform::Transformer;

#[derive(Clone)]
pub struct TransformCache {
    repo: Arc<dyn TransformCacheRepo>,
    transformer: Arc<dyn Transformer>,
}

impl TransformCache {
    pub fn new(repo: Arc<dyn TransformCacheRepo>, transformer: Arc<dyn Transformer>) -> Self {
        Self { repo, transformer }
    }

    /// Return the transformed form of `text`, consulting the persistent cache
    /// first.
    ///
    /// A storage failure while persisting a fresh entry fails the whole call;
    /// the computed value is not handed out uncached.
    pub async fn resolve(&self, text: &str) -> Result<String, RepoError> {
        if let Some(entry) = self.repo.find(text).await? {
            counter!("twine_cache_hit_total").increment(1);
            return Ok(entry.transformed_text);
        }

        let transformed = self.transformer.transform(text);
        let entry = NewCacheEntry {
            input_text: text.to_string(),
            transformed_text: transformed,
        };

        match self.repo.insert(entry).await {
            Ok(created) => {
                counter!("twine_cache_miss_total").increment(1);
                Ok(created.transformed_text)
            }
            // A concurrent request cached this input between our lookup and
            // our write. Adopt the winning entry; entries are never deleted,
            // so the re-read must find it.
            Err(RepoError::Duplicate { .. }) => {
                debug!(
                    target = "twine::cache",
                    input_len = text.len(),
                    "lost cache insert race, adopting existing entry"
                );
                counter!("twine_cache_hit_total").increment(1);
                let winner = self.repo.find(text).await?.ok_or_else(|| {
                    RepoError::from_persistence("cache entry missing after duplicate insert")
                })?;
                Ok(winner.transformed_text)
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::domain::entities::CacheEntryRecord;

    #[derive(Default)]
    struct CountingTransformer {
        calls: AtomicUsize,
    }

    impl Transformer for CountingTransformer {
        fn transform(&self, text: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            text.to_uppercase()
        }
    }

    fn entry_for(input: &str, transformed: &str) -> CacheEntryRecord {
        CacheEntryRecord {
            id: Uuid::new_v4(),
            input_text: input.to_string(),
            transformed_text: transformed.to_string(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[derive(Default)]
    struct MapRepo {
        entries: Mutex<HashMap<String, CacheEntryRecord>>,
    }

    #[async_trait]
    impl TransformCacheRepo for MapRepo {
        async fn find(&self, input_text: &str) -> Result<Option<CacheEntryRecord>, RepoError> {
            Ok(self.entries.lock().unwrap().get(input_text).cloned())
        }

        async fn insert(&self, entry: NewCacheEntry) -> Result<CacheEntryRecord, RepoError> {
            let mut entries = self.entries.lock().unwrap();
            if entries.contains_key(&entry.input_text) {
                return Err(RepoError::Duplicate {
                    constraint: "cache_entries_input_text_key".to_string(),
                });
            }
            let record = entry_for(&entry.input_text, &entry.transformed_text);
            entries.insert(entry.input_text, record.clone());
            Ok(record)
        }
    }

    /// Every insert loses the race; the winning entry appears only on the
    /// re-read after the duplicate failure.
    struct LosingRepo {
        winner: CacheEntryRecord,
        finds: AtomicUsize,
    }

    #[async_trait]
    impl TransformCacheRepo for LosingRepo {
        async fn find(&self, _input_text: &str) -> Result<Option<CacheEntryRecord>, RepoError> {
            if self.finds.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(None)
            } else {
                Ok(Some(self.winner.clone()))
            }
        }

        async fn insert(&self, _entry: NewCacheEntry) -> Result<CacheEntryRecord, RepoError> {
            Err(RepoError::Duplicate {
                constraint: "cache_entries_input_text_key".to_string(),
            })
        }
    }

    struct FailingRepo;

    #[async_trait]
    impl TransformCacheRepo for FailingRepo {
        async fn find(&self, _input_text: &str) -> Result<Option<CacheEntryRecord>, RepoError> {
            Ok(None)
        }

        async fn insert(&self, _entry: NewCacheEntry) -> Result<CacheEntryRecord, RepoError> {
            Err(RepoError::Persistence("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn second_resolve_skips_the_transformer() {
        let transformer = Arc::new(CountingTransformer::default());
        let cache = TransformCache::new(Arc::new(MapRepo::default()), transformer.clone());

        assert_eq!(cache.resolve("hello").await.unwrap(), "HELLO");
        assert_eq!(cache.resolve("hello").await.unwrap(), "HELLO");
        assert_eq!(transformer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_string_is_a_valid_key() {
        let transformer = Arc::new(CountingTransformer::default());
        let cache = TransformCache::new(Arc::new(MapRepo::default()), transformer.clone());

        assert_eq!(cache.resolve("").await.unwrap(), "");
        assert_eq!(cache.resolve("").await.unwrap(), "");
        assert_eq!(transformer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn losing_writer_adopts_winning_entry() {
        let repo = LosingRepo {
            winner: entry_for("x", "X"),
            finds: AtomicUsize::new(0),
        };
        let cache = TransformCache::new(Arc::new(repo), Arc::new(CountingTransformer::default()));

        assert_eq!(cache.resolve("x").await.unwrap(), "X");
    }

    #[tokio::test]
    async fn insert_failure_fails_the_request() {
        let cache =
            TransformCache::new(Arc::new(FailingRepo), Arc::new(CountingTransformer::default()));

        match cache.resolve("hello").await {
            Err(RepoError::Persistence(message)) => assert!(message.contains("disk full")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
