use std::sync::Arc;

use storage::repository::KeyValueRepository;
use tracing::warn;

use crate::error::BestScoreError;

/// Storage key the best score is kept under.
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Loads and raises the best score across quiz runs.
///
/// The stored value is JSON encoded. Anything that is missing, unreadable or
/// not a non-negative integer reads as 0.
#[derive(Clone)]
pub struct BestScoreService {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
}

impl BestScoreService {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self {
            repo,
            key: BEST_SCORE_KEY.to_owned(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current best score, or 0 if none is stored or it cannot be read.
    pub async fn load(&self) -> u32 {
        match self.repo.get_value(&self.key).await {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|| {
                warn!(key = %self.key, raw = %raw, "ignoring malformed best score");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(key = %self.key, error = %err, "could not read best score");
                0
            }
        }
    }

    /// Persist `max(load(), candidate)` and return it.
    ///
    /// # Errors
    ///
    /// Returns `BestScoreError` if the value cannot be encoded or stored.
    pub async fn save(&self, candidate: u32) -> Result<u32, BestScoreError> {
        let best = self.load().await.max(candidate);
        let encoded = serde_json::to_string(&best)?;
        self.repo.put_value(&self.key, &encoded).await?;
        Ok(best)
    }
}

fn decode(raw: &str) -> Option<u32> {
    serde_json::from_str::<u32>(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storage::repository::{InMemoryRepository, StorageError};

    struct BrokenRepository;

    #[async_trait]
    impl KeyValueRepository for BrokenRepository {
        async fn get_value(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn put_value(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    fn service(repo: &InMemoryRepository) -> BestScoreService {
        BestScoreService::new(Arc::new(repo.clone()))
    }

    #[test]
    fn decode_accepts_only_non_negative_integers() {
        assert_eq!(decode("7"), Some(7));
        assert_eq!(decode(" 12\n"), Some(12));
        assert_eq!(decode("-1"), None);
        assert_eq!(decode("null"), None);
        assert_eq!(decode("\"3\""), None);
        assert_eq!(decode("{oops"), None);
        assert_eq!(decode(""), None);
    }

    #[tokio::test]
    async fn missing_value_loads_as_zero() {
        let repo = InMemoryRepository::new();
        assert_eq!(service(&repo).load().await, 0);
    }

    #[tokio::test]
    async fn corrupt_value_loads_as_zero() {
        let repo = InMemoryRepository::new();
        repo.put_value(BEST_SCORE_KEY, "not json").await.unwrap();
        assert_eq!(service(&repo).load().await, 0);
    }

    #[tokio::test]
    async fn save_keeps_the_maximum() {
        let repo = InMemoryRepository::new();
        let scores = service(&repo);

        assert_eq!(scores.save(4).await.unwrap(), 4);
        assert_eq!(scores.save(2).await.unwrap(), 4);
        assert_eq!(scores.save(9).await.unwrap(), 9);
        assert_eq!(scores.load().await, 9);
        assert_eq!(
            repo.get_value(BEST_SCORE_KEY).await.unwrap().as_deref(),
            Some("9")
        );
    }

    #[tokio::test]
    async fn save_is_monotonic_for_arbitrary_inputs() {
        let repo = InMemoryRepository::new();
        let scores = service(&repo);
        let mut previous = 0;

        for candidate in [3, 0, 10, 7, 10, 1, 11, 2] {
            let best = scores.save(candidate).await.unwrap();
            assert_eq!(best, previous.max(candidate));
            assert!(best >= previous);
            previous = best;
        }
    }

    #[tokio::test]
    async fn save_overwrites_corrupt_value() {
        let repo = InMemoryRepository::new();
        repo.put_value(BEST_SCORE_KEY, "[1,2]").await.unwrap();
        let scores = service(&repo);

        assert_eq!(scores.save(3).await.unwrap(), 3);
        assert_eq!(scores.load().await, 3);
    }

    #[tokio::test]
    async fn custom_key_is_isolated() {
        let repo = InMemoryRepository::new();
        let default = service(&repo);
        let other = service(&repo).with_key("otherQuiz");

        other.save(5).await.unwrap();

        assert_eq!(other.key(), "otherQuiz");
        assert_eq!(default.load().await, 0);
        assert_eq!(other.load().await, 5);
    }

    #[tokio::test]
    async fn unreadable_storage_loads_as_zero_and_save_reports() {
        let scores = BestScoreService::new(Arc::new(BrokenRepository));
        assert_eq!(scores.load().await, 0);
        let err = scores.save(1).await.unwrap_err();
        assert!(matches!(err, BestScoreError::Storage(_)));
    }
}
