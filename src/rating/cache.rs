//! Injected cache for repeated overall rating calculations
//!
//! Scoring is pure, so a result can be reused for the same position and
//! ratings. The cache is owned by whoever builds the calculator; there is
//! no process-wide cache.

use crate::error::{RatingResult, RosterError};
use crate::metrics::MetricsCollector;
use crate::rating::calculator::OverallRatingCalculator;
use crate::rating::weights::AttributeWeights;
use crate::types::{OverallRating, PlayerRatingInput, Position};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Key for a cached score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub position: Position,
    pub ratings: PlayerRatingInput,
}

/// Trait for score cache operations
#[cfg_attr(test, mockall::automock)]
pub trait ScoreCache: Send + Sync {
    fn get(&self, key: &ScoreKey) -> RatingResult<Option<OverallRating>>;

    fn insert(&self, key: ScoreKey, overall: OverallRating) -> RatingResult<()>;

    fn entry_count(&self) -> RatingResult<usize>;

    fn clear(&self) -> RatingResult<()>;
}

/// Bounded in-memory score cache
#[derive(Debug)]
pub struct InMemoryScoreCache {
    scores: RwLock<HashMap<ScoreKey, OverallRating>>,
    capacity: usize,
}

impl InMemoryScoreCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            scores: RwLock::new(HashMap::new()),
            capacity,
        }
    }
}

impl Default for InMemoryScoreCache {
    fn default() -> Self {
        Self::new(4096)
    }
}

fn lock_error(kind: &str) -> RosterError {
    RosterError::InternalError {
        message: format!("Failed to acquire score cache {} lock", kind),
    }
}

impl ScoreCache for InMemoryScoreCache {
    fn get(&self, key: &ScoreKey) -> RatingResult<Option<OverallRating>> {
        let scores = self.scores.read().map_err(|_| lock_error("read"))?;
        Ok(scores.get(key).copied())
    }

    fn insert(&self, key: ScoreKey, overall: OverallRating) -> RatingResult<()> {
        let mut scores = self.scores.write().map_err(|_| lock_error("write"))?;

        // Start over rather than track recency; entries are cheap to recompute
        if scores.len() >= self.capacity && !scores.contains_key(&key) {
            scores.clear();
        }
        scores.insert(key, overall);
        Ok(())
    }

    fn entry_count(&self) -> RatingResult<usize> {
        let scores = self.scores.read().map_err(|_| lock_error("read"))?;
        Ok(scores.len())
    }

    fn clear(&self) -> RatingResult<()> {
        let mut scores = self.scores.write().map_err(|_| lock_error("write"))?;
        scores.clear();
        Ok(())
    }
}

/// Calculator that consults a [`ScoreCache`] before delegating
pub struct CachedRatingCalculator<C: ScoreCache> {
    inner: Arc<dyn OverallRatingCalculator>,
    cache: C,
    metrics: Option<Arc<MetricsCollector>>,
}

impl<C: ScoreCache> CachedRatingCalculator<C> {
    pub fn new(inner: Arc<dyn OverallRatingCalculator>, cache: C) -> Self {
        Self {
            inner,
            cache,
            metrics: None,
        }
    }

    /// Record cache hits and misses
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl<C: ScoreCache> OverallRatingCalculator for CachedRatingCalculator<C> {
    fn weights_for(&self, position: Position) -> RatingResult<AttributeWeights> {
        self.inner.weights_for(position)
    }

    fn calculate_overall_rating(
        &self,
        ratings: &PlayerRatingInput,
        position: Position,
    ) -> RatingResult<OverallRating> {
        let key = ScoreKey {
            position,
            ratings: *ratings,
        };

        if let Some(overall) = self.cache.get(&key)? {
            debug!("Score cache hit for {}", position);
            if let Some(metrics) = &self.metrics {
                metrics.record_cache_request(true);
            }
            return Ok(overall);
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_cache_request(false);
        }
        let overall = self.inner.calculate_overall_rating(ratings, position)?;
        self.cache.insert(key, overall)?;
        Ok(overall)
    }
}
