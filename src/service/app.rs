//! Application state and component wiring
//!
//! Builds the calculator, score cache, roster store and roster service
//! from an [`AppConfig`].

use crate::config::AppConfig;
use crate::error::RatingResult;
use crate::metrics::MetricsCollector;
use crate::rating::{
    CachedRatingCalculator, InMemoryScoreCache, OverallRatingCalculator, ScoreCache,
    WeightedRatingCalculator,
};
use crate::roster::{InMemoryRosterStore, RosterService, RosterStore};
use crate::types::{OverallRating, PlayerRatingInput, Position};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Roster statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Players on the roster
    pub players: usize,
    /// Rating records currently kept
    pub ratings: usize,
    /// Results held by the score cache
    pub cached_scores: usize,
}

/// Main application state
pub struct AppState {
    config: AppConfig,
    metrics: Arc<MetricsCollector>,
    store: Arc<InMemoryRosterStore>,
    calculator: Arc<CachedRatingCalculator<InMemoryScoreCache>>,
    roster: RosterService,
}

impl AppState {
    /// Create the application state from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing {} components", config.service.name);

        let metrics = Arc::new(MetricsCollector::new().context("Failed to create metrics collector")?);

        let table = config.weight_table()?;
        let weighted = WeightedRatingCalculator::new(table).context("Invalid weight table")?;
        let calculator = Arc::new(
            CachedRatingCalculator::new(
                Arc::new(weighted),
                InMemoryScoreCache::new(config.roster.score_cache_capacity),
            )
            .with_metrics(metrics.clone()),
        );

        let store = Arc::new(InMemoryRosterStore::new(config.roster.max_history_entries));
        let roster = RosterService::new(
            store.clone() as Arc<dyn RosterStore>,
            calculator.clone() as Arc<dyn OverallRatingCalculator>,
            metrics.clone(),
        )
        .with_thresholds(config.thresholds());

        info!(
            "Roster ready: history limit {}, score cache capacity {}",
            config.roster.max_history_entries, config.roster.score_cache_capacity
        );

        Ok(Self {
            config,
            metrics,
            store,
            calculator,
            roster,
        })
    }

    /// Get service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Calculator shared by the roster service
    pub fn calculator(&self) -> Arc<dyn OverallRatingCalculator> {
        self.calculator.clone()
    }

    pub fn roster(&self) -> &RosterService {
        &self.roster
    }

    /// Score a single submission outside the roster, recording the
    /// calculation time or the scoring failure
    pub fn score(
        &self,
        ratings: &PlayerRatingInput,
        position: Position,
    ) -> RatingResult<OverallRating> {
        let timer = self.metrics.start_timer();
        match self.calculator.calculate_overall_rating(ratings, position) {
            Ok(overall) => {
                self.metrics.record_calculation(timer.stop());
                Ok(overall)
            }
            Err(e) => {
                self.metrics.record_scoring_error(e.kind());
                warn!("Failed to score {} ratings: {}", position, e);
                Err(e)
            }
        }
    }

    /// Current roster statistics
    pub fn stats(&self) -> Result<ServiceStats> {
        Ok(ServiceStats {
            players: self.store.player_count()?,
            ratings: self.store.records()?.len(),
            cached_scores: self.calculator.cache().entry_count()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewPlayer, PlayerRatingInput, Position};
    use std::fs;
    use tempfile::TempDir;

    fn new_player(name: &str, email: &str, position: Position) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            email: email.to_string(),
            position,
            bio: None,
        }
    }

    #[test]
    fn test_app_state_from_default_config() {
        let state = AppState::new(AppConfig::default()).unwrap();
        assert_eq!(
            state.stats().unwrap(),
            ServiceStats {
                players: 0,
                ratings: 0,
                cached_scores: 0
            }
        );
    }

    #[test]
    fn test_submissions_go_through_score_cache() {
        let state = AppState::new(AppConfig::default()).unwrap();
        let roster = state.roster();
        let player = roster
            .add_player(new_player("John", "john@example.com", Position::Striker))
            .unwrap();

        let ratings = PlayerRatingInput::default();
        roster
            .submit_rating("a@example.com", &player.id, ratings)
            .unwrap();
        roster
            .submit_rating("b@example.com", &player.id, ratings)
            .unwrap();

        let stats = state.stats().unwrap();
        assert_eq!(stats.players, 1);
        assert_eq!(stats.ratings, 2);
        assert_eq!(stats.cached_scores, 1);
        assert!(state.metrics().cache_requests("hit") >= 1);
    }

    #[test]
    fn test_thresholds_from_config() {
        let mut config = AppConfig::default();
        config.scoring.high_rating_threshold = 90;
        config.scoring.low_rating_threshold = 60;

        let state = AppState::new(config).unwrap();
        assert_eq!(state.roster().thresholds().high, 90);
        assert_eq!(state.roster().thresholds().low, 60);
    }

    #[test]
    fn test_score_records_timing_and_failures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");

        // Goalkeepers get an all-zero table
        let mut contents = String::new();
        for position in Position::ALL {
            let pace = if position == Position::Goalkeeper { 0.0 } else { 1.0 };
            contents.push_str(&format!(
                "[{}]\npace = {:.1}\nstamina = 0.0\nshooting = 0.0\npassing = 0.0\ndribbling = 0.0\n\
                 defense = 0.0\nvision = 0.0\nphysical = 0.0\npositioning = 0.0\nweakFoot = 0.0\n\n",
                position.code(),
                pace
            ));
        }
        fs::write(&path, contents).unwrap();

        let mut config = AppConfig::default();
        config.scoring.weights_file = Some(path);
        let state = AppState::new(config).unwrap();
        let ratings = PlayerRatingInput::default();

        assert_eq!(state.score(&ratings, Position::Striker).unwrap(), 80);
        assert_eq!(
            state.metrics().scoring().calculation_duration.get_sample_count(),
            1
        );

        let err = state.score(&ratings, Position::Goalkeeper).unwrap_err();
        assert_eq!(err.kind(), "division_by_zero");
        assert_eq!(
            state
                .metrics()
                .scoring()
                .scoring_errors_total
                .with_label_values(&["division_by_zero"])
                .get(),
            1
        );
        // Scoring outside the roster is not a submission
        assert_eq!(state.metrics().submissions().submissions_total.get(), 0);
    }

    #[test]
    fn test_custom_weights_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");

        // Every position weighs only pace
        let mut contents = String::new();
        for position in Position::ALL {
            contents.push_str(&format!(
                "[{}]\npace = 1.0\nstamina = 0.0\nshooting = 0.0\npassing = 0.0\ndribbling = 0.0\n\
                 defense = 0.0\nvision = 0.0\nphysical = 0.0\npositioning = 0.0\nweakFoot = 0.0\n\n",
                position.code()
            ));
        }
        fs::write(&path, contents).unwrap();

        let mut config = AppConfig::default();
        config.scoring.weights_file = Some(path);
        let state = AppState::new(config).unwrap();

        let ratings = PlayerRatingInput {
            pace: 93,
            ..Default::default()
        };
        assert_eq!(
            state
                .calculator()
                .calculate_overall_rating(&ratings, Position::Goalkeeper)
                .unwrap(),
            93
        );
    }
}
