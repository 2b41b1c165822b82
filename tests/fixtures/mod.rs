//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use roster_rating::metrics::MetricsCollector;
use roster_rating::rating::{
    CachedRatingCalculator, InMemoryScoreCache, OverallRatingCalculator, WeightedRatingCalculator,
};
use roster_rating::roster::{InMemoryRosterStore, RosterFixture, RosterService};
use roster_rating::types::{NewPlayer, PlayerRatingInput, Position};
use std::path::PathBuf;
use std::sync::Arc;

/// Path of the sample roster shipped with the tests
pub fn sample_roster_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_roster.json")
}

pub fn sample_roster() -> RosterFixture {
    RosterFixture::from_file(&sample_roster_path()).expect("sample roster should parse")
}

/// Roster service over in-memory storage and the standard weights
pub fn create_test_service() -> (RosterService, Arc<MetricsCollector>) {
    let metrics = Arc::new(MetricsCollector::new().expect("metrics collector"));
    let service = RosterService::new(
        Arc::new(InMemoryRosterStore::new(1000)),
        Arc::new(WeightedRatingCalculator::default()),
        metrics.clone(),
    );
    (service, metrics)
}

/// Roster service whose calculator goes through a score cache
pub fn create_cached_service(
    capacity: usize,
) -> (
    RosterService,
    Arc<CachedRatingCalculator<InMemoryScoreCache>>,
    Arc<MetricsCollector>,
) {
    let metrics = Arc::new(MetricsCollector::new().expect("metrics collector"));
    let calculator = Arc::new(
        CachedRatingCalculator::new(
            Arc::new(WeightedRatingCalculator::default()),
            InMemoryScoreCache::new(capacity),
        )
        .with_metrics(metrics.clone()),
    );
    let service = RosterService::new(
        Arc::new(InMemoryRosterStore::new(1000)),
        calculator.clone() as Arc<dyn OverallRatingCalculator>,
        metrics.clone(),
    );
    (service, calculator, metrics)
}

/// Roster service preloaded with the sample roster
pub fn create_sample_service() -> (RosterService, Arc<MetricsCollector>) {
    let (service, metrics) = create_test_service();
    sample_roster()
        .load_into(&service)
        .expect("sample roster should load");
    (service, metrics)
}

pub fn new_player(name: &str, email: &str, position: Position) -> NewPlayer {
    NewPlayer {
        name: name.to_string(),
        email: email.to_string(),
        position,
        bio: None,
    }
}

/// The striker submission used throughout: 82 as ST, 76 as CB, 75 as GK
pub fn striker_ratings() -> PlayerRatingInput {
    PlayerRatingInput::from_values([90, 70, 95, 60, 85, 60, 70, 75, 90, 4])
}

/// Every attribute at `score`, weak foot at `stars`
pub fn uniform_ratings(score: i32, stars: i32) -> PlayerRatingInput {
    PlayerRatingInput::from_values([
        score, score, score, score, score, score, score, score, score, stars,
    ])
}
