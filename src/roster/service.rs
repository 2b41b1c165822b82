//! Roster service: player management, rating submission, history and leaderboard
//!
//! All state is held by the injected [`RosterStore`]; the service itself is
//! cheap to clone and safe to share between threads.

use crate::error::{Result, RosterError};
use crate::metrics::MetricsCollector;
use crate::rating::calculator::OverallRatingCalculator;
use crate::roster::history::{filter_history, HistoryQuery, RatingThresholds};
use crate::roster::leaderboard::{rank_players, LeaderboardEntry};
use crate::roster::store::RosterStore;
use crate::types::{
    NewPlayer, OverallRating, Player, PlayerId, PlayerRatingInput, PositionGroup, RatingRecord,
};
use crate::utils::{
    contains_ignore_case, current_timestamp, generate_player_id, generate_rating_id,
    normalize_email, round_half_up, same_email,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mean of the per-rater overall ratings of a player, if anyone rated them
pub fn aggregate_overall(
    calculator: &dyn OverallRatingCalculator,
    player: &Player,
) -> Result<Option<OverallRating>> {
    if player.ratings.is_empty() {
        return Ok(None);
    }

    let mut total = 0.0;
    for ratings in player.ratings.values() {
        total += f64::from(calculator.calculate_overall_rating(ratings, player.position)?);
    }

    Ok(Some(round_half_up(total / player.ratings.len() as f64)))
}

/// The roster service
#[derive(Clone)]
pub struct RosterService {
    /// Player and history storage
    store: Arc<dyn RosterStore>,
    /// Calculator used for every overall rating
    calculator: Arc<dyn OverallRatingCalculator>,
    /// Metrics collector for submissions and scoring failures
    metrics: Arc<MetricsCollector>,
    /// Bands for the history filters
    thresholds: RatingThresholds,
}

impl RosterService {
    /// Create a new roster service
    pub fn new(
        store: Arc<dyn RosterStore>,
        calculator: Arc<dyn OverallRatingCalculator>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            store,
            calculator,
            metrics,
            thresholds: RatingThresholds::default(),
        }
    }

    /// Override the history filter thresholds
    pub fn with_thresholds(mut self, thresholds: RatingThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> RatingThresholds {
        self.thresholds
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Field checks only; email uniqueness is enforced by the store
    fn validate_new_player(details: &NewPlayer) -> Result<()> {
        if details.name.trim().is_empty() {
            return Err(RosterError::InvalidPlayer {
                reason: "Name must not be empty".to_string(),
            }
            .into());
        }
        if details.email.trim().is_empty() {
            return Err(RosterError::InvalidPlayer {
                reason: "Email must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Add a player to the roster
    pub fn add_player(&self, details: NewPlayer) -> Result<Player> {
        Self::validate_new_player(&details)?;

        let player = Player {
            id: generate_player_id(),
            name: details.name.trim().to_string(),
            email: details.email.trim().to_string(),
            position: details.position,
            bio: details.bio.filter(|bio| !bio.trim().is_empty()),
            ratings: HashMap::new(),
            overall_rating: None,
            created_at: current_timestamp(),
        };

        self.store.insert_player(player.clone())?;
        info!("Added player {} ({}) as {}", player.name, player.id, player.position);

        Ok(player)
    }

    /// Replace a player's details; the overall is recomputed for the new position
    pub fn update_player(&self, player_id: &PlayerId, details: NewPlayer) -> Result<Player> {
        Self::validate_new_player(&details)?;

        let calculator = self.calculator.clone();
        let updated = self.store.update_player(player_id, &mut |player| {
            player.name = details.name.trim().to_string();
            player.email = details.email.trim().to_string();
            player.position = details.position;
            player.bio = details.bio.clone().filter(|bio| !bio.trim().is_empty());
            player.overall_rating = aggregate_overall(calculator.as_ref(), player)?;
            Ok(())
        })?;

        info!("Updated player {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Remove a player; returns whether the player existed
    pub fn remove_player(&self, player_id: &PlayerId) -> Result<bool> {
        let removed = self.store.remove_player(player_id)?;
        if removed {
            info!("Removed player {}", player_id);
        }
        Ok(removed)
    }

    pub fn get_player(&self, player_id: &PlayerId) -> Result<Player> {
        self.store.get_player(player_id)?.ok_or_else(|| {
            RosterError::PlayerNotFound {
                player_id: player_id.clone(),
            }
            .into()
        })
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Player>> {
        self.store.find_by_email(email)
    }

    /// Players whose name or email contains `query`, ordered by name
    pub fn search_players(&self, query: &str) -> Result<Vec<Player>> {
        let query = query.trim();
        let mut players: Vec<Player> = self
            .store
            .list_players()?
            .into_iter()
            .filter(|player| {
                contains_ignore_case(&player.name, query) || contains_ignore_case(&player.email, query)
            })
            .collect();

        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    /// Players `rater_email` may rate: everyone but themselves
    pub fn players_to_rate(&self, rater_email: &str) -> Result<Vec<Player>> {
        Ok(self
            .search_players("")?
            .into_iter()
            .filter(|player| !same_email(&player.email, rater_email))
            .collect())
    }

    /// Submit a rating now
    pub fn submit_rating(
        &self,
        rater_email: &str,
        player_id: &PlayerId,
        ratings: PlayerRatingInput,
    ) -> Result<RatingRecord> {
        self.submit_rating_at(rater_email, player_id, ratings, current_timestamp())
    }

    /// Submit a rating with an explicit timestamp.
    ///
    /// A later rating from the same rater replaces their earlier one when
    /// computing the player's overall; both stay in the history.
    pub fn submit_rating_at(
        &self,
        rater_email: &str,
        player_id: &PlayerId,
        ratings: PlayerRatingInput,
        timestamp: DateTime<Utc>,
    ) -> Result<RatingRecord> {
        match self.apply_rating(rater_email, player_id, ratings, timestamp) {
            Ok(record) => {
                self.metrics.record_submission(record.overall_rating);
                info!(
                    "{} rated {} ({}): overall {}",
                    record.rater_email, record.player_name, record.position, record.overall_rating
                );
                Ok(record)
            }
            Err(e) => {
                let kind = e
                    .downcast_ref::<RosterError>()
                    .map(RosterError::kind)
                    .unwrap_or("internal");
                match e.downcast_ref::<RosterError>() {
                    Some(RosterError::DivisionByZero { .. })
                    | Some(RosterError::UnknownPosition { .. }) => {
                        self.metrics.record_scoring_error(kind)
                    }
                    _ => self.metrics.record_rejection(kind),
                }
                warn!("Rejected rating from {} for {}: {}", rater_email, player_id, e);
                Err(e)
            }
        }
    }

    fn apply_rating(
        &self,
        rater_email: &str,
        player_id: &PlayerId,
        ratings: PlayerRatingInput,
        timestamp: DateTime<Utc>,
    ) -> Result<RatingRecord> {
        let rater_email = rater_email.trim().to_string();
        if rater_email.is_empty() {
            return Err(RosterError::InvalidPlayer {
                reason: "Rater email must not be empty".to_string(),
            }
            .into());
        }
        ratings.validate()?;

        let calculator = self.calculator.clone();
        let metrics = self.metrics.clone();
        let mut submitted_overall = None;
        let player = self.store.update_player(player_id, &mut |player| {
            if same_email(&player.email, &rater_email) {
                return Err(RosterError::SelfRating {
                    email: rater_email.clone(),
                }
                .into());
            }

            let timer = metrics.start_timer();
            let overall = calculator.calculate_overall_rating(&ratings, player.position)?;
            metrics.record_calculation(timer.stop());
            player.ratings.insert(normalize_email(&rater_email), ratings);
            player.overall_rating = aggregate_overall(calculator.as_ref(), player)?;
            submitted_overall = Some(overall);
            Ok(())
        })?;

        let overall_rating = submitted_overall.ok_or_else(|| RosterError::InternalError {
            message: "Rating was not applied".to_string(),
        })?;

        let record = RatingRecord {
            id: generate_rating_id(),
            rater_email,
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            position: player.position,
            overall_rating,
            ratings,
            timestamp,
        };
        self.store.append_record(record.clone())?;
        debug!(
            "Player {} now has overall {:?} from {} raters",
            player.id,
            player.overall_rating,
            player.ratings.len()
        );

        Ok(record)
    }

    /// Rating history matching `query`, newest first
    pub fn rating_history(&self, query: &HistoryQuery) -> Result<Vec<RatingRecord>> {
        Ok(filter_history(self.store.records()?, query, &self.thresholds))
    }

    /// Ranked leaderboard for a position group
    pub fn leaderboard(&self, group: PositionGroup) -> Result<Vec<LeaderboardEntry>> {
        let players = self.store.list_players()?;
        Ok(rank_players(&players, group))
    }
}
