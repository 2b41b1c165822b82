//! JSON roster fixtures
//!
//! A fixture lists players and the ratings submitted for them. Submissions
//! refer to players by email so fixtures can be written by hand.

use crate::error::{Result, RosterError};
use crate::roster::service::RosterService;
use crate::types::{NewPlayer, PlayerRatingInput};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One rating in a fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSubmission {
    /// Email of the rater
    pub rater: String,
    /// Email of the rated player
    pub player: String,
    pub ratings: PlayerRatingInput,
    /// Defaults to the import time
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A roster with its submitted ratings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFixture {
    #[serde(default)]
    pub players: Vec<NewPlayer>,
    #[serde(default)]
    pub submissions: Vec<FixtureSubmission>,
}

/// Counts of what an import loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub players: usize,
    pub submissions: usize,
}

impl RosterFixture {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse roster fixture")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid roster file {}", path.display()))
    }

    /// Add every player, then replay the submissions in order.
    ///
    /// Stops at the first player or submission the service rejects.
    pub fn load_into(&self, service: &RosterService) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for details in &self.players {
            service
                .add_player(details.clone())
                .with_context(|| format!("Failed to import player {}", details.email))?;
            summary.players += 1;
        }

        for submission in &self.submissions {
            let player = service.find_by_email(&submission.player)?.ok_or_else(|| {
                RosterError::PlayerNotFound {
                    player_id: submission.player.clone(),
                }
            })?;

            let result = match submission.timestamp {
                Some(timestamp) => service.submit_rating_at(
                    &submission.rater,
                    &player.id,
                    submission.ratings,
                    timestamp,
                ),
                None => service.submit_rating(&submission.rater, &player.id, submission.ratings),
            };
            result.with_context(|| {
                format!(
                    "Failed to import rating of {} by {}",
                    submission.player, submission.rater
                )
            })?;
            summary.submissions += 1;
        }

        info!(
            "Imported {} players and {} ratings",
            summary.players, summary.submissions
        );
        Ok(summary)
    }
}
