//! Admin view of submitted ratings

use crate::error::RosterError;
use crate::types::{OverallRating, RatingRecord};
use crate::utils::contains_ignore_case;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rating band shown in the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    High,
    Low,
}

impl FromStr for HistoryFilter {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "high" => Ok(HistoryFilter::High),
            "low" => Ok(HistoryFilter::Low),
            other => Err(RosterError::ConfigurationError {
                message: format!("Unknown history filter: {}", other),
            }),
        }
    }
}

/// Boundaries for the high and low history filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingThresholds {
    /// Overall ratings at or above this are "high"
    pub high: OverallRating,
    /// Overall ratings below this are "low"
    pub low: OverallRating,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self { high: 85, low: 75 }
    }
}

/// Search and filter applied to the rating history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Matched against rater email and player name
    pub search: Option<String>,
    pub filter: HistoryFilter,
}

impl HistoryQuery {
    pub fn matches(&self, record: &RatingRecord, thresholds: &RatingThresholds) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty()
                && !contains_ignore_case(&record.rater_email, search)
                && !contains_ignore_case(&record.player_name, search)
            {
                return false;
            }
        }

        match self.filter {
            HistoryFilter::All => true,
            HistoryFilter::High => record.overall_rating >= thresholds.high,
            HistoryFilter::Low => record.overall_rating < thresholds.low,
        }
    }
}

/// Apply `query` to `records` (in submission order) and return them newest
/// first. Records sharing a timestamp keep reverse submission order.
pub fn filter_history(
    mut records: Vec<RatingRecord>,
    query: &HistoryQuery,
    thresholds: &RatingThresholds,
) -> Vec<RatingRecord> {
    records.retain(|record| query.matches(record, thresholds));
    records.reverse();
    // Stable, so equal timestamps stay latest-submitted first
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}
