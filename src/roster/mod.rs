//! Roster management
//!
//! Players, the ratings submitted for them, the admin history view and the
//! leaderboard, all built on top of the rating engine.

pub mod history;
pub mod import;
pub mod leaderboard;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use history::{filter_history, HistoryFilter, HistoryQuery, RatingThresholds};
pub use import::{FixtureSubmission, ImportSummary, RosterFixture};
pub use leaderboard::{rank_players, LeaderboardEntry};
pub use service::{aggregate_overall, RosterService};
pub use store::{InMemoryRosterStore, RosterStore};
