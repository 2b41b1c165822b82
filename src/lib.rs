//! Roster Rating - position-weighted player ratings for a football squad
//!
//! This crate turns ten attribute ratings into one overall rating using a
//! per-position weight table, and manages a roster of players, the ratings
//! submitted for them, an admin rating history and a leaderboard.

pub mod config;
pub mod error;
pub mod metrics;
pub mod rating;
pub mod roster;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingResult, Result, RosterError};
pub use types::*;

// Re-export key components
pub use rating::{
    calculate_overall_rating, position_group_tag, rating_tier, star_to_score, weights_for,
    OverallRatingCalculator, WeightedRatingCalculator,
};
pub use roster::{RosterService, RosterStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
