//! Position-weighted overall rating engine
//!
//! This module holds the per-position weight tables, the scoring engine
//! that turns ten attribute ratings into one overall number, the optional
//! score cache, and the display classification helpers.

pub mod cache;
pub mod calculator;
pub mod classify;
pub mod weights;

// Re-export commonly used types
pub use cache::{CachedRatingCalculator, InMemoryScoreCache, ScoreCache, ScoreKey};
pub use calculator::{
    calculate_overall_rating, overall_rating_for_code, score_breakdown, star_to_score,
    AttributeContribution, OverallRatingCalculator, WeightedRatingCalculator,
};
pub use classify::{
    position_group_tag, position_group_tag_for_code, rating_tier, PositionTag, RatingTier,
};
pub use weights::{positions_in_group, weights_for, weights_for_code, AttributeWeights, WeightTable};
