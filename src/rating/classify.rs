//! Display classification of scores and positions

use crate::error::RatingResult;
use crate::types::Position;
use serde::{Deserialize, Serialize};

/// Colour band of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingTier {
    Low,
    Mid,
    High,
}

impl RatingTier {
    /// CSS class used by the front end
    pub fn css_class(&self) -> &'static str {
        match self {
            RatingTier::Low => "rating-red",
            RatingTier::Mid => "rating-yellow",
            RatingTier::High => "rating-green",
        }
    }
}

impl std::fmt::Display for RatingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Gameplay line a position belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionTag {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PositionTag {
    pub fn css_class(&self) -> &'static str {
        match self {
            PositionTag::Goalkeeper => "position-gk",
            PositionTag::Defender => "position-def",
            PositionTag::Midfielder => "position-mid",
            PositionTag::Forward => "position-fwd",
        }
    }
}

impl std::fmt::Display for PositionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Tier for a score: below 70 is low, below 80 is mid, anything else high
pub fn rating_tier(score: impl Into<f64>) -> RatingTier {
    let score = score.into();
    if score < 70.0 {
        RatingTier::Low
    } else if score < 80.0 {
        RatingTier::Mid
    } else {
        RatingTier::High
    }
}

pub fn position_group_tag(position: Position) -> PositionTag {
    match position {
        Position::Goalkeeper => PositionTag::Goalkeeper,
        Position::CentreBack
        | Position::LeftBack
        | Position::RightBack
        | Position::LeftWingBack
        | Position::RightWingBack => PositionTag::Defender,
        Position::DefensiveMidfielder
        | Position::CentralMidfielder
        | Position::AttackingMidfielder
        | Position::LeftMidfielder
        | Position::RightMidfielder => PositionTag::Midfielder,
        Position::Striker => PositionTag::Forward,
    }
}

/// Tag for a raw position code; unknown codes are rejected
pub fn position_group_tag_for_code(code: &str) -> RatingResult<PositionTag> {
    let position: Position = code.parse()?;
    Ok(position_group_tag(position))
}
