//! Common types used throughout the roster rating service

use crate::error::RosterError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for players on the roster
pub type PlayerId = String;

/// Unique identifier for submitted ratings
pub type RatingId = Uuid;

/// Single overall score produced by the scoring engine
pub type OverallRating = i32;

/// On-field role of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "CB")]
    CentreBack,
    #[serde(rename = "LB")]
    LeftBack,
    #[serde(rename = "RB")]
    RightBack,
    #[serde(rename = "LWB")]
    LeftWingBack,
    #[serde(rename = "RWB")]
    RightWingBack,
    #[serde(rename = "CDM")]
    DefensiveMidfielder,
    #[serde(rename = "CM")]
    CentralMidfielder,
    #[serde(rename = "CAM")]
    AttackingMidfielder,
    #[serde(rename = "LM")]
    LeftMidfielder,
    #[serde(rename = "RM")]
    RightMidfielder,
    #[serde(rename = "ST")]
    Striker,
}

impl Position {
    /// Every position, in roster display order
    pub const ALL: [Position; 12] = [
        Position::Goalkeeper,
        Position::CentreBack,
        Position::LeftBack,
        Position::RightBack,
        Position::LeftWingBack,
        Position::RightWingBack,
        Position::DefensiveMidfielder,
        Position::CentralMidfielder,
        Position::AttackingMidfielder,
        Position::LeftMidfielder,
        Position::RightMidfielder,
        Position::Striker,
    ];

    /// Short position code, e.g. `ST`
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::CentreBack => "CB",
            Position::LeftBack => "LB",
            Position::RightBack => "RB",
            Position::LeftWingBack => "LWB",
            Position::RightWingBack => "RWB",
            Position::DefensiveMidfielder => "CDM",
            Position::CentralMidfielder => "CM",
            Position::AttackingMidfielder => "CAM",
            Position::LeftMidfielder => "LM",
            Position::RightMidfielder => "RM",
            Position::Striker => "ST",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Position::ALL
            .iter()
            .copied()
            .find(|position| position.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| RosterError::UnknownPosition {
                position: s.to_string(),
            })
    }
}

impl TryFrom<String> for Position {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Display-oriented bucket of positions used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionGroup {
    Overall,
    Defenders,
    Midfielders,
    Strikers,
    Goalkeepers,
}

impl PositionGroup {
    pub const ALL: [PositionGroup; 5] = [
        PositionGroup::Overall,
        PositionGroup::Defenders,
        PositionGroup::Midfielders,
        PositionGroup::Strikers,
        PositionGroup::Goalkeepers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PositionGroup::Overall => "OVERALL",
            PositionGroup::Defenders => "DEFENDERS",
            PositionGroup::Midfielders => "MIDFIELDERS",
            PositionGroup::Strikers => "STRIKERS",
            PositionGroup::Goalkeepers => "GOALKEEPERS",
        }
    }
}

impl std::fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PositionGroup {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PositionGroup::ALL
            .iter()
            .copied()
            .find(|group| group.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| RosterError::UnknownPositionGroup {
                group: s.to_string(),
            })
    }
}

/// One of the ten rated skill dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Pace,
    Stamina,
    Shooting,
    Passing,
    Dribbling,
    Defense,
    Vision,
    Physical,
    Positioning,
    WeakFoot,
}

impl Attribute {
    /// All attributes in weighting order
    pub const ALL: [Attribute; 10] = [
        Attribute::Pace,
        Attribute::Stamina,
        Attribute::Shooting,
        Attribute::Passing,
        Attribute::Dribbling,
        Attribute::Defense,
        Attribute::Vision,
        Attribute::Physical,
        Attribute::Positioning,
        Attribute::WeakFoot,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Pace => "pace",
            Attribute::Stamina => "stamina",
            Attribute::Shooting => "shooting",
            Attribute::Passing => "passing",
            Attribute::Dribbling => "dribbling",
            Attribute::Defense => "defense",
            Attribute::Vision => "vision",
            Attribute::Physical => "physical",
            Attribute::Positioning => "positioning",
            Attribute::WeakFoot => "weakFoot",
        }
    }

    /// Whether the attribute is rated in stars rather than on the 60-99 scale
    pub fn is_star_rated(&self) -> bool {
        matches!(self, Attribute::WeakFoot)
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Lowest score accepted for an ordinary attribute
pub const MIN_ATTRIBUTE_SCORE: i32 = 60;
/// Highest score accepted for an ordinary attribute
pub const MAX_ATTRIBUTE_SCORE: i32 = 99;
/// Lowest weak foot star rating
pub const MIN_STARS: i32 = 1;
/// Highest weak foot star rating
pub const MAX_STARS: i32 = 5;

/// Raw ratings a single rater assigns to a single player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRatingInput {
    pub pace: i32,
    pub stamina: i32,
    pub shooting: i32,
    pub passing: i32,
    pub dribbling: i32,
    pub defense: i32,
    pub vision: i32,
    pub physical: i32,
    pub positioning: i32,
    /// Non-dominant foot skill in stars (1-5)
    pub weak_foot: i32,
}

impl Default for PlayerRatingInput {
    fn default() -> Self {
        Self {
            pace: 80,
            stamina: 80,
            shooting: 80,
            passing: 80,
            dribbling: 80,
            defense: 80,
            vision: 80,
            physical: 80,
            positioning: 80,
            weak_foot: 3,
        }
    }
}

impl PlayerRatingInput {
    /// Build an input from ten values in [`Attribute::ALL`] order
    pub fn from_values(values: [i32; 10]) -> Self {
        let [pace, stamina, shooting, passing, dribbling, defense, vision, physical, positioning, weak_foot] =
            values;
        Self {
            pace,
            stamina,
            shooting,
            passing,
            dribbling,
            defense,
            vision,
            physical,
            positioning,
            weak_foot,
        }
    }

    /// Raw value as entered; weak foot is returned in stars
    pub fn raw(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Pace => self.pace,
            Attribute::Stamina => self.stamina,
            Attribute::Shooting => self.shooting,
            Attribute::Passing => self.passing,
            Attribute::Dribbling => self.dribbling,
            Attribute::Defense => self.defense,
            Attribute::Vision => self.vision,
            Attribute::Physical => self.physical,
            Attribute::Positioning => self.positioning,
            Attribute::WeakFoot => self.weak_foot,
        }
    }

    /// Check every value against the rating form ranges.
    ///
    /// The scoring engine accepts anything; this is for callers that
    /// accept submissions.
    pub fn validate(&self) -> Result<(), RosterError> {
        for attribute in Attribute::ALL {
            let value = self.raw(attribute);
            let (min, max) = if attribute.is_star_rated() {
                (MIN_STARS, MAX_STARS)
            } else {
                (MIN_ATTRIBUTE_SCORE, MAX_ATTRIBUTE_SCORE)
            };
            if value < min || value > max {
                return Err(RosterError::InvalidRating { attribute, value });
            }
        }
        Ok(())
    }
}

/// Player record on the roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
    pub position: Position,
    pub bio: Option<String>,
    /// Latest ratings keyed by rater email
    pub ratings: HashMap<String, PlayerRatingInput>,
    /// Mean of the per-rater overall ratings, if anyone has rated the player
    pub overall_rating: Option<OverallRating>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when adding or editing a player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub email: String,
    pub position: Position,
    #[serde(default)]
    pub bio: Option<String>,
}

/// One submitted rating, as shown in the admin history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub id: RatingId,
    pub rater_email: String,
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub overall_rating: OverallRating,
    pub ratings: PlayerRatingInput,
    pub timestamp: DateTime<Utc>,
}
