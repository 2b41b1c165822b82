//! Per-position attribute weight tables
//!
//! The standard tables encode how much each attribute matters for a role:
//! a goalkeeper is judged mostly on positioning and defense, a striker on
//! pace, shooting and positioning. Weights are not normalised; the engine
//! divides by their total.

use crate::error::{RatingResult, RosterError};
use crate::types::{Attribute, Position, PositionGroup};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::warn;

/// Weight of every attribute for one position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttributeWeights {
    pub pace: f64,
    pub stamina: f64,
    pub shooting: f64,
    pub passing: f64,
    pub dribbling: f64,
    pub defense: f64,
    pub vision: f64,
    pub physical: f64,
    pub positioning: f64,
    pub weak_foot: f64,
}

impl AttributeWeights {
    pub fn get(&self, attribute: Attribute) -> f64 {
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

    /// Sum of all ten weights
    pub fn total(&self) -> f64 {
        Attribute::ALL.iter().map(|a| self.get(*a)).sum()
    }

    /// `(attribute, weight)` pairs in weighting order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL.iter().map(move |a| (*a, self.get(*a)))
    }
}

pub const GK_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.2,
    stamina: 0.3,
    shooting: 0.05,
    passing: 0.4,
    dribbling: 0.2,
    defense: 0.7,
    vision: 0.5,
    physical: 0.6,
    positioning: 0.9,
    weak_foot: 0.1,
};

pub const CB_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.6,
    stamina: 0.7,
    shooting: 0.2,
    passing: 0.5,
    dribbling: 0.3,
    defense: 0.9,
    vision: 0.4,
    physical: 0.8,
    positioning: 0.8,
    weak_foot: 0.4,
};

/// Full backs (LB and RB share a table)
pub const FULL_BACK_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.8,
    stamina: 0.7,
    shooting: 0.3,
    passing: 0.6,
    dribbling: 0.6,
    defense: 0.8,
    vision: 0.5,
    physical: 0.7,
    positioning: 0.7,
    weak_foot: 0.5,
};

/// Wing backs (LWB and RWB share a table)
pub const WING_BACK_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.8,
    stamina: 0.8,
    shooting: 0.4,
    passing: 0.7,
    dribbling: 0.7,
    defense: 0.7,
    vision: 0.6,
    physical: 0.7,
    positioning: 0.7,
    weak_foot: 0.6,
};

pub const CDM_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.6,
    stamina: 0.8,
    shooting: 0.4,
    passing: 0.7,
    dribbling: 0.6,
    defense: 0.8,
    vision: 0.7,
    physical: 0.7,
    positioning: 0.8,
    weak_foot: 0.6,
};

pub const CM_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.6,
    stamina: 0.8,
    shooting: 0.6,
    passing: 0.9,
    dribbling: 0.7,
    defense: 0.6,
    vision: 0.9,
    physical: 0.6,
    positioning: 0.7,
    weak_foot: 0.7,
};

pub const CAM_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.7,
    stamina: 0.7,
    shooting: 0.7,
    passing: 0.9,
    dribbling: 0.8,
    defense: 0.4,
    vision: 0.9,
    physical: 0.5,
    positioning: 0.7,
    weak_foot: 0.8,
};

/// Wide midfielders (LM and RM share a table)
pub const WIDE_MIDFIELDER_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.8,
    stamina: 0.7,
    shooting: 0.7,
    passing: 0.8,
    dribbling: 0.8,
    defense: 0.3,
    vision: 0.8,
    physical: 0.5,
    positioning: 0.7,
    weak_foot: 0.7,
};

pub const ST_WEIGHTS: AttributeWeights = AttributeWeights {
    pace: 0.9,
    stamina: 0.7,
    shooting: 0.9,
    passing: 0.5,
    dribbling: 0.8,
    defense: 0.2,
    vision: 0.6,
    physical: 0.7,
    positioning: 0.9,
    weak_foot: 0.9,
};

impl Position {
    /// Standard weight table for this position
    pub fn standard_weights(&self) -> &'static AttributeWeights {
        match self {
            Position::Goalkeeper => &GK_WEIGHTS,
            Position::CentreBack => &CB_WEIGHTS,
            Position::LeftBack | Position::RightBack => &FULL_BACK_WEIGHTS,
            Position::LeftWingBack | Position::RightWingBack => &WING_BACK_WEIGHTS,
            Position::DefensiveMidfielder => &CDM_WEIGHTS,
            Position::CentralMidfielder => &CM_WEIGHTS,
            Position::AttackingMidfielder => &CAM_WEIGHTS,
            Position::LeftMidfielder | Position::RightMidfielder => &WIDE_MIDFIELDER_WEIGHTS,
            Position::Striker => &ST_WEIGHTS,
        }
    }
}

/// Standard weights for a position
pub fn weights_for(position: Position) -> AttributeWeights {
    *position.standard_weights()
}

/// Standard weights for a raw position code such as `"CB"`
pub fn weights_for_code(code: &str) -> RatingResult<AttributeWeights> {
    let position: Position = code.parse()?;
    Ok(weights_for(position))
}

const DEFENDERS: [Position; 5] = [
    Position::CentreBack,
    Position::LeftBack,
    Position::RightBack,
    Position::LeftWingBack,
    Position::RightWingBack,
];

const MIDFIELDERS: [Position; 5] = [
    Position::DefensiveMidfielder,
    Position::CentralMidfielder,
    Position::AttackingMidfielder,
    Position::LeftMidfielder,
    Position::RightMidfielder,
];

/// Positions shown under a leaderboard filter
pub fn positions_in_group(group: PositionGroup) -> &'static [Position] {
    match group {
        PositionGroup::Overall => &Position::ALL,
        PositionGroup::Defenders => &DEFENDERS,
        PositionGroup::Midfielders => &MIDFIELDERS,
        PositionGroup::Strikers => &[Position::Striker],
        PositionGroup::Goalkeepers => &[Position::Goalkeeper],
    }
}

/// Weight tables for every position, either standard or loaded from TOML
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    entries: HashMap<Position, AttributeWeights>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl WeightTable {
    /// The built-in tables
    pub fn standard() -> Self {
        let entries = Position::ALL
            .iter()
            .map(|p| (*p, *p.standard_weights()))
            .collect();
        Self { entries }
    }

    /// Build a table from explicit entries; every position must be present
    pub fn from_entries(entries: HashMap<Position, AttributeWeights>) -> RatingResult<Self> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table keyed by position code:
    ///
    /// ```toml
    /// [ST]
    /// pace = 0.9
    /// # ... all ten attributes
    /// ```
    pub fn from_toml_str(content: &str) -> RatingResult<Self> {
        let raw: BTreeMap<String, AttributeWeights> =
            toml::from_str(content).map_err(|e| RosterError::ConfigurationError {
                message: format!("Invalid weight table: {}", e),
            })?;

        let mut entries = HashMap::new();
        for (code, weights) in raw {
            let position: Position = code.parse()?;
            entries.insert(position, weights);
        }

        Self::from_entries(entries)
    }

    /// Load a table from a TOML file
    pub fn from_file(path: &Path) -> RatingResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RosterError::ConfigurationError {
                message: format!("Failed to read weights file {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// Weights for a position, failing if the table has no entry
    pub fn weights_for(&self, position: Position) -> RatingResult<&AttributeWeights> {
        self.entries
            .get(&position)
            .ok_or_else(|| RosterError::UnknownPosition {
                position: position.code().to_string(),
            })
    }

    /// Check that every position is covered and every weight lies in [0, 1].
    ///
    /// A zero total is reported by the engine at scoring time, not here.
    pub fn validate(&self) -> RatingResult<()> {
        for position in Position::ALL {
            let weights = self.weights_for(position)?;
            for (attribute, weight) in weights.iter() {
                if !(0.0..=1.0).contains(&weight) {
                    return Err(RosterError::ConfigurationError {
                        message: format!(
                            "{} weight for {} must be within [0, 1], got {}",
                            attribute, position, weight
                        ),
                    });
                }
            }
            if weights.total() == 0.0 {
                warn!("Weights for {} sum to zero; scoring that position will fail", position);
            }
        }
        Ok(())
    }
}
