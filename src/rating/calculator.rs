//! Overall rating calculator trait and implementations
//!
//! The overall rating is the weighted average of the ten attribute scores
//! for a position, with the weak foot star rating first mapped onto the
//! same 60-99 scale.

use crate::error::{RatingResult, RosterError};
use crate::rating::weights::{AttributeWeights, WeightTable};
use crate::types::{Attribute, OverallRating, PlayerRatingInput, Position};
use crate::utils::round_half_up;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Convert a 1-5 star rating to a score on the 60-99 scale.
///
/// Values below one star clamp to 60 and values above five clamp to 99.
pub fn star_to_score(stars: i32) -> i32 {
    match stars {
        i32::MIN..=1 => 60,
        2 => 70,
        3 => 80,
        4 => 90,
        _ => 99,
    }
}

/// Score used for weighting: raw for ordinary attributes, converted for weak foot
pub fn attribute_score(ratings: &PlayerRatingInput, attribute: Attribute) -> i32 {
    let raw = ratings.raw(attribute);
    if attribute.is_star_rated() {
        star_to_score(raw)
    } else {
        raw
    }
}

/// Weighted average of `ratings` under `weights`
pub fn weighted_overall(
    ratings: &PlayerRatingInput,
    weights: &AttributeWeights,
    position: Position,
) -> RatingResult<OverallRating> {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (attribute, weight) in weights.iter() {
        let score = f64::from(attribute_score(ratings, attribute));
        weighted_sum += score * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        warn!("Weight table for {} sums to zero", position);
        return Err(RosterError::DivisionByZero {
            position: position.code().to_string(),
        });
    }

    Ok(round_half_up(weighted_sum / total_weight))
}

/// Overall rating for a position using the standard weight tables
pub fn calculate_overall_rating(
    ratings: &PlayerRatingInput,
    position: Position,
) -> RatingResult<OverallRating> {
    weighted_overall(ratings, position.standard_weights(), position)
}

/// Overall rating for a raw position code such as `"ST"`
pub fn overall_rating_for_code(
    ratings: &PlayerRatingInput,
    code: &str,
) -> RatingResult<OverallRating> {
    let position: Position = code.parse()?;
    calculate_overall_rating(ratings, position)
}

/// Contribution of a single attribute to an overall rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeContribution {
    pub attribute: Attribute,
    /// Value as entered (stars for weak foot)
    pub raw: i32,
    /// Value on the 60-99 scale
    pub score: i32,
    pub weight: f64,
    /// `score * weight / total_weight`
    pub contribution: f64,
}

/// Per-attribute breakdown of an overall rating
pub fn score_breakdown(
    ratings: &PlayerRatingInput,
    weights: &AttributeWeights,
) -> Vec<AttributeContribution> {
    let total = weights.total();
    weights
        .iter()
        .map(|(attribute, weight)| {
            let score = attribute_score(ratings, attribute);
            let contribution = if total == 0.0 {
                0.0
            } else {
                f64::from(score) * weight / total
            };
            AttributeContribution {
                attribute,
                raw: ratings.raw(attribute),
                score,
                weight,
                contribution,
            }
        })
        .collect()
}

/// Trait for turning a rating submission into an overall rating
pub trait OverallRatingCalculator: Send + Sync {
    /// Weights used for a position
    fn weights_for(&self, position: Position) -> RatingResult<AttributeWeights>;

    /// Calculate the overall rating for a position
    fn calculate_overall_rating(
        &self,
        ratings: &PlayerRatingInput,
        position: Position,
    ) -> RatingResult<OverallRating>;
}

/// Calculator backed by a [`WeightTable`]
#[derive(Debug, Clone, Default)]
pub struct WeightedRatingCalculator {
    table: WeightTable,
}

impl WeightedRatingCalculator {
    /// Create a calculator over a validated table
    pub fn new(table: WeightTable) -> RatingResult<Self> {
        table.validate()?;
        Ok(Self { table })
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }
}

impl OverallRatingCalculator for WeightedRatingCalculator {
    fn weights_for(&self, position: Position) -> RatingResult<AttributeWeights> {
        self.table.weights_for(position).copied()
    }

    fn calculate_overall_rating(
        &self,
        ratings: &PlayerRatingInput,
        position: Position,
    ) -> RatingResult<OverallRating> {
        let weights = self.table.weights_for(position)?;
        let overall = weighted_overall(ratings, weights, position)?;
        debug!("Calculated overall {} for {}", overall, position);
        Ok(overall)
    }
}
