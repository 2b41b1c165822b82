//! Leaderboard ranking by overall rating

use crate::rating::classify::{position_group_tag, rating_tier, PositionTag, RatingTier};
use crate::rating::weights::positions_in_group;
use crate::types::{OverallRating, Player, PlayerId, Position, PositionGroup};
use serde::{Deserialize, Serialize};

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based rank
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub overall_rating: OverallRating,
    pub tier: RatingTier,
    pub tag: PositionTag,
}

/// Rank rated players in `group`, highest overall first.
///
/// Ties are ordered by name. Players nobody has rated are left out.
pub fn rank_players(players: &[Player], group: PositionGroup) -> Vec<LeaderboardEntry> {
    let allowed = positions_in_group(group);

    let mut rated: Vec<(&Player, OverallRating)> = players
        .iter()
        .filter(|player| allowed.contains(&player.position))
        .filter_map(|player| player.overall_rating.map(|overall| (player, overall)))
        .collect();

    rated.sort_by(|(a, a_overall), (b, b_overall)| {
        b_overall.cmp(a_overall).then_with(|| a.name.cmp(&b.name))
    });

    rated
        .into_iter()
        .enumerate()
        .map(|(index, (player, overall))| LeaderboardEntry {
            rank: index + 1,
            player_id: player.id.clone(),
            name: player.name.clone(),
            position: player.position,
            overall_rating: overall,
            tier: rating_tier(overall),
            tag: position_group_tag(player.position),
        })
        .collect()
}
