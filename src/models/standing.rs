//! Standing and winner summary: derived results, rebuilt from rounds.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Per-player aggregate results. Always recomputed from the rounds and the
/// fixed points-per-match; never mutated incrementally from outside the
/// standings calculator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub total_points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub byes: u32,
}

impl Standing {
    /// A zeroed standing for a player.
    pub fn zero(player_id: PlayerId) -> Self {
        Self {
            player_id,
            total_points: 0,
            matches_played: 0,
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
            byes: 0,
        }
    }

    /// Points scored minus points conceded (third tie-break level).
    pub fn point_differential(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

/// Winner summary derived from the final leaderboard.
///
/// `top_male` / `top_female` are filled for the mixed-pairs format only and
/// are independent of top-3 membership.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinnerSummary {
    pub winner: Option<PlayerId>,
    pub top_three: Vec<PlayerId>,
    pub top_male: Option<PlayerId>,
    pub top_female: Option<PlayerId>,
}
