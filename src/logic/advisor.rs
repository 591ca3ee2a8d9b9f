//! Time/format advisor: translate a time budget into a recommended
//! points-per-match and round count.

use crate::models::ValidationError;
use serde::{Deserialize, Serialize};

/// Fixed serves-per-player → total-points table with the nominal match
/// duration of each option.
struct PointOption {
    serves: u32,
    points: u32,
    nominal_minutes: u32,
}

static POINT_OPTIONS: [PointOption; 3] = [
    PointOption { serves: 4, points: 16, nominal_minutes: 8 },
    PointOption { serves: 6, points: 24, nominal_minutes: 12 },
    PointOption { serves: 8, points: 32, nominal_minutes: 16 },
];

/// Estimates below this map straight to the shortest option.
const SHORT_MATCH_MINUTES: u32 = 10;
/// Estimates above this map straight to the longest option.
const LONG_MATCH_MINUTES: u32 = 18;
/// Tolerance band around an option's nominal duration.
const DURATION_TOLERANCE_MINUTES: u32 = 3;

/// Recommended tournament shape for a time budget.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub matches_per_round: usize,
    pub estimated_rounds: u32,
    pub recommended_points_per_match: u32,
    pub recommended_serves_per_player: u32,
    /// Minutes consumed by the estimated rounds (≤ the budget).
    pub estimated_minutes_used: u32,
}

/// Compute matches per round, how many rounds fit the budget, and the
/// points-per-match option matching the estimated match duration.
pub fn recommend(
    total_minutes: u32,
    match_minutes_estimate: u32,
    changeover_minutes: u32,
    courts_count: usize,
    player_count: usize,
) -> Result<Recommendation, ValidationError> {
    if player_count < 4 {
        return Err(ValidationError::InsufficientPlayers {
            players: player_count,
        });
    }
    let cycle = match_minutes_estimate + changeover_minutes;
    if cycle == 0 || total_minutes < cycle {
        return Err(ValidationError::InsufficientTime {
            required_minutes: cycle.max(1),
            available_minutes: total_minutes,
        });
    }

    let matches_per_round = courts_count.min(player_count / 4).max(1);
    let estimated_rounds = total_minutes / cycle;
    let option = pick_option(match_minutes_estimate);

    Ok(Recommendation {
        matches_per_round,
        estimated_rounds,
        recommended_points_per_match: option.points,
        recommended_serves_per_player: option.serves,
        estimated_minutes_used: estimated_rounds * cycle,
    })
}

/// Short estimates get the 16-point option, long ones 32; in between, the
/// highest-point option whose nominal duration is within the tolerance band
/// of the estimate (nearest option as fallback).
fn pick_option(match_minutes_estimate: u32) -> &'static PointOption {
    if match_minutes_estimate < SHORT_MATCH_MINUTES {
        return &POINT_OPTIONS[0];
    }
    if match_minutes_estimate > LONG_MATCH_MINUTES {
        return &POINT_OPTIONS[2];
    }
    POINT_OPTIONS
        .iter()
        .rev()
        .find(|o| o.nominal_minutes.abs_diff(match_minutes_estimate) <= DURATION_TOLERANCE_MINUTES)
        .unwrap_or_else(|| {
            POINT_OPTIONS
                .iter()
                .min_by_key(|o| o.nominal_minutes.abs_diff(match_minutes_estimate))
                .unwrap_or(&POINT_OPTIONS[1])
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_estimates_hit_the_extremes() {
        assert_eq!(pick_option(8).points, 16);
        assert_eq!(pick_option(9).points, 16);
        assert_eq!(pick_option(19).points, 32);
        assert_eq!(pick_option(25).points, 32);
    }

    #[test]
    fn band_prefers_highest_points_within_tolerance() {
        // 12 min: 24-point option is exact, 32-point is 4 min off
        assert_eq!(pick_option(12).points, 24);
        // 15 min: both 24 and 32 are within 3 min; highest wins
        assert_eq!(pick_option(15).points, 32);
        // 10 min: 16 and 24 within 3 min; highest wins
        assert_eq!(pick_option(10).points, 24);
    }
}
