//! Tournament health: completion metrics and end-of-tournament warnings.

use crate::models::{GameMatch, MatchStatus, Tournament};
use serde::{Deserialize, Serialize};

/// 4-tier classification of the completion percentage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLevel {
    /// 100% of matches completed.
    Complete,
    /// At least 80%.
    Good,
    /// At least 50%.
    Moderate,
    /// Below 50%.
    Low,
}

/// Snapshot of tournament progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub total_matches: usize,
    pub completed_matches: usize,
    pub completion_percentage: f64,
    /// Index of the first round with an incomplete non-bye match, or the
    /// last round when everything is done.
    pub current_round: usize,
    pub incomplete_in_current_round: usize,
    pub completed_rounds: usize,
    pub rounds_with_incomplete: usize,
    /// Active players appearing in zero scheduled matches. Anything above
    /// zero indicates a malformed schedule.
    pub idle_players: usize,
    pub level: HealthLevel,
}

fn is_pending(m: &GameMatch) -> bool {
    m.status != MatchStatus::Bye && !m.is_completed()
}

/// Derive completion metrics from the schedule and match statuses.
pub fn compute_health(tournament: &Tournament) -> HealthReport {
    let scheduled = || {
        tournament
            .rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .filter(|m| m.status != MatchStatus::Bye)
    };
    let total_matches = scheduled().count();
    let completed_matches = scheduled().filter(|m| m.is_completed()).count();
    let completion_percentage = if total_matches == 0 {
        0.0
    } else {
        completed_matches as f64 * 100.0 / total_matches as f64
    };

    let current_round = tournament
        .rounds
        .iter()
        .find(|r| r.matches.iter().any(is_pending))
        .map(|r| r.index)
        .or_else(|| tournament.rounds.last().map(|r| r.index))
        .unwrap_or(0);
    let incomplete_in_current_round = tournament
        .rounds
        .get(current_round)
        .map_or(0, |r| r.matches.iter().filter(|m| is_pending(m)).count());

    let completed_rounds = tournament.rounds.iter().filter(|r| r.is_completed()).count();
    let rounds_with_incomplete = tournament
        .rounds
        .iter()
        .filter(|r| r.matches.iter().any(is_pending))
        .count();

    let idle_players = tournament
        .active_players()
        .iter()
        .filter(|p| !scheduled().any(|m| m.involves(p.id)))
        .count();

    let level = if completion_percentage >= 100.0 {
        HealthLevel::Complete
    } else if completion_percentage >= 80.0 {
        HealthLevel::Good
    } else if completion_percentage >= 50.0 {
        HealthLevel::Moderate
    } else {
        HealthLevel::Low
    };

    HealthReport {
        total_matches,
        completed_matches,
        completion_percentage,
        current_round,
        incomplete_in_current_round,
        completed_rounds,
        rounds_with_incomplete,
        idle_players,
        level,
    }
}

/// Human-readable warnings shown before ending a tournament early. Empty
/// when every match has a result.
pub fn end_warnings(tournament: &Tournament) -> Vec<String> {
    let report = compute_health(tournament);
    let mut warnings = Vec::new();

    let remaining = report.total_matches - report.completed_matches;
    if remaining > 0 {
        warnings.push(format!("{remaining} matches have no result yet"));
    }
    if report.incomplete_in_current_round > 0 {
        warnings.push(format!(
            "Round {} still has {} unfinished {}",
            report.current_round + 1,
            report.incomplete_in_current_round,
            if report.incomplete_in_current_round == 1 {
                "match"
            } else {
                "matches"
            }
        ));
    }
    if report.completion_percentage < 50.0 {
        warnings.push(format!(
            "Only {:.0}% of matches are completed",
            report.completion_percentage
        ));
    }
    warnings
}
