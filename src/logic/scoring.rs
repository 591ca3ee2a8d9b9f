//! Score entry and tournament completion.

use crate::logic::standings::{compute_winner_summary, recalculate_standings};
use crate::models::{MatchId, MatchStatus, ScoringError, Tournament, TournamentStatus};
use chrono::Utc;
use log::info;

/// Enter the result of a match. Scores must sum to the tournament's fixed
/// points per match. Marks the match completed, re-derives the round status,
/// rebuilds all standings, and finalizes the tournament once every round is
/// complete.
pub fn update_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<(), ScoringError> {
    if score_a.saturating_add(score_b) != tournament.points_per_match {
        return Err(ScoringError::InvalidScore {
            score_a,
            score_b,
            expected_total: tournament.points_per_match,
        });
    }

    let m = tournament
        .find_match_mut(match_id)
        .ok_or(ScoringError::MatchNotFound(match_id))?;
    m.score_a = Some(score_a);
    m.score_b = Some(score_b);
    m.status = MatchStatus::Completed;
    m.completed_at = Some(Utc::now());
    let round_index = m.round_index;

    if let Some(round) = tournament.rounds.get_mut(round_index) {
        round.derive_status();
    }
    tournament.standings = recalculate_standings(tournament);

    if tournament.all_rounds_completed() && tournament.status != TournamentStatus::Completed {
        finalize(tournament);
    }
    Ok(())
}

/// Clear a match result (post-completion edits included). Re-derives the
/// round status and standings; a completed tournament reopens.
pub fn reset_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
) -> Result<(), ScoringError> {
    let m = tournament
        .find_match_mut(match_id)
        .ok_or(ScoringError::MatchNotFound(match_id))?;
    m.score_a = None;
    m.score_b = None;
    m.status = MatchStatus::Scheduled;
    m.completed_at = None;
    let round_index = m.round_index;

    if let Some(round) = tournament.rounds.get_mut(round_index) {
        round.derive_status();
    }
    tournament.standings = recalculate_standings(tournament);

    if tournament.status == TournamentStatus::Completed {
        tournament.status = TournamentStatus::Active;
        tournament.ended_at = None;
        tournament.completed_at = None;
        tournament.winner_summary = None;
    }
    Ok(())
}

/// Complete the tournament: stamp end times and store the final standings
/// and winner summary.
pub fn finalize(tournament: &mut Tournament) {
    tournament.standings = recalculate_standings(tournament);
    tournament.winner_summary = Some(compute_winner_summary(
        &tournament.players,
        &tournament.standings,
        tournament.format,
    ));
    tournament.status = TournamentStatus::Completed;
    let now = Utc::now();
    tournament.ended_at = Some(now);
    tournament.completed_at = Some(now);
    info!("tournament '{}' completed", tournament.name);
}

/// Recompute standings and winner summary after post-completion edits,
/// leaving status and timestamps untouched.
pub fn refinalize(tournament: &mut Tournament) {
    tournament.standings = recalculate_standings(tournament);
    tournament.winner_summary = Some(compute_winner_summary(
        &tournament.players,
        &tournament.standings,
        tournament.format,
    ));
}
