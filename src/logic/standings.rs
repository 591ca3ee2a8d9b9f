//! Standings calculation: full rebuild from rounds, deterministic ranking,
//! and the winner summary.

use crate::models::{
    Gender, Player, PlayerId, Standing, Tournament, TournamentFormat, WinnerSummary,
};
use std::collections::HashMap;

/// Rebuild per-player aggregates from scratch: every completed match credits
/// both sides, every bye bumps the bye count. Purely a function of the rounds
/// and roster; calling it twice on the same snapshot yields the same result.
///
/// A drawn match counts as neither a win nor a loss for either side.
pub fn recalculate_standings(tournament: &Tournament) -> Vec<Standing> {
    let mut standings: Vec<Standing> = tournament
        .players
        .iter()
        .map(|p| Standing::zero(p.id))
        .collect();
    let index: HashMap<PlayerId, usize> = tournament
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    for round in &tournament.rounds {
        for m in &round.matches {
            if !m.is_completed() {
                continue;
            }
            let (Some(score_a), Some(score_b)) = (m.score_a, m.score_b) else {
                continue;
            };
            for id in m.team_a.players() {
                if let Some(&i) = index.get(&id) {
                    credit(&mut standings[i], score_a, score_b);
                }
            }
            for id in m.team_b.players() {
                if let Some(&i) = index.get(&id) {
                    credit(&mut standings[i], score_b, score_a);
                }
            }
        }
        for bye in &round.byes {
            if let Some(&i) = index.get(&bye.player_id) {
                standings[i].byes += 1;
            }
        }
    }

    standings
}

fn credit(standing: &mut Standing, scored: u32, conceded: u32) {
    standing.matches_played += 1;
    standing.total_points += scored;
    standing.points_for += scored;
    standing.points_against += conceded;
    if scored > conceded {
        standing.wins += 1;
    } else if scored < conceded {
        standing.losses += 1;
    }
}

/// Rank standings: total points desc, wins desc, point differential desc,
/// then display name asc as the final deterministic tie-break.
pub fn leaderboard(players: &[Player], standings: &[Standing]) -> Vec<Standing> {
    let names: HashMap<PlayerId, &str> = players.iter().map(|p| (p.id, p.name.as_str())).collect();
    let mut ranked = standings.to_vec();
    ranked.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| b.point_differential().cmp(&a.point_differential()))
            .then_with(|| {
                let name_a = names.get(&a.player_id).copied().unwrap_or("");
                let name_b = names.get(&b.player_id).copied().unwrap_or("");
                name_a.cmp(name_b)
            })
    });
    ranked
}

/// Overall winner, top 3, and (mixed pairs only) the first-ranked player of
/// each gender. Top male/female are independent of top-3 membership.
pub fn compute_winner_summary(
    players: &[Player],
    standings: &[Standing],
    format: TournamentFormat,
) -> WinnerSummary {
    let ranked = leaderboard(players, standings);
    let genders: HashMap<PlayerId, Gender> = players.iter().map(|p| (p.id, p.gender)).collect();

    let (top_male, top_female) = if format == TournamentFormat::MixedPairs {
        let first_of = |gender: Gender| {
            ranked
                .iter()
                .find(|s| genders.get(&s.player_id) == Some(&gender))
                .map(|s| s.player_id)
        };
        (first_of(Gender::Male), first_of(Gender::Female))
    } else {
        (None, None)
    };

    WinnerSummary {
        winner: ranked.first().map(|s| s.player_id),
        top_three: ranked.iter().take(3).map(|s| s.player_id).collect(),
        top_male,
        top_female,
    }
}
