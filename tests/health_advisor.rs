//! Integration tests for the health monitor and the time/format advisor.

use americano_tournament::{
    compute_health, end_warnings, recommend, update_match_score, GameMatch, HealthLevel, Player,
    Round, Team, Tournament, TournamentFormat, ValidationError,
};

/// Hand-built tournament: 5 rounds of 2 matches over an 8-player roster.
fn ten_match_tournament() -> Tournament {
    let players: Vec<Player> = (0..8).map(|i| Player::new(format!("P{i}"))).collect();
    let ids: Vec<_> = players.iter().map(|p| p.id).collect();

    let rounds = (0..5)
        .map(|round_index| {
            // Rotate the roster so every player appears in every round.
            let mut order = ids.clone();
            order.rotate_left(round_index);
            let matches = vec![
                GameMatch::new(
                    round_index,
                    0,
                    Team::new(order[0], order[1]),
                    Team::new(order[2], order[3]),
                ),
                GameMatch::new(
                    round_index,
                    1,
                    Team::new(order[4], order[5]),
                    Team::new(order[6], order[7]),
                ),
            ];
            Round::new(round_index, matches, Vec::new())
        })
        .collect();

    Tournament::new("Health check", players, 2, 24, TournamentFormat::Open, rounds, 0)
}

fn complete_first_n_matches(t: &mut Tournament, n: usize) {
    let ids: Vec<_> = t
        .rounds
        .iter()
        .flat_map(|r| r.matches.iter().map(|m| m.id))
        .take(n)
        .collect();
    for id in ids {
        update_match_score(t, id, 14, 10).unwrap();
    }
}

#[test]
fn six_of_ten_matches_is_moderate_health() {
    let mut t = ten_match_tournament();
    complete_first_n_matches(&mut t, 6);

    let report = compute_health(&t);
    assert_eq!(report.total_matches, 10);
    assert_eq!(report.completed_matches, 6);
    assert_eq!(report.completion_percentage, 60.0);
    assert_eq!(report.level, HealthLevel::Moderate);
    assert_eq!(report.completed_rounds, 3);
    assert_eq!(report.current_round, 3);
    assert_eq!(report.incomplete_in_current_round, 2);
    assert_eq!(report.rounds_with_incomplete, 2);
    assert_eq!(report.idle_players, 0);
}

#[test]
fn full_completion_is_complete_health_with_no_warnings() {
    let mut t = ten_match_tournament();
    complete_first_n_matches(&mut t, 10);

    let report = compute_health(&t);
    assert_eq!(report.completion_percentage, 100.0);
    assert_eq!(report.level, HealthLevel::Complete);
    // Everything is done: the current round settles on the last round.
    assert_eq!(report.current_round, 4);
    assert!(end_warnings(&t).is_empty());
}

#[test]
fn warnings_list_remaining_work() {
    let mut t = ten_match_tournament();
    complete_first_n_matches(&mut t, 6);

    let warnings = end_warnings(&t);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("4 matches"));
    assert!(warnings[1].contains("Round 4"));
}

#[test]
fn low_completion_adds_a_percentage_warning() {
    let mut t = ten_match_tournament();
    complete_first_n_matches(&mut t, 2);

    let report = compute_health(&t);
    assert_eq!(report.level, HealthLevel::Low);
    let warnings = end_warnings(&t);
    assert_eq!(warnings.len(), 3);
    assert!(warnings[2].contains("20%"));
}

#[test]
fn players_outside_every_match_are_reported_idle() {
    let mut t = ten_match_tournament();
    t.players.push(Player::new("Latecomer"));
    let report = compute_health(&t);
    assert_eq!(report.idle_players, 1);
}

#[test]
fn advisor_recommends_rounds_and_points_for_the_budget() {
    let rec = recommend(90, 12, 3, 2, 8).unwrap();
    assert_eq!(rec.matches_per_round, 2);
    assert_eq!(rec.estimated_rounds, 6);
    assert_eq!(rec.recommended_points_per_match, 24);
    assert_eq!(rec.recommended_serves_per_player, 6);
    assert_eq!(rec.estimated_minutes_used, 90);
}

#[test]
fn advisor_rejects_budgets_below_one_match_cycle() {
    assert_eq!(
        recommend(10, 12, 3, 2, 8),
        Err(ValidationError::InsufficientTime {
            required_minutes: 15,
            available_minutes: 10
        })
    );
}

#[test]
fn advisor_rejects_small_groups() {
    assert_eq!(
        recommend(90, 12, 3, 2, 3),
        Err(ValidationError::InsufficientPlayers { players: 3 })
    );
}

#[test]
fn advisor_caps_matches_per_round_by_roster_size() {
    // 4 players can only fill one court no matter how many exist.
    let rec = recommend(60, 12, 3, 3, 4).unwrap();
    assert_eq!(rec.matches_per_round, 1);
}
