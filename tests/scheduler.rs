//! Integration tests for schedule generation: coverage, fairness accounting,
//! format preconditions, and seed reproducibility.

use americano_tournament::{
    generate_schedule, Gender, Player, PlayerId, RosterIssue, Round, ScheduleError,
    TournamentFormat,
};
use std::collections::HashSet;

fn open_roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

fn mixed_roster(pairs: usize) -> Vec<Player> {
    let mut players = Vec::new();
    for i in 0..pairs {
        players.push(Player::with_gender(format!("M{i}"), Gender::Male));
        players.push(Player::with_gender(format!("F{i}"), Gender::Female));
    }
    players
}

/// Structural view of a schedule, ignoring the random match ids.
fn shape(rounds: &[Round]) -> Vec<(Vec<(usize, Vec<PlayerId>)>, Vec<PlayerId>)> {
    rounds
        .iter()
        .map(|r| {
            (
                r.matches
                    .iter()
                    .map(|m| {
                        (
                            m.court,
                            vec![m.team_a.first, m.team_a.second, m.team_b.first, m.team_b.second],
                        )
                    })
                    .collect(),
                r.byes.iter().map(|b| b.player_id).collect(),
            )
        })
        .collect()
}

#[test]
fn requires_at_least_4_active_players() {
    let _ = env_logger::builder().is_test(true).try_init();
    let result = generate_schedule(&open_roster(3), 2, TournamentFormat::Open, Some(1));
    assert!(matches!(
        result,
        Err(ScheduleError::InsufficientPlayers { active: 3 })
    ));
}

#[test]
fn inactive_players_do_not_count() {
    let mut players = open_roster(6);
    players[4].active = false;
    players[5].active = false;
    players[3].active = false;
    let result = generate_schedule(&players, 1, TournamentFormat::Open, Some(1));
    assert!(matches!(
        result,
        Err(ScheduleError::InsufficientPlayers { active: 3 })
    ));
}

#[test]
fn mixed_rejects_unequal_gender_counts() {
    let mut players = mixed_roster(2);
    players.push(Player::with_gender("M9", Gender::Male));
    let result = generate_schedule(&players, 1, TournamentFormat::MixedPairs, Some(1));
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidRoster(RosterIssue::UnequalGenderSplit {
            males: 3,
            females: 2
        }))
    ));
}

#[test]
fn mixed_rejects_single_gender_roster() {
    let players: Vec<Player> = (0..4)
        .map(|i| Player::with_gender(format!("M{i}"), Gender::Male))
        .collect();
    let result = generate_schedule(&players, 1, TournamentFormat::MixedPairs, Some(1));
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidRoster(RosterIssue::MissingGender))
    ));
}

#[test]
fn eight_players_two_courts_fills_both_courts_with_no_byes() {
    let schedule =
        generate_schedule(&open_roster(8), 2, TournamentFormat::Open, Some(7)).unwrap();
    assert!(schedule.rounds.len() >= 3);
    for round in &schedule.rounds {
        assert_eq!(round.matches.len(), 2);
        assert!(round.byes.is_empty());
        let courts: Vec<usize> = round.matches.iter().map(|m| m.court).collect();
        assert_eq!(courts, vec![0, 1]);
    }
}

#[test]
fn every_round_partitions_the_active_players() {
    let players = open_roster(10);
    let all_ids: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    let schedule = generate_schedule(&players, 2, TournamentFormat::Open, Some(11)).unwrap();

    for round in &schedule.rounds {
        let mut seen = HashSet::new();
        for m in &round.matches {
            for id in m.team_a.players().into_iter().chain(m.team_b.players()) {
                assert!(seen.insert(id), "player appears twice in round {}", round.index);
            }
        }
        for bye in &round.byes {
            assert!(
                seen.insert(bye.player_id),
                "bye player also plays in round {}",
                round.index
            );
        }
        assert_eq!(seen, all_ids, "round {} does not cover the roster", round.index);
    }
}

#[test]
fn total_byes_match_the_per_round_overflow() {
    // 10 players on 2 courts: 8 play per round, 2 sit out.
    let players = open_roster(10);
    let schedule = generate_schedule(&players, 2, TournamentFormat::Open, Some(3)).unwrap();
    let total_byes: usize = schedule.rounds.iter().map(|r| r.byes.len()).sum();
    assert_eq!(total_byes, schedule.rounds.len() * 2);
}

#[test]
fn mixed_teams_are_one_male_one_female() {
    let players = mixed_roster(4);
    let genders: std::collections::HashMap<PlayerId, Gender> =
        players.iter().map(|p| (p.id, p.gender)).collect();
    let schedule =
        generate_schedule(&players, 2, TournamentFormat::MixedPairs, Some(5)).unwrap();

    for round in &schedule.rounds {
        for m in &round.matches {
            for team in [&m.team_a, &m.team_b] {
                let pair = (genders[&team.first], genders[&team.second]);
                assert!(
                    pair == (Gender::Male, Gender::Female)
                        || pair == (Gender::Female, Gender::Male),
                    "team is not mixed in round {}",
                    round.index
                );
            }
        }
    }
}

#[test]
fn mixed_odd_team_counts_produce_byes() {
    // 6 teams on 2 courts: 2 teams (4 players) sit out each round.
    let players = mixed_roster(6);
    let schedule =
        generate_schedule(&players, 2, TournamentFormat::MixedPairs, Some(9)).unwrap();
    for round in &schedule.rounds {
        assert_eq!(round.matches.len(), 2);
        assert_eq!(round.byes.len(), 4);
    }
}

#[test]
fn same_seed_reproduces_the_same_schedule() {
    let players = open_roster(9);
    let first = generate_schedule(&players, 2, TournamentFormat::Open, Some(42)).unwrap();
    let second = generate_schedule(&players, 2, TournamentFormat::Open, Some(42)).unwrap();
    assert_eq!(first.seed, 42);
    assert_eq!(first.score, second.score);
    assert_eq!(shape(&first.rounds), shape(&second.rounds));
}

#[test]
fn stats_components_are_reported() {
    let schedule =
        generate_schedule(&open_roster(8), 2, TournamentFormat::Open, Some(13)).unwrap();
    // 8 players all playing every round: no byes, so no bye variance.
    assert_eq!(schedule.stats.bye_variance, 0.0);
    assert!(schedule.score >= 0.0);
}
