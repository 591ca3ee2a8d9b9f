//! Schedule generation: randomized-restart search over format-specific
//! candidate generators, scored by a weighted fairness cost.

use crate::logic::{mixed_play, open_play};
use crate::models::{
    Gender, Player, PlayerId, Round, RosterIssue, ScheduleError, Team, Tournament,
    TournamentFormat,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Independent candidate schedules generated per call.
pub const CANDIDATE_COUNT: usize = 200;

/// Cost weight for a repeated partnership (worst fairness violation).
pub const PARTNER_WEIGHT: f64 = 1000.0;
/// Cost weight for a repeated opponent pairing.
pub const OPPONENT_WEIGHT: f64 = 300.0;
/// Cost weight for court-usage variance.
pub const COURT_WEIGHT: f64 = 50.0;
/// Cost weight for bye-count variance.
pub const BYE_WEIGHT: f64 = 200.0;

/// Every schedule has at least this many rounds.
pub const MIN_ROUNDS: usize = 3;
/// Practical cap on schedule length regardless of roster size.
pub const MAX_ROUNDS: usize = 15;

/// Per-court candidate window in the open format. Tunable; search cost grows
/// with the fourth power of the window.
pub const COURT_SEARCH_WINDOW: usize = 20;

/// Raw fairness components of the winning candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub partner_repeats: u32,
    pub opponent_repeats: u32,
    pub court_variance: f64,
    pub bye_variance: f64,
}

/// A generated schedule with the seed that reproduces it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub rounds: Vec<Round>,
    pub seed: u64,
    pub score: f64,
    pub stats: ScheduleStats,
}

/// Fairness counters scoped to one candidate generation. Pair maps are keyed
/// by the normalized (min, max) id pair so each pairing is counted once.
/// Ordered maps keep the float accumulation in the variance terms
/// reproducible for a given seed.
pub(crate) struct PairTally {
    partners: BTreeMap<(PlayerId, PlayerId), u32>,
    opponents: BTreeMap<(PlayerId, PlayerId), u32>,
    courts: BTreeMap<PlayerId, Vec<u32>>,
    byes: BTreeMap<PlayerId, u32>,
}

impl PairTally {
    pub(crate) fn new(players: &[PlayerId], courts_count: usize) -> Self {
        Self {
            partners: BTreeMap::new(),
            opponents: BTreeMap::new(),
            courts: players.iter().map(|&p| (p, vec![0; courts_count])).collect(),
            byes: players.iter().map(|&p| (p, 0)).collect(),
        }
    }

    fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub(crate) fn partner_count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.partners.get(&Self::pair_key(a, b)).copied().unwrap_or(0)
    }

    pub(crate) fn opponent_count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.opponents.get(&Self::pair_key(a, b)).copied().unwrap_or(0)
    }

    pub(crate) fn court_count(&self, player: PlayerId, court: usize) -> u32 {
        self.courts
            .get(&player)
            .and_then(|usage| usage.get(court))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn bye_count(&self, player: PlayerId) -> u32 {
        self.byes.get(&player).copied().unwrap_or(0)
    }

    /// Cross-team opponent count for a prospective match-up of two teams.
    pub(crate) fn cross_opponent_count(&self, team_a: &Team, team_b: &Team) -> u32 {
        let mut total = 0;
        for a in team_a.players() {
            for b in team_b.players() {
                total += self.opponent_count(a, b);
            }
        }
        total
    }

    /// Weighted cost of scheduling `team_a` vs `team_b` on `court`, given the
    /// pairings recorded so far. Used by the open-format per-court search.
    pub(crate) fn pairing_cost(&self, team_a: &Team, team_b: &Team, court: usize) -> f64 {
        let partner =
            self.partner_count(team_a.first, team_a.second) + self.partner_count(team_b.first, team_b.second);
        let opponent = self.cross_opponent_count(team_a, team_b);
        let court_usage: u32 = team_a
            .players()
            .into_iter()
            .chain(team_b.players())
            .map(|p| self.court_count(p, court))
            .sum();
        PARTNER_WEIGHT * f64::from(partner)
            + OPPONENT_WEIGHT * f64::from(opponent)
            + COURT_WEIGHT * f64::from(court_usage)
    }

    pub(crate) fn record_match(&mut self, team_a: &Team, team_b: &Team, court: usize) {
        *self.partners.entry(Self::pair_key(team_a.first, team_a.second)).or_insert(0) += 1;
        *self.partners.entry(Self::pair_key(team_b.first, team_b.second)).or_insert(0) += 1;
        for a in team_a.players() {
            for b in team_b.players() {
                *self.opponents.entry(Self::pair_key(a, b)).or_insert(0) += 1;
            }
        }
        for p in team_a.players().into_iter().chain(team_b.players()) {
            if let Some(usage) = self.courts.get_mut(&p) {
                if let Some(slot) = usage.get_mut(court) {
                    *slot += 1;
                }
            }
        }
    }

    pub(crate) fn record_bye(&mut self, player: PlayerId) {
        *self.byes.entry(player).or_insert(0) += 1;
    }

    fn partner_repeats(&self) -> u32 {
        self.partners.values().map(|&v| v.saturating_sub(1)).sum()
    }

    fn opponent_repeats(&self) -> u32 {
        self.opponents.values().map(|&v| v.saturating_sub(1)).sum()
    }

    fn court_variance(&self) -> f64 {
        let counts: Vec<f64> = self
            .courts
            .values()
            .flat_map(|usage| usage.iter().map(|&c| f64::from(c)))
            .collect();
        population_variance(&counts)
    }

    fn bye_variance(&self) -> f64 {
        let counts: Vec<f64> = self.byes.values().map(|&c| f64::from(c)).collect();
        population_variance(&counts)
    }
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// How many players take the court each round, and how many rounds the
/// schedule runs. Rounds aim at close to (n - 1) matches per player, floored
/// at [`MIN_ROUNDS`] and capped at [`MAX_ROUNDS`].
pub(crate) fn round_plan(active_count: usize, courts_count: usize) -> (usize, usize) {
    let players_per_round = (4 * courts_count).min(active_count);
    let slots_needed = active_count * (active_count - 1);
    let rounds = slots_needed.div_ceil(players_per_round).clamp(MIN_ROUNDS, MAX_ROUNDS);
    (players_per_round, rounds)
}

/// Generate a schedule with the default candidate count.
///
/// Returns the lowest-cost schedule over [`CANDIDATE_COUNT`] seeded restarts,
/// together with the base seed (reproducible: the same seed yields the same
/// schedule), the winning cost, and its raw fairness components.
pub fn generate_schedule(
    players: &[Player],
    courts_count: usize,
    format: TournamentFormat,
    seed: Option<u64>,
) -> Result<ScheduleResult, ScheduleError> {
    generate_schedule_with(players, courts_count, format, seed, CANDIDATE_COUNT)
}

/// [`generate_schedule`] with an explicit candidate count (restart budget).
pub fn generate_schedule_with(
    players: &[Player],
    courts_count: usize,
    format: TournamentFormat,
    seed: Option<u64>,
    candidates: usize,
) -> Result<ScheduleResult, ScheduleError> {
    let active: Vec<&Player> = players.iter().filter(|p| p.active).collect();
    if active.len() < 4 {
        return Err(ScheduleError::InsufficientPlayers { active: active.len() });
    }
    if format == TournamentFormat::MixedPairs {
        check_mixed_roster(&active)?;
    }

    let courts_count = courts_count.max(1);
    let base_seed = seed.unwrap_or_else(|| rand::thread_rng().gen());

    let mut best: Option<(Vec<Round>, f64, ScheduleStats)> = None;
    for i in 0..candidates.max(1) {
        let mut rng = StdRng::seed_from_u64(derive_seed(base_seed, i));
        let (rounds, tally) = match format {
            TournamentFormat::Open => open_play::generate_candidate(&active, courts_count, &mut rng),
            TournamentFormat::MixedPairs => {
                mixed_play::generate_candidate(&active, courts_count, &mut rng)
            }
        };
        let stats = ScheduleStats {
            partner_repeats: tally.partner_repeats(),
            opponent_repeats: tally.opponent_repeats(),
            court_variance: tally.court_variance(),
            bye_variance: tally.bye_variance(),
        };
        let score = PARTNER_WEIGHT * f64::from(stats.partner_repeats)
            + OPPONENT_WEIGHT * f64::from(stats.opponent_repeats)
            + COURT_WEIGHT * stats.court_variance
            + BYE_WEIGHT * stats.bye_variance;
        if best.as_ref().map_or(true, |(_, s, _)| score < *s) {
            debug!("candidate {i}: new best cost {score:.1}");
            best = Some((rounds, score, stats));
        }
    }

    let (rounds, score, stats) = best.ok_or(ScheduleError::GenerationFailed)?;
    if !schedule_is_valid(&rounds, &active, format) {
        return Err(ScheduleError::GenerationFailed);
    }
    info!(
        "schedule: {} rounds for {} players on {} courts, cost {:.1} (seed {})",
        rounds.len(),
        active.len(),
        courts_count,
        score,
        base_seed
    );
    Ok(ScheduleResult {
        rounds,
        seed: base_seed,
        score,
        stats,
    })
}

/// Generate a schedule and assemble a ready-to-play tournament snapshot.
pub fn create_tournament(
    name: impl Into<String>,
    players: Vec<Player>,
    courts_count: usize,
    points_per_match: u32,
    format: TournamentFormat,
    seed: Option<u64>,
) -> Result<Tournament, ScheduleError> {
    let schedule = generate_schedule(&players, courts_count, format, seed)?;
    Ok(Tournament::new(
        name,
        players,
        courts_count.max(1),
        points_per_match,
        format,
        schedule.rounds,
        schedule.seed,
    ))
}

fn check_mixed_roster(active: &[&Player]) -> Result<(), ScheduleError> {
    let males = active.iter().filter(|p| p.gender == Gender::Male).count();
    let females = active.iter().filter(|p| p.gender == Gender::Female).count();
    if males == 0 || females == 0 {
        return Err(ScheduleError::InvalidRoster(RosterIssue::MissingGender));
    }
    if males != females || males + females != active.len() {
        return Err(ScheduleError::InvalidRoster(RosterIssue::UnequalGenderSplit {
            males,
            females,
        }));
    }
    Ok(())
}

/// Splitmix-style stride so candidate streams are decorrelated.
fn derive_seed(base: u64, candidate: usize) -> u64 {
    base.wrapping_add((candidate as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Check the schedule invariants: every active player in exactly one match
/// or bye per round, contiguous court indices, and one-male-one-female teams
/// in the mixed format.
fn schedule_is_valid(rounds: &[Round], active: &[&Player], format: TournamentFormat) -> bool {
    let active_ids: HashSet<PlayerId> = active.iter().map(|p| p.id).collect();
    let genders: HashMap<PlayerId, Gender> = active.iter().map(|p| (p.id, p.gender)).collect();

    for round in rounds {
        let mut seen = HashSet::new();
        for m in &round.matches {
            for team in [&m.team_a, &m.team_b] {
                if format == TournamentFormat::MixedPairs && !is_mixed_team(team, &genders) {
                    return false;
                }
                for id in team.players() {
                    if !seen.insert(id) {
                        return false;
                    }
                }
            }
        }
        for bye in &round.byes {
            if !seen.insert(bye.player_id) {
                return false;
            }
        }
        if seen != active_ids {
            return false;
        }

        let mut courts: Vec<usize> = round.matches.iter().map(|m| m.court).collect();
        courts.sort_unstable();
        if courts.iter().enumerate().any(|(i, &c)| i != c) {
            return false;
        }
    }
    true
}

fn is_mixed_team(team: &Team, genders: &HashMap<PlayerId, Gender>) -> bool {
    matches!(
        (genders.get(&team.first), genders.get(&team.second)),
        (Some(Gender::Male), Some(Gender::Female)) | (Some(Gender::Female), Some(Gender::Male))
    )
}
