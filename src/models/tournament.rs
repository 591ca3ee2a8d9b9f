//! Tournament snapshot, formats, statuses, and the engine error types.

use crate::models::game::{GameMatch, MatchId, Round};
use crate::models::player::{Player, PlayerId};
use crate::models::standing::{Standing, WinnerSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Pairing format for the whole tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Any two players can partner (open or same-sex americano).
    #[default]
    Open,
    /// Every team is exactly one male and one female.
    MixedPairs,
}

/// Tournament lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Active,
    Completed,
}

/// Why a roster is unusable for the mixed-pairs format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RosterIssue {
    /// Active male and female counts differ.
    UnequalGenderSplit { males: usize, females: usize },
    /// One gender has no active players at all.
    MissingGender,
}

/// Errors from schedule generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// Fewer than 4 active players.
    InsufficientPlayers { active: usize },
    /// Roster cannot be paired for the mixed format.
    InvalidRoster(RosterIssue),
    /// No candidate satisfied the schedule invariants. Internal invariant
    /// violation; cannot occur when the preconditions hold.
    GenerationFailed,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InsufficientPlayers { active } => {
                write!(f, "Need at least 4 active players to schedule (have {active})")
            }
            ScheduleError::InvalidRoster(RosterIssue::UnequalGenderSplit { males, females }) => {
                write!(
                    f,
                    "Mixed pairs needs equal gender counts (have {males} male, {females} female)"
                )
            }
            ScheduleError::InvalidRoster(RosterIssue::MissingGender) => {
                write!(f, "Mixed pairs needs at least one active player of each gender")
            }
            ScheduleError::GenerationFailed => {
                write!(f, "Schedule generation failed to produce a valid schedule")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Errors from score entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoringError {
    /// Scores must sum to the tournament's fixed points per match.
    InvalidScore {
        score_a: u32,
        score_b: u32,
        expected_total: u32,
    },
    /// No match with this id in any round.
    MatchNotFound(MatchId),
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::InvalidScore {
                score_a,
                score_b,
                expected_total,
            } => write!(
                f,
                "Scores {score_a}-{score_b} must sum to {expected_total}"
            ),
            ScoringError::MatchNotFound(_) => write!(f, "Match not found"),
        }
    }
}

impl std::error::Error for ScoringError {}

/// Errors from the time/format advisor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// The time budget does not fit a single match cycle.
    InsufficientTime {
        required_minutes: u32,
        available_minutes: u32,
    },
    /// Fewer than 4 players.
    InsufficientPlayers { players: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InsufficientTime {
                required_minutes,
                available_minutes,
            } => write!(
                f,
                "Need at least {required_minutes} minutes for one match cycle (have {available_minutes})"
            ),
            ValidationError::InsufficientPlayers { players } => {
                write!(f, "Need at least 4 players (have {players})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Full tournament snapshot: roster, schedule, config, and derived results.
///
/// Created once by the scheduler; afterwards only match scores/statuses and
/// the tournament status/timestamps change in place. Standings and the
/// winner summary are rebuilt wholesale after every mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub courts_count: usize,
    /// Fixed total points per match (e.g. 16, 24, 32). Entered scores must
    /// sum to this.
    pub points_per_match: u32,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    /// Base seed the winning schedule was generated from, for reproducibility.
    pub schedule_seed: u64,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub standings: Vec<Standing>,
    pub winner_summary: Option<WinnerSummary>,
}

impl Tournament {
    /// Assemble a tournament from a generated schedule. Standings start at
    /// zero for every roster player.
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        courts_count: usize,
        points_per_match: u32,
        format: TournamentFormat,
        rounds: Vec<Round>,
        schedule_seed: u64,
    ) -> Self {
        let standings = players.iter().map(|p| Standing::zero(p.id)).collect();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players,
            rounds,
            courts_count,
            points_per_match,
            format,
            status: TournamentStatus::Active,
            schedule_seed,
            created_at: Utc::now(),
            ended_at: None,
            completed_at: None,
            standings,
            winner_summary: None,
        }
    }

    /// Active roster players, in roster order.
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.active).collect()
    }

    /// Display name for a player id (empty string if unknown).
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map_or("", |p| p.name.as_str())
    }

    pub fn find_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .find(|m| m.id == id)
    }

    pub fn find_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.matches.iter_mut())
            .find(|m| m.id == id)
    }

    pub fn all_rounds_completed(&self) -> bool {
        !self.rounds.is_empty() && self.rounds.iter().all(Round::is_completed)
    }
}
