//! Americano tournament engine: schedule generation, standings, and health
//! monitoring. The UI/persistence layer is an external caller; this crate
//! only computes.

pub mod logic;
pub mod models;

pub use logic::{
    compute_health, compute_winner_summary, create_tournament, end_warnings, finalize,
    generate_schedule, generate_schedule_with, leaderboard, recalculate_standings, recommend,
    refinalize, reset_match_score, update_match_score, HealthLevel, HealthReport, Recommendation,
    ScheduleResult, ScheduleStats,
};
pub use models::{
    Bye, GameMatch, Gender, MatchId, MatchStatus, Player, PlayerId, RosterIssue, Round,
    RoundStatus, ScheduleError, ScoringError, Standing, Team, Tournament, TournamentFormat,
    TournamentId, TournamentStatus, ValidationError, WinnerSummary,
};
