//! Tournament engine logic: scheduling, standings, scoring, health, advisor.

mod advisor;
mod health;
mod mixed_play;
mod open_play;
mod scheduler;
mod scoring;
mod standings;

pub use advisor::{recommend, Recommendation};
pub use health::{compute_health, end_warnings, HealthLevel, HealthReport};
pub use scheduler::{
    create_tournament, generate_schedule, generate_schedule_with, ScheduleResult, ScheduleStats,
    CANDIDATE_COUNT, MAX_ROUNDS, MIN_ROUNDS,
};
pub use scoring::{finalize, refinalize, reset_match_score, update_match_score};
pub use standings::{compute_winner_summary, leaderboard, recalculate_standings};
