//! Data structures for the americano tournament engine: players, matches,
//! rounds, standings, and the tournament snapshot.

mod game;
mod player;
mod standing;
mod tournament;

pub use game::{Bye, GameMatch, MatchId, MatchStatus, Round, RoundStatus, Team};
pub use player::{Gender, Player, PlayerId};
pub use standing::{Standing, WinnerSummary};
pub use tournament::{
    RosterIssue, ScheduleError, ScoringError, Tournament, TournamentFormat, TournamentId,
    TournamentStatus, ValidationError,
};
