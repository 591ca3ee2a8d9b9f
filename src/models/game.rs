//! Match, Team, Bye, and Round data structures.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// An unordered pair of two players. `Team{A,B}` equals `Team{B,A}`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Team {
    pub first: PlayerId,
    pub second: PlayerId,
}

impl Team {
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        Self { first, second }
    }

    /// Both player ids, in stored order.
    pub fn players(&self) -> [PlayerId; 2] {
        [self.first, self.second]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.first == id || self.second == id
    }

    /// The other member of the pair, if `id` is on this team.
    pub fn partner_of(&self, id: PlayerId) -> Option<PlayerId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl Eq for Team {}

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Bye,
}

/// A single 2v2 match on one court in one round.
///
/// Scores are entered later: both present or both absent. A completed match
/// has scores summing to the tournament's fixed points per match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub round_index: usize,
    /// 0-based court index, unique within the round.
    pub court: usize,
    pub team_a: Team,
    pub team_b: Team,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    pub fn new(round_index: usize, court: usize, team_a: Team, team_b: Team) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_index,
            court,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            status: MatchStatus::Scheduled,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// True if the player is on either team.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.team_a.contains(id) || self.team_b.contains(id)
    }

    /// The winning team of a completed match. None if unscored or drawn.
    pub fn winning_team(&self) -> Option<&Team> {
        match (self.score_a, self.score_b) {
            (Some(a), Some(b)) if a > b => Some(&self.team_a),
            (Some(a), Some(b)) if b > a => Some(&self.team_b),
            _ => None,
        }
    }
}

/// A player sitting out one round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bye {
    pub player_id: PlayerId,
    pub round_index: usize,
}

/// Lifecycle of a round, derived from its matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// One round: matches on courts 0..matches.len() plus byes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub index: usize,
    pub matches: Vec<GameMatch>,
    pub byes: Vec<Bye>,
    pub status: RoundStatus,
}

impl Round {
    pub fn new(index: usize, matches: Vec<GameMatch>, byes: Vec<Bye>) -> Self {
        Self {
            index,
            matches,
            byes,
            status: RoundStatus::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RoundStatus::Completed
    }

    /// Recompute status from match statuses: Completed iff every match is
    /// completed, InProgress once any match has started or finished.
    pub fn derive_status(&mut self) {
        if !self.matches.is_empty() && self.matches.iter().all(GameMatch::is_completed) {
            self.status = RoundStatus::Completed;
        } else if self.matches.iter().any(|m| {
            m.status == MatchStatus::Completed || m.status == MatchStatus::InProgress
        }) {
            self.status = RoundStatus::InProgress;
        } else {
            self.status = RoundStatus::Pending;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_equality_ignores_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(Team::new(a, b), Team::new(b, a));
        assert_ne!(Team::new(a, b), Team::new(a, Uuid::new_v4()));
    }

    #[test]
    fn winning_team_none_on_draw() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut m = GameMatch::new(0, 0, Team::new(ids[0], ids[1]), Team::new(ids[2], ids[3]));
        assert!(m.winning_team().is_none());
        m.score_a = Some(12);
        m.score_b = Some(12);
        assert!(m.winning_team().is_none());
        m.score_b = Some(10);
        assert_eq!(m.winning_team(), Some(&m.team_a));
    }
}
