//! Player data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and standings).
pub type PlayerId = Uuid;

/// Gender of a player. Only the mixed-pairs format cares about this.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

/// A player in the tournament. Identity only; results live in `Standing`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gender: Gender,
    /// Inactive players are skipped by the scheduler and the leaderboard.
    pub active: bool,
}

impl Player {
    /// Create a new active player with the given name and unspecified gender.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            gender: Gender::Unspecified,
            active: true,
        }
    }

    /// Create a new active player with an explicit gender (mixed-pairs rosters).
    pub fn with_gender(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            gender,
            ..Self::new(name)
        }
    }
}
