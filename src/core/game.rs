//! Game rows: one score per live player.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Game identifier. Allocated by the `Ledger` starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u32);

impl GameId {
    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game {}", self.0)
    }
}

/// Per-player scores for a single game.
pub type ScoreMap = FxHashMap<PlayerId, f64>;

/// A single game row.
///
/// The `Ledger` keeps `scores` keyed by exactly the set of live players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub scores: ScoreMap,
}

impl Game {
    /// Create a game with a zero score for each of `players`.
    pub fn zeroed(id: GameId, players: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            id,
            scores: players.into_iter().map(|p| (p, 0.0)).collect(),
        }
    }

    /// Score for a player; missing entries read as 0.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> f64 {
        self.scores.get(&player).copied().unwrap_or(0.0)
    }
}
