//! Player identification and records.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Ids are allocated by the `Ledger` starting
//! at 1 and are never reused within a session.
//!
//! ## Player
//!
//! A registered player: id, display name, and chart color. Players are
//! immutable once created; the only lifecycle event after creation is removal.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Player identifier.
///
/// Ids are 1-based: the first player registered in a fresh ledger is `PlayerId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
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

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,

    /// Display name, trimmed and non-empty.
    pub name: String,

    /// Bar and legend color.
    pub color: Color,
}

impl Player {
    /// Create a new player record.
    pub fn new(id: PlayerId, name: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }

    /// Check whether `name` collides with this player's name.
    ///
    /// Comparison is case-insensitive on the trimmed input.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}

/// Normalised form used for name uniqueness checks.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
