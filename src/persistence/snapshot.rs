//! Serialized ledger form and its encodings.

use serde::{Deserialize, Serialize};

use crate::core::{ColorScheme, Game, Ledger, LedgerError, Player};

use super::StoreError;

/// Everything persisted between sessions.
///
/// JSON layout:
///
/// ```json
/// {
///   "players": [{"id": 1, "name": "A", "color": "#ff6b6b"}],
///   "games": [{"id": 1, "scores": {"1": 10.0}}],
///   "colorScheme": "light"
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub players: Vec<Player>,

    #[serde(default)]
    pub games: Vec<Game>,

    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl Snapshot {
    /// Capture the current ledger rows.
    #[must_use]
    pub fn capture(ledger: &Ledger, color_scheme: ColorScheme) -> Self {
        Self {
            players: ledger.players().to_vec(),
            games: ledger.games().to_vec(),
            color_scheme,
        }
    }

    /// Rebuild a ledger. Next-id counters are recomputed from the stored ids.
    pub fn into_ledger(self) -> Result<Ledger, LedgerError> {
        Ledger::from_parts(self.players, self.games)
    }
}

/// On-disk encoding of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Compact bincode.
    Binary,
}

impl SnapshotFormat {
    /// File extension used by `FileStore`.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Binary => "bin",
        }
    }

    pub fn encode(self, snapshot: &Snapshot) -> Result<Vec<u8>, StoreError> {
        match self {
            SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(snapshot)?),
            SnapshotFormat::Binary => Ok(bincode::serialize(snapshot)?),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Snapshot, StoreError> {
        match self {
            SnapshotFormat::Json => Ok(serde_json::from_slice(bytes)?),
            SnapshotFormat::Binary => Ok(bincode::deserialize(bytes)?),
        }
    }
}
