//! Snapshot persistence.
//!
//! - `Snapshot`: serialized `{players, games, colorScheme}`
//! - `SnapshotFormat`: JSON or bincode encoding
//! - `SnapshotStore`: load/save contract, with file and in-memory stores
//!
//! Loading is tolerant: see [`load_tolerant`].

pub mod snapshot;
pub mod store;

pub use snapshot::{Snapshot, SnapshotFormat};
pub use store::{FileStore, MemoryStore, SnapshotStore, SNAPSHOT_KEY};

use thiserror::Error;
use tracing::warn;

/// Failures reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Binary(#[from] bincode::Error),
}

/// Load a snapshot, never failing.
///
/// A missing snapshot is the normal first-run case and returns `None`. An
/// unreadable or corrupt snapshot is logged and also returns `None`, so the
/// caller starts from an empty ledger.
pub fn load_tolerant(store: &impl SnapshotStore) -> Option<Snapshot> {
    match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "could not load snapshot, starting with an empty ledger");
            None
        }
    }
}
