//! Snapshot stores: where snapshots live between sessions.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::snapshot::{Snapshot, SnapshotFormat};
use super::StoreError;

/// Fixed logical key snapshots are stored under.
pub const SNAPSHOT_KEY: &str = "scorekeeper-data";

/// Load/save contract for the persisted snapshot.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Stores the snapshot as a single file named after [`SNAPSHOT_KEY`].
///
/// Saves write a sibling temporary file and rename it over the target, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
    format: SnapshotFormat,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>, format: SnapshotFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    /// Full path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", SNAPSHOT_KEY, self.format.extension()))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no snapshot yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = self.format.decode(&bytes)?;
        debug!(
            path = %path.display(),
            players = snapshot.players.len(),
            games = snapshot.games.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path();
        let tmp = path.with_extension(format!("{}.tmp", self.format.extension()));
        let bytes = self.format.encode(snapshot)?;

        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }
}

/// In-memory store holding the encoded bytes of the last save.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    format: SnapshotFormat,
    bytes: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new(format: SnapshotFormat) -> Self {
        Self {
            format,
            bytes: None,
            saves: 0,
        }
    }

    /// Seed the store with raw bytes, as if written by an earlier session.
    #[must_use]
    pub fn with_bytes(format: SnapshotFormat, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            format,
            bytes: Some(bytes.into()),
            saves: 0,
        }
    }

    /// Raw bytes of the last save.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        self.bytes
            .as_deref()
            .map(|bytes| self.format.decode(bytes))
            .transpose()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.bytes = Some(self.format.encode(snapshot)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, ColorScheme, Ledger};

    #[test]
    fn test_file_store_paths() {
        let store = FileStore::new("/tmp/sk", SnapshotFormat::Json);
        assert_eq!(store.path(), PathBuf::from("/tmp/sk/scorekeeper-data.json"));

        let store = FileStore::new("/tmp/sk", SnapshotFormat::Binary);
        assert_eq!(store.path(), PathBuf::from("/tmp/sk/scorekeeper-data.bin"));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut ledger = Ledger::new();
        ledger.add_player("A", Color::DEFAULT).unwrap();
        let snapshot = Snapshot::capture(&ledger, ColorScheme::Dark);

        let mut store = MemoryStore::new(SnapshotFormat::Json);
        assert!(store.load().unwrap().is_none());

        store.save(&snapshot).unwrap();
        assert_eq!(store.saves(), 1);
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_memory_store_corrupt_bytes() {
        let store = MemoryStore::with_bytes(SnapshotFormat::Json, b"garbage".to_vec());
        assert!(store.load().is_err());
    }
}
