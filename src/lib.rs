//! # scorekeeper
//!
//! Score tracking for any game: register players, record per-game scores,
//! read running totals, and draw a bar-chart summary.
//!
//! ## Design Principles
//!
//! 1. **One Source of Truth**: the `Ledger` owns every player and game.
//!    Nothing else holds rows.
//!
//! 2. **Derived, Never Stored**: totals, rankings, chart series and the score
//!    table are pure functions of the ledger, recomputed after every change.
//!
//! 3. **Tolerant Input**: malformed scores become 0 and a corrupt snapshot
//!    becomes an empty ledger. Only name and player-count validation fail.
//!
//! ## Modules
//!
//! - `core`: ids, players, games, colors, score coercion, the ledger
//! - `presenter`: totals, ranked view, chart series, score table
//! - `persistence`: snapshot format and stores
//! - `chart`: bar chart renderers
//! - `session`: ledger + store + renderer + confirmation wiring
//! - `config`, `logging`: ambient setup for the binary

pub mod chart;
pub mod config;
pub mod core;
pub mod logging;
pub mod persistence;
pub mod presenter;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    coerce_score, Color, ColorPicker, ColorScheme, Game, GameId, Ledger, LedgerError, Player,
    PlayerId,
};

pub use crate::presenter::{ranked_view, totals, ChartSeries, ScoreTable, Standing, Totals, View};

pub use crate::persistence::{FileStore, MemoryStore, Snapshot, SnapshotFormat, SnapshotStore, StoreError};

pub use crate::chart::{ChartRenderer, TextChart};

pub use crate::session::{Confirm, Session, SessionOptions};

pub use crate::config::{load_config, AppConfig};
