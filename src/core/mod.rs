//! Core ledger types: players, games, colors, score coercion, and the ledger itself.
//!
//! Everything here is synchronous and free of I/O. Persistence, rendering
//! and prompting live in the modules that wrap the ledger.

pub mod color;
pub mod game;
pub mod ledger;
pub mod player;
pub mod score;

pub use color::{Color, ColorError, ColorPicker, ColorScheme, PALETTE};
pub use game::{Game, GameId, ScoreMap};
pub use ledger::{Ledger, LedgerError};
pub use player::{Player, PlayerId};
pub use score::coerce_score;
