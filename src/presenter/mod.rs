//! Derived views over a ledger.
//!
//! Every function here is a pure function of the current ledger state.
//! Nothing is cached; callers recompute after each committed change.
//!
//! - `totals`: per-player sums across games
//! - `ranked_view`: players by descending total, ties in registration order
//! - `ChartSeries`: labels, values, and colors for a bar chart
//! - `ScoreTable`: the per-game score grid with a totals row

pub mod table;
pub mod view;

pub use table::{ScoreTable, TableRow};
pub use view::{ranked_view, totals, ChartSeries, Standing, Totals, View};
