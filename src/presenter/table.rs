//! Score table: one row per game plus a totals row.

use std::fmt;

use crate::core::{GameId, Ledger};

use super::view::Totals;

/// A labelled row of scores in player order.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub label: String,
    /// `None` for the totals row.
    pub game: Option<GameId>,
    pub cells: Vec<f64>,
}

/// Score table as shown to the user.
///
/// Game rows are labelled by position (`Game 1`, `Game 2`, ...), not by id.
/// Rows shorter than `headers` display blank cells.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    /// Present when at least one game exists.
    pub total: Option<TableRow>,
}

impl ScoreTable {
    #[must_use]
    pub fn build(ledger: &Ledger, totals: &Totals) -> Self {
        let players = ledger.players();

        let rows = ledger
            .games()
            .iter()
            .enumerate()
            .map(|(index, game)| TableRow {
                label: format!("Game {}", index + 1),
                game: Some(game.id),
                cells: players.iter().map(|p| game.score(p.id)).collect(),
            })
            .collect::<Vec<_>>();

        let total = (!rows.is_empty()).then(|| TableRow {
            label: "Total".to_string(),
            game: None,
            cells: players.iter().map(|p| totals.get(p.id)).collect(),
        });

        Self {
            headers: players.iter().map(|p| p.name.clone()).collect(),
            rows,
            total,
        }
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .rows
            .iter()
            .chain(self.total.iter())
            .map(|r| r.label.chars().count())
            .chain(std::iter::once("Game".len()))
            .max()
            .unwrap_or(4);

        let body: Vec<&TableRow> = self.rows.iter().chain(self.total.iter()).collect();
        let col_widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                body.iter()
                    .map(|row| row.cells.get(col).map_or(0, |c| c.to_string().chars().count()))
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:<label_width$}", "Game")?;
        for (header, width) in self.headers.iter().zip(&col_widths) {
            write!(f, " | {header:>width$}")?;
        }
        writeln!(f)?;

        for row in &body {
            write!(f, "{:<label_width$}", row.label)?;
            for (col, width) in col_widths.iter().enumerate() {
                let cell = row.cells.get(col).map(f64::to_string).unwrap_or_default();
                write!(f, " | {cell:>width$}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
