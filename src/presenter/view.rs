//! Totals, ranked standings, and chart series.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::core::{Color, Ledger, Player, PlayerId};

/// Per-player totals across all games.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Totals {
    by_player: FxHashMap<PlayerId, f64>,
}

impl Totals {
    /// Total for a player; unknown players read as 0.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> f64 {
        self.by_player.get(&player).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_player.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, f64)> + '_ {
        self.by_player.iter().map(|(id, total)| (*id, *total))
    }
}

/// Sum each player's scores across all games.
///
/// Missing score entries count as 0. A sum past the `f64` range saturates at
/// `f64::MAX` or `f64::MIN`, so totals are always finite.
#[must_use]
pub fn totals(ledger: &Ledger) -> Totals {
    let by_player = ledger
        .players()
        .iter()
        .map(|player| {
            let total: f64 = ledger.games().iter().map(|g| g.score(player.id)).sum();
            (player.id, total.clamp(f64::MIN, f64::MAX))
        })
        .collect();

    Totals { by_player }
}

/// A player and their total.
#[derive(Clone, Debug, PartialEq)]
pub struct Standing {
    pub player: Player,
    pub total: f64,
}

/// Players ordered by descending total.
///
/// Ties keep registration order.
#[must_use]
pub fn ranked_view(ledger: &Ledger) -> Vec<Standing> {
    let totals = totals(ledger);
    rank(ledger, &totals)
}

fn rank(ledger: &Ledger, totals: &Totals) -> Vec<Standing> {
    let mut standings: Vec<Standing> = ledger
        .players()
        .iter()
        .map(|player| Standing {
            player: player.clone(),
            total: totals.get(player.id),
        })
        .collect();

    // sort_by is stable, so equal totals stay in registration order.
    standings.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    standings
}

/// Parallel label/value/color sequences handed to a chart renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color>,
}

impl ChartSeries {
    /// Build the series in standing order.
    #[must_use]
    pub fn from_standings(standings: &[Standing]) -> Self {
        Self {
            labels: standings.iter().map(|s| s.player.name.clone()).collect(),
            values: standings.iter().map(|s| s.total).collect(),
            colors: standings.iter().map(|s| s.player.color).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Everything derived from a ledger, recomputed after each committed change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct View {
    pub totals: Totals,
    pub standings: Vec<Standing>,
    /// Empty when there are no players or no games; nothing is charted then.
    pub chart: ChartSeries,
}

impl View {
    /// Derive a fresh view from the current ledger state.
    #[must_use]
    pub fn derive(ledger: &Ledger) -> Self {
        let totals = totals(ledger);
        let standings = rank(ledger, &totals);
        let chart = if ledger.games().is_empty() {
            ChartSeries::default()
        } else {
            ChartSeries::from_standings(&standings)
        };

        Self {
            totals,
            standings,
            chart,
        }
    }

    /// Current leader, if any player has been registered.
    #[must_use]
    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }
}
