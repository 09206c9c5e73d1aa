//! Session: the ledger wired to its collaborators.
//!
//! Every user action flows the same way:
//!
//! 1. mutate the `Ledger`
//! 2. recompute the derived `View`
//! 3. hand the full snapshot to the `SnapshotStore`
//! 4. redraw through the `ChartRenderer`
//!
//! Steps 2-4 run only after a committed mutation. Rejected actions leave the
//! ledger, the store and the chart untouched. Save failures are logged and do
//! not fail the action.

pub mod confirm;

pub use confirm::{Always, Confirm, Prompt};

use tracing::{error, info, warn};

use crate::chart::ChartRenderer;
use crate::core::{Color, ColorPicker, ColorScheme, Game, GameId, Ledger, LedgerError, Player, PlayerId};
use crate::persistence::{load_tolerant, Snapshot, SnapshotStore};
use crate::presenter::{ScoreTable, View};

/// Question asked before all games are reset.
pub const RESET_PROMPT: &str = "Are you sure you want to reset all game scores?";

/// Session settings that do not live in the snapshot.
#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Scheme used when no snapshot exists yet.
    pub color_scheme: ColorScheme,

    /// First color suggested for a new player.
    pub default_color: Color,

    /// Seed for color suggestions. `None` seeds from OS entropy.
    pub color_seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            default_color: Color::DEFAULT,
            color_seed: None,
        }
    }
}

impl SessionOptions {
    #[must_use]
    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    #[must_use]
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }
}

/// Owns the ledger and notifies the store and renderer after each change.
pub struct Session<S, R> {
    ledger: Ledger,
    view: View,
    color_scheme: ColorScheme,
    suggested_color: Color,
    picker: ColorPicker,
    store: S,
    renderer: R,
}

impl<S: SnapshotStore, R: ChartRenderer> Session<S, R> {
    /// Load the stored snapshot (tolerantly) and draw the initial chart.
    ///
    /// A snapshot that cannot be restored is treated like a missing one.
    /// Opening never writes to the store.
    pub fn open(store: S, mut renderer: R, options: SessionOptions) -> Self {
        let restored = load_tolerant(&store).and_then(|snapshot| {
            let scheme = snapshot.color_scheme;
            match snapshot.into_ledger() {
                Ok(ledger) => Some((ledger, scheme)),
                Err(e) => {
                    warn!(error = %e, "could not restore snapshot, starting with an empty ledger");
                    None
                }
            }
        });
        let (ledger, color_scheme) = restored.unwrap_or_else(|| (Ledger::new(), options.color_scheme));

        let mut picker = match options.color_seed {
            Some(seed) => ColorPicker::new(seed),
            None => ColorPicker::from_entropy(),
        };

        let used = ledger.used_colors();
        let suggested_color = if used.contains(&options.default_color) {
            picker.pick(&used)
        } else {
            options.default_color
        };

        let view = View::derive(&ledger);
        renderer.render(&view.chart);

        info!(
            players = ledger.players().len(),
            games = ledger.games().len(),
            %color_scheme,
            "session opened"
        );

        Self {
            ledger,
            view,
            color_scheme,
            suggested_color,
            picker,
            store,
            renderer,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Derived view as of the last committed change.
    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Score grid for display.
    #[must_use]
    pub fn score_table(&self) -> ScoreTable {
        ScoreTable::build(&self.ledger, &self.view.totals)
    }

    #[must_use]
    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// Color a new player gets when none is given.
    #[must_use]
    pub fn suggested_color(&self) -> Color {
        self.suggested_color
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Current snapshot of the session state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.ledger, self.color_scheme)
    }

    /// Tear the session down into its collaborators.
    pub fn into_parts(self) -> (Ledger, S, R) {
        (self.ledger, self.store, self.renderer)
    }

    // === Actions ===

    /// Register a player, using the suggested color when `color` is `None`.
    ///
    /// After a successful add the suggestion is re-randomized.
    pub fn add_player(&mut self, name: &str, color: Option<Color>) -> Result<Player, LedgerError> {
        let color = color.unwrap_or(self.suggested_color);
        let player = self.ledger.add_player(name, color)?;

        self.suggested_color = self.picker.pick(&self.ledger.used_colors());
        self.commit("add player");
        Ok(player)
    }

    /// Remove a player. Unknown ids change nothing and do not commit.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let removed = self.ledger.remove_player(id);
        if removed {
            self.commit("remove player");
        }
        removed
    }

    pub fn add_game(&mut self) -> Result<Game, LedgerError> {
        let game = self.ledger.add_game()?;
        self.commit("add game");
        Ok(game)
    }

    /// Reset all games after asking `confirm`.
    ///
    /// Returns `false`, with nothing changed, when the user declines.
    pub fn reset_game(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            info!("reset cancelled");
            return false;
        }

        self.ledger.reset_games();
        self.commit("reset games");
        true
    }

    /// Set a score from raw input. Unknown games or players change nothing.
    pub fn update_score(&mut self, game: GameId, player: PlayerId, raw: &str) -> bool {
        let updated = self.ledger.update_score(game, player, raw);
        if updated {
            self.commit("update score");
        }
        updated
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_scheme = scheme;
        self.commit("set color scheme");
    }

    /// Flip between light and dark. Returns the new scheme.
    pub fn toggle_color_scheme(&mut self) -> ColorScheme {
        self.set_color_scheme(self.color_scheme.toggled());
        self.color_scheme
    }

    fn commit(&mut self, action: &'static str) {
        self.view = View::derive(&self.ledger);

        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&snapshot) {
            error!(action, error = %e, "failed to save snapshot");
        }

        self.renderer.render(&self.view.chart);
        info!(
            action,
            players = self.ledger.players().len(),
            games = self.ledger.games().len(),
            "change committed"
        );
    }
}
