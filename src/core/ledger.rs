//! The score ledger: players, games, and id allocation.
//!
//! ## Invariants
//!
//! - Player ids and game ids are unique and allocated monotonically.
//! - Every game's score map is keyed by exactly the set of live player ids.
//! - Every stored score is finite.
//!
//! Every operation either commits fully or returns an error with the ledger
//! untouched. Validation failures are ordinary `Err` values meant to be shown
//! to the user.

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, warn};

use super::color::Color;
use super::game::{Game, GameId};
use super::player::{name_key, Player, PlayerId};
use super::score::coerce_score;

/// User-facing validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("please enter a player name")]
    EmptyName,

    #[error("player name already exists: {0}")]
    DuplicateName(String),

    #[error("please add players first")]
    NoPlayers,

    #[error("no player ids left")]
    PlayerIdsExhausted,

    #[error("no game ids left")]
    GameIdsExhausted,
}

/// Owned store of players and games. The single source of truth.
///
/// ## Example
///
/// ```
/// use scorekeeper::core::{Color, Ledger};
///
/// let mut ledger = Ledger::new();
/// let alice = ledger.add_player("Alice", Color::DEFAULT).unwrap();
/// let game = ledger.add_game().unwrap();
///
/// ledger.update_score(game.id, alice.id, "10");
/// assert_eq!(ledger.game(game.id).unwrap().score(alice.id), 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Ledger {
    players: Vec<Player>,
    games: Vec<Game>,
    next_player_id: u32,
    next_game_id: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger. The first player and first game both get id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            games: Vec::new(),
            next_player_id: 1,
            next_game_id: 1,
        }
    }

    /// Rebuild a ledger from previously stored rows.
    ///
    /// Next-id counters become `max(id) + 1` (1 when empty). Rows are repaired
    /// so the ledger invariants hold: duplicate ids keep their first
    /// occurrence, score entries for unknown players are dropped, missing
    /// entries are filled with 0, and non-finite scores become 0.
    ///
    /// Fails when a stored id is `u32::MAX`, since the next counter would not
    /// fit.
    pub fn from_parts(players: Vec<Player>, games: Vec<Game>) -> Result<Self, LedgerError> {
        let mut seen_players = FxHashSet::default();
        let players: Vec<Player> = players
            .into_iter()
            .filter(|p| {
                let fresh = seen_players.insert(p.id);
                if !fresh {
                    warn!(player_id = p.id.raw(), "dropping duplicate player id from snapshot");
                }
                fresh
            })
            .collect();

        let mut seen_games = FxHashSet::default();
        let games: Vec<Game> = games
            .into_iter()
            .filter(|g| {
                let fresh = seen_games.insert(g.id);
                if !fresh {
                    warn!(game_id = g.id.raw(), "dropping duplicate game id from snapshot");
                }
                fresh
            })
            .map(|mut game| {
                game.scores.retain(|id, _| seen_players.contains(id));
                for player in &players {
                    let score = game.scores.entry(player.id).or_insert(0.0);
                    if !score.is_finite() {
                        *score = 0.0;
                    }
                }
                game
            })
            .collect();

        let next_player_id = match players.iter().map(|p| p.id.raw()).max() {
            Some(max) => max.checked_add(1).ok_or(LedgerError::PlayerIdsExhausted)?,
            None => 1,
        };
        let next_game_id = match games.iter().map(|g| g.id.raw()).max() {
            Some(max) => max.checked_add(1).ok_or(LedgerError::GameIdsExhausted)?,
            None => 1,
        };

        Ok(Self {
            players,
            games,
            next_player_id,
            next_game_id,
        })
    }

    // === Accessors ===

    /// Players in registration order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Games in creation order.
    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Id the next registered player will receive.
    #[must_use]
    pub fn next_player_id(&self) -> PlayerId {
        PlayerId::new(self.next_player_id)
    }

    /// Id the next added game will receive.
    #[must_use]
    pub fn next_game_id(&self) -> GameId {
        GameId::new(self.next_game_id)
    }

    /// True when there are neither players nor games.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.games.is_empty()
    }

    /// Colors currently assigned to players.
    #[must_use]
    pub fn used_colors(&self) -> Vec<Color> {
        self.players.iter().map(|p| p.color).collect()
    }

    fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    // === Mutations ===

    /// Register a player.
    ///
    /// The name is trimmed. Fails with `EmptyName` when nothing is left and
    /// with `DuplicateName` when it matches an existing name ignoring case.
    /// Every existing game gets a zero score for the new player. Fails with
    /// `PlayerIdsExhausted` once the id counter cannot advance.
    pub fn add_player(&mut self, name: &str, color: Color) -> Result<Player, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let key = name_key(name);
        if let Some(existing) = self.players.iter().find(|p| name_key(&p.name) == key) {
            return Err(LedgerError::DuplicateName(existing.name.clone()));
        }

        let next = self
            .next_player_id
            .checked_add(1)
            .ok_or(LedgerError::PlayerIdsExhausted)?;
        let player = Player::new(PlayerId::new(self.next_player_id), name, color);
        self.next_player_id = next;

        for game in &mut self.games {
            game.scores.insert(player.id, 0.0);
        }
        self.players.push(player.clone());

        debug!(player_id = player.id.raw(), name = %player.name, color = %player.color, "player added");
        Ok(player)
    }

    /// Remove a player and its score from every game.
    ///
    /// Unknown ids are a no-op. Returns whether a player was removed.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let Some(index) = self.players.iter().position(|p| p.id == id) else {
            debug!(player_id = id.raw(), "remove ignored, no such player");
            return false;
        };

        let removed = self.players.remove(index);
        for game in &mut self.games {
            game.scores.remove(&id);
        }

        debug!(player_id = id.raw(), name = %removed.name, "player removed");
        true
    }

    /// Append a game with a zero score for every player.
    ///
    /// Fails with `NoPlayers` when no players are registered.
    pub fn add_game(&mut self) -> Result<Game, LedgerError> {
        if self.players.is_empty() {
            return Err(LedgerError::NoPlayers);
        }

        let next = self.next_game_id.checked_add(1).ok_or(LedgerError::GameIdsExhausted)?;
        let game = Game::zeroed(GameId::new(self.next_game_id), self.player_ids());
        self.next_game_id = next;
        self.games.push(game.clone());

        debug!(game_id = game.id.raw(), players = self.players.len(), "game added");
        Ok(game)
    }

    /// Replace all games with a single zeroed game with id 1.
    ///
    /// The next added game gets id 2. Players are untouched. Asking the user
    /// for confirmation is the caller's job.
    pub fn reset_games(&mut self) -> &Game {
        let game = Game::zeroed(GameId::new(1), self.player_ids());
        self.games = vec![game];
        self.next_game_id = 2;

        debug!(players = self.players.len(), "games reset");
        &self.games[0]
    }

    /// Set a score from raw text input.
    ///
    /// The input is coerced with [`coerce_score`]. Unknown game ids and
    /// players that are not registered are ignored. Returns whether a score
    /// was written.
    pub fn update_score(&mut self, game_id: GameId, player_id: PlayerId, raw: &str) -> bool {
        if self.player(player_id).is_none() {
            debug!(player_id = player_id.raw(), "score ignored, no such player");
            return false;
        }

        let Some(game) = self.games.iter_mut().find(|g| g.id == game_id) else {
            debug!(game_id = game_id.raw(), "score ignored, no such game");
            return false;
        };

        let score = coerce_score(raw);
        game.scores.insert(player_id, score);

        debug!(game_id = game_id.raw(), player_id = player_id.raw(), raw, score, "score updated");
        true
    }
}
