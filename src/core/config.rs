//! Game configuration.
//!
//! Hosts build a `GameConfig` from whatever flags or menus they offer and
//! hand it to `GameState::new`. The core never parses arguments.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::PlayerId;
use crate::coins::CoinCatalog;

/// Who decides which of an opponent's coins a targeted effect hits.
///
/// Only `PlayerChooses` is supported. The other modes are named so a host
/// asking for them gets a clear error instead of silently different rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// The acting player picks, face down.
    #[default]
    PlayerChooses,
    /// The opponent's first coin is always taken.
    RevealFirst,
    /// The opponent picks which coin to give up.
    OpponentChooses,
}

/// Complete setup parameters for one game.
///
/// ```
/// use grackle::core::GameConfig;
///
/// let config = GameConfig::new(3)
///     .with_hand_capacity(2)
///     .with_remove_count(1)
///     .with_names(["Ada", "Brook", "Cy"]);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.reserved_count(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-255, and no more than there are coins to deal).
    pub player_count: usize,

    /// Maximum coins held in hand (at least 2, at most the coin count).
    pub hand_capacity: usize,

    /// Coins to set aside before shuffling, where the reserve allows.
    pub remove_count: usize,

    /// How opponents' coins are picked.
    pub selection_mode: SelectionMode,

    /// Most chained resolutions allowed after a played coin.
    pub max_chain_depth: usize,

    /// Display names in seat order. Empty means default names.
    pub names: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

impl GameConfig {
    /// Default hand capacity.
    pub const DEFAULT_HAND_CAPACITY: usize = 2;

    /// Default chain depth cap.
    pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 32;

    /// Create a configuration with defaults for everything but the player count.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            hand_capacity: Self::DEFAULT_HAND_CAPACITY,
            remove_count: 0,
            selection_mode: SelectionMode::default(),
            max_chain_depth: Self::DEFAULT_MAX_CHAIN_DEPTH,
            names: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hand_capacity(mut self, capacity: usize) -> Self {
        self.hand_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_remove_count(mut self, count: usize) -> Self {
        self.remove_count = count;
        self
    }

    #[must_use]
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    #[must_use]
    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    #[must_use]
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Removable coins that setup must leave in the pile.
    #[must_use]
    pub fn reserved_count(&self) -> usize {
        self.hand_capacity.saturating_mul(self.player_count)
    }

    /// Display name for a seat, falling back to "Player N" (1-based).
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> String {
        self.names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| format!("Player {}", player.index() + 1))
    }

    /// Check the configuration can produce a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coins = CoinCatalog::standard().len();

        if self.player_count < 2 {
            return Err(ConfigError::TooFewPlayers(self.player_count));
        }
        if self.player_count > 255 {
            return Err(ConfigError::TooManyPlayers(self.player_count));
        }
        if self.player_count > coins {
            return Err(ConfigError::NotEnoughCoins {
                players: self.player_count,
                coins,
            });
        }
        if self.hand_capacity < 2 {
            return Err(ConfigError::HandCapacityTooSmall(self.hand_capacity));
        }
        if self.hand_capacity > coins {
            return Err(ConfigError::HandCapacityTooLarge {
                capacity: self.hand_capacity,
                coins,
            });
        }
        if !self.names.is_empty() && self.names.len() != self.player_count {
            return Err(ConfigError::NameCountMismatch {
                names: self.names.len(),
                players: self.player_count,
            });
        }
        if self.selection_mode != SelectionMode::PlayerChooses {
            return Err(ConfigError::UnsupportedSelectionMode(self.selection_mode));
        }
        if self.max_chain_depth == 0 {
            return Err(ConfigError::ZeroChainDepth);
        }
        Ok(())
    }
}
