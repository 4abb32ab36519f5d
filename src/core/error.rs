//! Error types.
//!
//! Empty piles, empty hands and empty larders are ordinary game states and
//! never show up here. These errors cover bad setup, misuse of a finished
//! game, broken checkpoints, and internal consistency faults.

use thiserror::Error;

use super::config::SelectionMode;
use super::player::PlayerId;
use crate::coins::Coin;

/// A configuration that cannot produce a playable game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("at most 255 players are supported, got {0}")]
    TooManyPlayers(usize),

    #[error("{players} players cannot each be dealt a coin from {coins} coins")]
    NotEnoughCoins { players: usize, coins: usize },

    #[error("hand capacity must be at least 2, got {0}")]
    HandCapacityTooSmall(usize),

    #[error("hand capacity {capacity} exceeds the {coins} coins in the game")]
    HandCapacityTooLarge { capacity: usize, coins: usize },

    #[error("{names} names given for {players} players")]
    NameCountMismatch { names: usize, players: usize },

    #[error("selection mode {0:?} is not supported")]
    UnsupportedSelectionMode(SelectionMode),

    #[error("chain depth cap must be at least 1")]
    ZeroChainDepth,
}

/// The coin conservation check failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("coin {0} is missing from every zone")]
    Missing(Coin),

    #[error("coin {coin} appears in {count} places")]
    Duplicated { coin: Coin, count: usize },
}

/// Errors raised while setting up or driving a game.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the game is over; {winner} already won")]
    GameOver { winner: PlayerId },

    #[error("{player} cannot hold {coin}: hand full or coin already held")]
    HandOverflow { player: PlayerId, coin: Coin },

    #[error("{0} is not a seat in this game")]
    UnknownSeat(PlayerId),

    #[error("{players} players recorded for a {expected}-player game")]
    SeatCountMismatch { players: usize, expected: usize },

    #[error("{player} has a hand of capacity {capacity}, expected {expected}")]
    HandCapacityMismatch {
        player: PlayerId,
        capacity: usize,
        expected: usize,
    },

    #[error("{player} holds {held} coins in a hand of capacity {capacity}")]
    OverfullHand {
        player: PlayerId,
        held: usize,
        capacity: usize,
    },

    #[error("recorded winner {winner:?} does not match a table where key and chest in play is {terminal}")]
    WinnerMismatch {
        winner: Option<PlayerId>,
        terminal: bool,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("coin conservation violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}
