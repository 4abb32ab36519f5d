//! Structured event log.
//!
//! Every state change the engine makes is recorded as a `GameEvent`. The
//! log is append-only and kept in an `im::Vector` so cloning a state for
//! replay or inspection stays cheap. Hosts render from it; tests assert
//! against it.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::coins::Coin;

/// One thing that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A starting coin was dealt at setup.
    Dealt { player: PlayerId, coin: Coin },
    /// A coin was drawn into a hand.
    Drew { player: PlayerId, coin: Coin },
    /// A drawn coin did not fit and went back on top of the pile.
    DrawRejected { player: PlayerId, coin: Coin },
    /// A draw was attempted from an empty pile.
    PileEmpty { player: PlayerId },
    /// A coin was played into the in-play area.
    Played { player: PlayerId, coin: Coin },
    /// The larder coin was forced as this turn's play.
    ForcedFromLarder { player: PlayerId, coin: Coin },
    /// The player had nothing to play.
    NoCoins { player: PlayerId },
    /// An in-play coin's effect was resolved again.
    Mirrored { player: PlayerId, coin: Coin },
    /// A coin was drawn and resolved as part of a chain.
    Chained { player: PlayerId, coin: Coin },
    /// A chain hit the depth cap and stopped.
    ChainCapped { player: PlayerId, depth: usize },
    /// A targeted effect bounced off a shield.
    Blocked { player: PlayerId, target: PlayerId, coin: Coin },
    /// A coin was moved to the bottom of the pile.
    Buried { coin: Coin },
    /// A coin was placed on top of the pile.
    ReturnedToTop { coin: Coin },
    /// A player saw one of another player's coins.
    Revealed { player: PlayerId, target: PlayerId },
    /// Two players traded coins. Either side may have had nothing to give.
    Swapped { player: PlayerId, target: PlayerId },
    /// A coin was taken from a hand and put into play without its effect.
    Sickled { player: PlayerId, target: PlayerId, coin: Coin },
    /// A coin went into a larder.
    LarderFilled { player: PlayerId, coin: Coin },
    /// The larder was occupied; the coin went back to the pile.
    LarderRejected { player: PlayerId, coin: Coin },
    /// A shield went up.
    ShieldRaised { player: PlayerId },
    /// A shield that was already up was raised again.
    ShieldAlreadyRaised { player: PlayerId },
    /// Every shield was dropped.
    ShieldsDropped,
    /// In-play coins were swept back into the pile.
    Reintegrated { count: usize },
    /// The player takes another turn.
    GoAgain { player: PlayerId },
    /// The game is over.
    Won { player: PlayerId },
}

/// A logged event with its position in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number (starts at 1).
    pub turn: u32,
    /// Position within the turn.
    pub sequence: u32,
    pub event: GameEvent,
}
