//! Effect kinds and the values that drive chained resolution.
//!
//! Every coin carries exactly one `EffectKind`. The enumeration is closed:
//! the resolver matches on it exhaustively, so a new coin cannot be added
//! without a handler.

use serde::{Deserialize, Serialize};

use crate::coins::Coin;

/// What a coin does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectKind {
    /// No effect; half of the winning pair.
    Key,
    /// Take another turn; half of the winning pair.
    Chest,
    /// Bury an opponent's coin; they draw a replacement.
    Arrow,
    /// Draw the top coin and resolve it at once.
    Boots,
    /// Draw a coin, then put one of yours on top of the pile.
    CoinPurse,
    /// Draw a coin into your larder.
    HamHock,
    /// Trade a coin with an opponent.
    Knife,
    /// Reorder the top two coins of the pile.
    Lantern,
    /// Resolve an in-play coin's effect again.
    Mirror,
    /// Look at an opponent's coin.
    Raven,
    /// Optionally move the bottom coin to the top.
    Rope,
    /// Raise your shield.
    Shield,
    /// Bury an in-play coin.
    Shovel,
    /// Put an opponent's coin into play without its effect.
    Sickle,
    /// Shuffle everything in play back into the pile.
    Wind,
}

impl EffectKind {
    /// Does this effect act on an opponent chosen by the player?
    ///
    /// Exactly these effects are stopped by the target's shield.
    #[must_use]
    pub const fn is_targeted(self) -> bool {
        matches!(
            self,
            EffectKind::Arrow | EffectKind::Knife | EffectKind::Raven | EffectKind::Sickle
        )
    }

    /// Is the coin put into play before its effect runs?
    ///
    /// Wind puts itself into play last, after sweeping the in-play area.
    #[must_use]
    pub const fn plays_before_resolving(self) -> bool {
        !matches!(self, EffectKind::Wind)
    }
}

/// How a coin arrived at resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// Played from a hand or larder.
    Played,
    /// Drawn from the pile by a chaining effect and played at once.
    Chained,
    /// Already in play; only its effect runs again.
    Mirrored,
}

/// A coin waiting to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pending {
    pub coin: Coin,
    pub origin: Origin,
}

impl Pending {
    #[must_use]
    pub const fn played(coin: Coin) -> Self {
        Self {
            coin,
            origin: Origin::Played,
        }
    }

    #[must_use]
    pub const fn chained(coin: Coin) -> Self {
        Self {
            coin,
            origin: Origin::Chained,
        }
    }

    #[must_use]
    pub const fn mirrored(coin: Coin) -> Self {
        Self {
            coin,
            origin: Origin::Mirrored,
        }
    }

    /// Does resolving this coin move it into play?
    #[must_use]
    pub const fn enters_play(&self) -> bool {
        !matches!(self.origin, Origin::Mirrored)
    }
}

/// Result of resolving one coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing further to resolve.
    Settled,
    /// Resolve this coin next, in the same turn.
    Chain(Pending),
}
