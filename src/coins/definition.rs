//! Coin identities and their static definitions.
//!
//! `Coin` is the physical token moved between zones. `CoinDefinition`
//! binds a coin to its effect and display text. Instance state (where a
//! coin sits, whether it shields someone) lives in the zones, never here.

use serde::{Deserialize, Serialize};

use crate::effects::EffectKind;

/// A coin token.
///
/// Each variant names exactly one physical coin; games never hold two of
/// the same coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Coin {
    Key,
    Chest,
    Arrow,
    Boots,
    CoinPurse,
    HamHock,
    Knife,
    Lantern,
    Mirror,
    Raven,
    Rope,
    Shield,
    Shovel,
    Sickle,
    Wind,
}

impl Coin {
    /// Every coin, terminal pair first, in catalog order.
    pub const ALL: [Coin; 15] = [
        Coin::Key,
        Coin::Chest,
        Coin::Arrow,
        Coin::Boots,
        Coin::CoinPurse,
        Coin::HamHock,
        Coin::Knife,
        Coin::Lantern,
        Coin::Mirror,
        Coin::Raven,
        Coin::Rope,
        Coin::Shield,
        Coin::Shovel,
        Coin::Sickle,
        Coin::Wind,
    ];

    /// Position in catalog order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Coin::Key => "key",
            Coin::Chest => "chest",
            Coin::Arrow => "arrow",
            Coin::Boots => "boots",
            Coin::CoinPurse => "coin purse",
            Coin::HamHock => "ham hock",
            Coin::Knife => "knife",
            Coin::Lantern => "lantern",
            Coin::Mirror => "mirror",
            Coin::Raven => "raven",
            Coin::Rope => "rope",
            Coin::Shield => "shield",
            Coin::Shovel => "shovel",
            Coin::Sickle => "sickle",
            Coin::Wind => "wind",
        }
    }

    /// Is this one of the two coins that can never be removed?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Coin::Key | Coin::Chest)
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static coin definition.
///
/// ```
/// use grackle::coins::{Coin, CoinCatalog};
/// use grackle::effects::EffectKind;
///
/// let def = CoinCatalog::standard().get(Coin::Rope);
/// assert_eq!(def.effect, EffectKind::Rope);
/// assert!(def.description.contains("bottom"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CoinDefinition {
    /// The coin this definition describes.
    pub coin: Coin,

    /// What playing the coin does.
    pub effect: EffectKind,

    /// Display text shown to players.
    pub description: &'static str,
}

impl CoinDefinition {
    /// Create a new coin definition.
    #[must_use]
    pub const fn new(coin: Coin, effect: EffectKind, description: &'static str) -> Self {
        Self {
            coin,
            effect,
            description,
        }
    }

    /// Display name of the coin.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.coin.name()
    }
}
