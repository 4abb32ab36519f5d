//! The coin catalog.
//!
//! The catalog is fixed: fifteen coins, the terminal pair first. It is
//! read-only and cheap to copy, so callers hold it by value.

use super::definition::{Coin, CoinDefinition};
use crate::effects::EffectKind;

static DEFINITIONS: [CoinDefinition; 15] = [
    CoinDefinition::new(
        Coin::Key,
        EffectKind::Key,
        "key: Nothing; hopefully the chest is already in play.",
    ),
    CoinDefinition::new(
        Coin::Chest,
        EffectKind::Chest,
        "chest: Take another turn; hopefully the key is already in play.",
    ),
    CoinDefinition::new(
        Coin::Arrow,
        EffectKind::Arrow,
        "arrow: Bury an opponent's coin under the pile; they draw a new one.",
    ),
    CoinDefinition::new(
        Coin::Boots,
        EffectKind::Boots,
        "boots: Play the top coin of the pile immediately.",
    ),
    CoinDefinition::new(
        Coin::CoinPurse,
        EffectKind::CoinPurse,
        "coin purse: Draw a coin, then put one of yours on top of the pile.",
    ),
    CoinDefinition::new(
        Coin::HamHock,
        EffectKind::HamHock,
        "ham hock: Draw a coin into your larder; you must play it next turn.",
    ),
    CoinDefinition::new(
        Coin::Knife,
        EffectKind::Knife,
        "knife: Trade a coin with an opponent.",
    ),
    CoinDefinition::new(
        Coin::Lantern,
        EffectKind::Lantern,
        "lantern: Look at the top two coins of the pile and reorder them.",
    ),
    CoinDefinition::new(
        Coin::Mirror,
        EffectKind::Mirror,
        "mirror: Use the effect of any coin in play again.",
    ),
    CoinDefinition::new(
        Coin::Raven,
        EffectKind::Raven,
        "raven: Look at an opponent's coin.",
    ),
    CoinDefinition::new(
        Coin::Rope,
        EffectKind::Rope,
        "rope: Look at the bottom coin of the pile and optionally move it to the top.",
    ),
    CoinDefinition::new(
        Coin::Shield,
        EffectKind::Shield,
        "shield: Protect yourself from opponents' coins while the shield stays in play.",
    ),
    CoinDefinition::new(
        Coin::Shovel,
        EffectKind::Shovel,
        "shovel: Bury a coin in play under the pile, removing its effect.",
    ),
    CoinDefinition::new(
        Coin::Sickle,
        EffectKind::Sickle,
        "sickle: Put an opponent's coin into play without its effect; they draw a new one.",
    ),
    CoinDefinition::new(
        Coin::Wind,
        EffectKind::Wind,
        "wind: Shuffle every coin in play back into the pile.",
    ),
];

/// Registry of coin definitions.
///
/// ```
/// use grackle::coins::{Coin, CoinCatalog};
///
/// let catalog = CoinCatalog::standard();
/// assert_eq!(catalog.all_ids()[..2], [Coin::Key, Coin::Chest]);
/// assert!(catalog.is_terminal_pair(Coin::Chest, Coin::Key));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CoinCatalog {
    definitions: &'static [CoinDefinition],
}

impl Default for CoinCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl CoinCatalog {
    /// The standard fifteen-coin catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            definitions: &DEFINITIONS,
        }
    }

    /// Get a coin's definition.
    #[must_use]
    pub fn get(&self, coin: Coin) -> &'static CoinDefinition {
        &self.definitions[coin.index()]
    }

    /// Get a coin's display text.
    #[must_use]
    pub fn describe(&self, coin: Coin) -> &'static str {
        self.get(coin).description
    }

    /// Get the effect a coin carries.
    #[must_use]
    pub fn effect(&self, coin: Coin) -> EffectKind {
        self.get(coin).effect
    }

    /// All coins in catalog order. Key and Chest are always the first two.
    #[must_use]
    pub fn all_ids(&self) -> &'static [Coin] {
        &Coin::ALL
    }

    /// Coins that may be removed before shuffling.
    pub fn removable(&self) -> impl Iterator<Item = Coin> + '_ {
        self.all_ids().iter().copied().filter(|c| !c.is_terminal())
    }

    /// Are `a` and `b` the Key and Chest, in either order?
    #[must_use]
    pub fn is_terminal_pair(&self, a: Coin, b: Coin) -> bool {
        matches!(
            (a, b),
            (Coin::Key, Coin::Chest) | (Coin::Chest, Coin::Key)
        )
    }

    /// Number of coins in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over all definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static CoinDefinition> {
        self.definitions.iter()
    }
}
