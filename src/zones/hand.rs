//! A player's hand: held coins, the single-slot larder, and the shield flag.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::coins::Coin;
use crate::core::PlayerId;
use crate::effects::{choose_index, DecisionKind, Selector};

/// Coins held by one player.
///
/// Capacity is enforced on every insertion. Rejected coins are handed
/// back to the caller, who must put them somewhere; a hand never drops
/// a coin on the floor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    /// SmallVec keeps typical two-coin hands off the heap.
    coins: SmallVec<[Coin; 4]>,
    capacity: usize,
    larder: Option<Coin>,
    shield: bool,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            coins: SmallVec::new(),
            capacity,
            larder: None,
            shield: false,
        }
    }

    /// Add a coin if there is room and the coin is not already held.
    ///
    /// ```
    /// use grackle::coins::Coin;
    /// use grackle::zones::Hand;
    ///
    /// let mut hand = Hand::new(1);
    /// assert_eq!(hand.try_add(Coin::Key), Ok(()));
    /// assert_eq!(hand.try_add(Coin::Rope), Err(Coin::Rope));
    /// ```
    pub fn try_add(&mut self, coin: Coin) -> Result<(), Coin> {
        if self.is_full() || self.contains(coin) {
            return Err(coin);
        }
        self.coins.push(coin);
        Ok(())
    }

    /// Remove and return the coin at `index`.
    pub fn take_at(&mut self, index: usize) -> Option<Coin> {
        if index < self.coins.len() {
            Some(self.coins.remove(index))
        } else {
            None
        }
    }

    /// Remove and return one coin.
    ///
    /// With an explicit index that coin is taken. Without one, a single
    /// held coin is taken implicitly and anything more is left to the
    /// selector. An empty hand yields `None`.
    pub fn take_one(
        &mut self,
        index: Option<usize>,
        selector: &mut dyn Selector,
        chooser: PlayerId,
        kind: DecisionKind,
    ) -> Option<Coin> {
        match index {
            Some(i) => self.take_at(i),
            None => {
                let i = choose_index(selector, chooser, kind, self.coins.as_slice())?;
                self.take_at(i)
            }
        }
    }

    /// Remove a specific coin. Returns false if it was not held.
    pub fn remove(&mut self, coin: Coin) -> bool {
        if let Some(pos) = self.coins.iter().position(|&c| c == coin) {
            self.coins.remove(pos);
            true
        } else {
            false
        }
    }

    /// Fill the larder. Fails, returning the coin, if it is occupied.
    pub fn set_larder(&mut self, coin: Coin) -> Result<(), Coin> {
        if self.larder.is_some() {
            return Err(coin);
        }
        self.larder = Some(coin);
        Ok(())
    }

    /// Empty the larder.
    pub fn take_larder(&mut self) -> Option<Coin> {
        self.larder.take()
    }

    /// Raise the shield. Returns false if it was already up.
    pub fn enable_shield(&mut self) -> bool {
        !std::mem::replace(&mut self.shield, true)
    }

    /// Lower the shield. Returns false if it was already down.
    pub fn disable_shield(&mut self) -> bool {
        std::mem::replace(&mut self.shield, false)
    }

    #[must_use]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    #[must_use]
    pub fn larder(&self) -> Option<Coin> {
        self.larder
    }

    #[must_use]
    pub fn is_shielded(&self) -> bool {
        self.shield
    }

    #[must_use]
    pub fn contains(&self, coin: Coin) -> bool {
        self.coins.contains(&coin)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.coins.len() >= self.capacity
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
