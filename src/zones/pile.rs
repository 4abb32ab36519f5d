//! The shared pile: draw stack, in-play area, and coins set aside at setup.
//!
//! The draw stack is ordered with index 0 as the top and the last index as
//! the bottom. The in-play area is a bag; its insertion order only matters
//! for display and for the order candidates are offered to a selector.

use serde::{Deserialize, Serialize};

use crate::coins::{Coin, CoinCatalog};
use crate::core::rng::GameRng;

/// Position for returning a coin to the draw stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Index 0, the next coin drawn.
    Top,
    /// The last index.
    Bottom,
}

/// Shared pile owned by the game state.
///
/// ## Usage
///
/// ```
/// use grackle::coins::Coin;
/// use grackle::zones::Pile;
///
/// let mut pile = Pile::from_parts(vec![Coin::Arrow, Coin::Key], vec![], vec![]);
///
/// assert_eq!(pile.draw_top(), Some(Coin::Arrow));
/// pile.bury_at_bottom(Coin::Arrow);
/// assert_eq!(pile.peek_bottom(), Some(Coin::Arrow));
/// assert_eq!(pile.draw_stack(), &[Coin::Key, Coin::Arrow]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    draw_stack: Vec<Coin>,
    in_play: Vec<Coin>,
    removed: Vec<Coin>,
}

impl Pile {
    /// Build a shuffled pile from the catalog.
    ///
    /// Up to `remove_count` removable coins are set aside at random, but
    /// removal stops once `reserved_count` or fewer removable coins remain.
    /// Key and Chest are then added and the draw stack is shuffled.
    pub fn build(
        catalog: &CoinCatalog,
        remove_count: usize,
        reserved_count: usize,
        rng: &mut GameRng,
    ) -> Self {
        let mut draw_stack: Vec<Coin> = catalog.removable().collect();
        let mut removed = Vec::new();

        for _ in 0..remove_count {
            if draw_stack.len() <= reserved_count {
                break;
            }
            let idx = rng.gen_range_usize(0..draw_stack.len());
            removed.push(draw_stack.remove(idx));
        }

        draw_stack.extend(catalog.all_ids().iter().copied().filter(|c| c.is_terminal()));
        rng.shuffle(&mut draw_stack);

        Self {
            draw_stack,
            in_play: Vec::new(),
            removed,
        }
    }

    /// Assemble a pile from explicit zone contents (top of stack first).
    #[must_use]
    pub fn from_parts(draw_stack: Vec<Coin>, in_play: Vec<Coin>, removed: Vec<Coin>) -> Self {
        Self {
            draw_stack,
            in_play,
            removed,
        }
    }

    /// Remove and return the top coin. `None` when the stack is exhausted.
    pub fn draw_top(&mut self) -> Option<Coin> {
        if self.draw_stack.is_empty() {
            None
        } else {
            Some(self.draw_stack.remove(0))
        }
    }

    /// Put a coin into play.
    pub fn play(&mut self, coin: Coin) {
        self.in_play.push(coin);
    }

    /// Remove a coin from the draw stack if present.
    pub fn remove_from_draw(&mut self, coin: Coin) -> bool {
        remove_first(&mut self.draw_stack, coin)
    }

    /// Remove a coin from play if present.
    pub fn remove_from_play(&mut self, coin: Coin) -> bool {
        remove_first(&mut self.in_play, coin)
    }

    /// Put a coin at either end of the draw stack.
    pub fn insert(&mut self, coin: Coin, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.draw_stack.insert(0, coin),
            ZonePosition::Bottom => self.draw_stack.push(coin),
        }
    }

    /// Put a coin on top of the draw stack.
    pub fn return_to_top(&mut self, coin: Coin) {
        self.insert(coin, ZonePosition::Top);
    }

    /// Put a coin under the draw stack.
    pub fn bury_at_bottom(&mut self, coin: Coin) {
        self.insert(coin, ZonePosition::Bottom);
    }

    /// Move every in-play coin onto the bottom of the draw stack.
    ///
    /// Returns how many coins moved.
    pub fn reintegrate(&mut self) -> usize {
        let moved = self.in_play.len();
        self.draw_stack.append(&mut self.in_play);
        moved
    }

    /// Shuffle the draw stack.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw_stack);
    }

    /// Look at the bottom coin without moving it.
    #[must_use]
    pub fn peek_bottom(&self) -> Option<Coin> {
        self.draw_stack.last().copied()
    }

    /// Are both Key and Chest in play?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.is_in_play(Coin::Key) && self.is_in_play(Coin::Chest)
    }

    /// Is the coin currently in play?
    #[must_use]
    pub fn is_in_play(&self, coin: Coin) -> bool {
        self.in_play.contains(&coin)
    }

    /// Draw stack, top first.
    #[must_use]
    pub fn draw_stack(&self) -> &[Coin] {
        &self.draw_stack
    }

    /// In-play coins in insertion order.
    #[must_use]
    pub fn in_play(&self) -> &[Coin] {
        &self.in_play
    }

    /// Coins set aside before shuffling.
    #[must_use]
    pub fn removed(&self) -> &[Coin] {
        &self.removed
    }
}

fn remove_first(zone: &mut Vec<Coin>, coin: Coin) -> bool {
    if let Some(pos) = zone.iter().position(|&c| c == coin) {
        zone.remove(pos);
        true
    } else {
        false
    }
}
