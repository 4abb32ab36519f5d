//! Zones a coin can occupy.
//!
//! Zones are fixed by the game rather than configured:
//! - `Pile`: the shared draw stack, the in-play area, and coins set aside
//!   before shuffling
//! - `Hand`: one player's held coins, larder and shield
//!
//! Every coin is in exactly one zone at any time.

pub mod hand;
pub mod pile;

pub use hand::Hand;
pub use pile::{Pile, ZonePosition};
