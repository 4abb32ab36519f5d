//! Coin system: identities, definitions, and the fixed catalog.
//!
//! ## Key Types
//!
//! - `Coin`: The token identity. Every coin exists exactly once per game.
//! - `CoinDefinition`: Static coin data (effect kind, name, description)
//! - `CoinCatalog`: The fixed, ordered registry of all coins
//!
//! ## Terminal Pair
//!
//! `Key` and `Chest` are mandatory in every game and are never removed
//! before shuffling. Both being in play at once ends the game.

pub mod catalog;
pub mod definition;

pub use catalog::CoinCatalog;
pub use definition::{Coin, CoinDefinition};
