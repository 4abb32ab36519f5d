//! # grackle
//!
//! Turn and effect resolution engine for Grackle, a coin game for two or
//! more players. Players draw coins from a shared pile and play them; each
//! coin's effect rearranges the pile, raids an opponent, or protects its
//! owner. Whoever puts Key and Chest in play together wins.
//!
//! ## Design Principles
//!
//! 1. **No I/O**: The engine never prompts or prints. Decisions go through
//!    a `Selector`; everything that happens is recorded in an event log and
//!    in per-player notes for the host to show.
//!
//! 2. **N-Player First**: Every API works for 2-15 players.
//!
//! 3. **Closed Effects**: Coin effects are an enum matched exhaustively, so
//!    a new coin cannot ship without a handler.
//!
//! 4. **Conservation**: Coins are never created or destroyed after setup.
//!    Debug builds check this after every turn.
//!
//! ## Modules
//!
//! - `core`: Players, state, configuration, RNG, events, errors, snapshots
//! - `coins`: Coin identities and the fixed catalog
//! - `zones`: The shared pile and player hands
//! - `effects`: Effect kinds, the selector boundary, and effect resolution
//! - `rules`: The turn state machine
//!
//! ## Example
//!
//! ```
//! use grackle::{FirstSelector, GameConfig, GameState, TurnEngine};
//!
//! let config = GameConfig::new(2).with_names(["Ada", "Brook"]);
//! let mut state = GameState::new(config, 42).unwrap();
//! let mut engine = TurnEngine::new(FirstSelector);
//!
//! let report = engine.play_turn(&mut state).unwrap();
//! assert_eq!(report.turn, 1);
//! assert!(state.check_conservation().is_ok());
//! ```

pub mod coins;
pub mod core;
pub mod effects;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, EngineError, EventRecord, GameConfig, GameEvent, GameRng, GameRngState,
    GameState, InvariantError, Layout, Player, PlayerId, PlayerMap, SelectionMode, Snapshot,
};

pub use crate::coins::{Coin, CoinCatalog, CoinDefinition};

pub use crate::zones::{Hand, Pile, ZonePosition};

pub use crate::effects::{
    Candidate, DecisionKind, EffectKind, EffectResolver, FirstSelector, Pending, RandomSelector,
    ScriptedSelector, Selector, Step,
};

pub use crate::rules::{GameResult, TurnEngine, TurnPhase, TurnReport};
