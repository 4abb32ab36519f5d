//! Core engine types: players, state, configuration, RNG, events, errors.
//!
//! Everything here is independent of which effects exist. Effects and the
//! turn engine read and write the state through these types.

pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use config::{GameConfig, SelectionMode};
pub use error::{ConfigError, EngineError, InvariantError};
pub use event::{EventRecord, GameEvent};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use snapshot::Snapshot;
pub use state::{GameState, Layout};
