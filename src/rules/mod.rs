//! Turn sequencing and win detection.
//!
//! `TurnEngine` owns the selector and walks each turn through its phases.
//! It never prompts or prints; decisions go through the `Selector` and
//! everything that happens lands in the state's event log.

pub mod engine;

pub use engine::{GameResult, TurnEngine, TurnPhase, TurnReport};
