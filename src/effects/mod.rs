//! Effect system for coin abilities.
//!
//! - `EffectKind`: the closed set of things a coin can do
//! - `Selector`: the decision boundary effects call for every choice
//! - `EffectResolver`: applies one coin's effect to the game state
//!
//! ## Chaining
//!
//! Resolution never recurses. An effect that triggers another coin
//! (boots, mirror) returns `Step::Chain`; the turn engine's loop resolves
//! the next coin and enforces the depth cap.

mod effect;
mod resolver;
mod targeting;

pub use effect::{EffectKind, Origin, Pending, Step};
pub use resolver::EffectResolver;
pub use targeting::{
    choose_hidden, choose_index, choose_one, choose_player, Candidate, DecisionKind, FirstSelector,
    RandomSelector, ScriptedSelector, Selector,
};
