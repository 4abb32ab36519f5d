//! Serializable view of a game for rendering and checkpoints.

use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::error::EngineError;
use super::player::{Player, PlayerId};
use super::rng::GameRngState;
use crate::zones::Pile;

/// Everything a host needs to draw the table or resume the game later.
///
/// The event log is not included; a restored game starts a fresh log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: GameConfig,
    /// Players in seat order, including pending notes.
    pub players: Vec<Player>,
    pub pile: Pile,
    pub current: PlayerId,
    pub go_again: bool,
    pub turn_number: u32,
    pub winner: Option<PlayerId>,
    pub rng: GameRngState,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
