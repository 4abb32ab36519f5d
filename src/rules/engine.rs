//! The turn state machine.
//!
//! One call to `TurnEngine::play_turn` walks a single turn through its
//! phases:
//!
//! ```text
//! TurnStart -> Drawing -> Selecting -> Resolving -> WinCheck -> TurnEnd
//!                             |          ^    |
//!                             |          +----+  (chains)
//!                             +-> WinCheck       (nothing to play)
//! ```
//!
//! Chains are an explicit loop over `Step::Chain` values rather than
//! recursion, and are capped at `GameConfig::max_chain_depth`.

use serde::{Deserialize, Serialize};

use crate::coins::Coin;
use crate::core::{EngineError, GameEvent, GameState, PlayerId};
use crate::effects::{DecisionKind, EffectResolver, Origin, Pending, Selector, Step};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The player whose turn put Key and Chest in play together.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }

    #[must_use]
    pub fn winner(&self) -> PlayerId {
        match self {
            GameResult::Winner(p) => *p,
        }
    }
}

/// Where a turn currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    TurnStart,
    Drawing,
    Selecting,
    /// Resolving a coin; `depth` counts chained resolutions so far.
    Resolving { pending: Pending, depth: usize },
    WinCheck,
    TurnEnd,
}

/// Summary of one turn, for hosts that do not want to walk the event log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    pub player: PlayerId,
    /// Coin drawn into hand at the start of the turn, if one was kept.
    pub drawn: Option<Coin>,
    /// Coin played from hand or larder. `None` if there was nothing to play.
    pub played: Option<Coin>,
    /// Coins resolved through chains, in order.
    pub chain: Vec<Coin>,
    pub chain_capped: bool,
    pub go_again: bool,
    pub result: Option<GameResult>,
}

impl TurnReport {
    fn new(turn: u32, player: PlayerId) -> Self {
        Self {
            turn,
            player,
            drawn: None,
            played: None,
            chain: Vec::new(),
            chain_capped: false,
            go_again: false,
            result: None,
        }
    }
}

/// Drives turns against a `GameState`, asking `S` for every decision.
///
/// ```
/// use grackle::core::{GameConfig, GameState};
/// use grackle::effects::RandomSelector;
/// use grackle::rules::TurnEngine;
///
/// let mut state = GameState::new(GameConfig::new(3), 7).unwrap();
/// let mut engine = TurnEngine::new(RandomSelector::new(7));
///
/// let result = engine.run(&mut state, 1_000).unwrap();
/// if let Some(result) = result {
///     assert_eq!(state.winner(), Some(result.winner()));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct TurnEngine<S: Selector> {
    selector: S,
}

impl<S: Selector> TurnEngine<S> {
    #[must_use]
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    #[must_use]
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Play the current player's turn to completion.
    ///
    /// Fails with `GameOver` once someone has won. In debug builds the
    /// coin conservation check runs after every turn's resolution.
    pub fn play_turn(&mut self, state: &mut GameState) -> Result<TurnReport, EngineError> {
        if let Some(winner) = state.winner() {
            return Err(EngineError::GameOver { winner });
        }

        let player = state.current_player();
        let mut report = TurnReport::new(state.turn_number() + 1, player);
        let mut phase = TurnPhase::TurnStart;

        loop {
            phase = match phase {
                TurnPhase::TurnStart => {
                    state.begin_turn();
                    self.selector.on_turn_start(player);
                    TurnPhase::Drawing
                }

                TurnPhase::Drawing => {
                    // A full larder means this turn's coin is already chosen.
                    if state.player(player).hand.larder().is_none() {
                        report.drawn = EffectResolver::draw_into_hand(state, player);
                    }
                    TurnPhase::Selecting
                }

                TurnPhase::Selecting => {
                    let coin = match state.player_mut(player).hand.take_larder() {
                        Some(coin) => {
                            state.record(GameEvent::ForcedFromLarder { player, coin });
                            Some(coin)
                        }
                        None => state.players[player].hand.take_one(
                            None,
                            &mut self.selector,
                            player,
                            DecisionKind::PlayCoin,
                        ),
                    };

                    match coin {
                        Some(coin) => {
                            report.played = Some(coin);
                            TurnPhase::Resolving {
                                pending: Pending::played(coin),
                                depth: 0,
                            }
                        }
                        None => {
                            state.record(GameEvent::NoCoins { player });
                            state.player_mut(player).note("You had no coins to play.");
                            TurnPhase::WinCheck
                        }
                    }
                }

                TurnPhase::Resolving { pending, depth } => {
                    match EffectResolver::resolve(state, &mut self.selector, player, pending) {
                        Step::Settled => TurnPhase::WinCheck,
                        Step::Chain(next) if depth < state.config().max_chain_depth => {
                            report.chain.push(next.coin);
                            TurnPhase::Resolving {
                                pending: next,
                                depth: depth + 1,
                            }
                        }
                        Step::Chain(next) => {
                            if next.origin == Origin::Chained {
                                state.pile.return_to_top(next.coin);
                                state.record(GameEvent::ReturnedToTop { coin: next.coin });
                            }
                            state.record(GameEvent::ChainCapped { player, depth });
                            report.chain_capped = true;
                            TurnPhase::WinCheck
                        }
                    }
                }

                TurnPhase::WinCheck => {
                    #[cfg(debug_assertions)]
                    state.check_conservation()?;

                    if state.is_terminal() {
                        state.declare_winner(player);
                        report.result = Some(GameResult::Winner(player));
                        report.go_again = state.go_again();
                        return Ok(report);
                    }
                    TurnPhase::TurnEnd
                }

                TurnPhase::TurnEnd => {
                    report.go_again = state.go_again();
                    state.advance();
                    return Ok(report);
                }
            };
        }
    }

    /// Play turns until someone wins or `max_turns` turns have been played.
    ///
    /// Returns `None` if the turn limit was reached first. A game that is
    /// already over returns its result without playing.
    pub fn run(
        &mut self,
        state: &mut GameState,
        max_turns: usize,
    ) -> Result<Option<GameResult>, EngineError> {
        if let Some(winner) = state.winner() {
            return Ok(Some(GameResult::Winner(winner)));
        }
        for _ in 0..max_turns {
            if let Some(result) = self.play_turn(state)?.result {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }
}
