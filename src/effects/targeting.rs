//! Decision making at the engine boundary.
//!
//! The engine never prompts. Every "choose one of N" question goes through
//! a `Selector`, which may be a terminal prompt, a scripted test input or a
//! bot. The helpers here enforce the protocol around it:
//! - an empty candidate list is never offered; the helpers return `None`
//! - a single candidate is taken without asking
//! - an out-of-range answer is clamped to the last candidate

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::effect::EffectKind;
use crate::coins::Coin;
use crate::core::{GameRng, PlayerId};

/// What a decision is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Which held coin to play this turn.
    PlayCoin,
    /// Which opponent a targeted effect hits.
    Target(EffectKind),
    /// Which of the target's coins, chosen face down.
    TargetCoin(EffectKind),
    /// Which held coin to hand over in a knife trade.
    GiveCoin,
    /// Which coin goes back on top of the pile after a coin purse draw.
    ReturnToTop,
    /// Which of the two lantern coins ends up on top.
    LanternTop,
    /// Which in-play coin a mirror or shovel acts on.
    InPlay(EffectKind),
    /// Whether the rope moves the bottom coin to the top.
    MoveBottomToTop,
}

/// One option offered to a selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Candidate {
    Coin(Coin),
    Player(PlayerId),
    /// A coin the chooser may not see; only its position is offered.
    Hidden(usize),
}

impl From<Coin> for Candidate {
    fn from(coin: Coin) -> Self {
        Candidate::Coin(coin)
    }
}

impl From<PlayerId> for Candidate {
    fn from(player: PlayerId) -> Self {
        Candidate::Player(player)
    }
}

/// The capability the engine calls for every decision.
///
/// Implementations return an index into `options`. The engine only calls
/// `select` with two or more options.
pub trait Selector {
    /// Pick one of `options` on behalf of `chooser`.
    fn select(&mut self, chooser: PlayerId, kind: DecisionKind, options: &[Candidate]) -> usize;

    /// Answer a yes/no question about `coin`.
    fn confirm(&mut self, _chooser: PlayerId, _kind: DecisionKind, _coin: Coin) -> bool {
        true
    }

    /// Called before a player's turn begins.
    ///
    /// Hosts use this to hand the console over and check the right person
    /// is sitting at it.
    fn on_turn_start(&mut self, _player: PlayerId) {}
}

/// Choose an index into `candidates`.
///
/// Returns `None` for an empty slice and `Some(0)` for a single candidate
/// without consulting the selector.
pub fn choose_index<T>(
    selector: &mut dyn Selector,
    chooser: PlayerId,
    kind: DecisionKind,
    candidates: &[T],
) -> Option<usize>
where
    T: Copy + Into<Candidate>,
{
    match candidates.len() {
        0 => None,
        1 => Some(0),
        n => {
            let options: Vec<Candidate> = candidates.iter().map(|&c| c.into()).collect();
            Some(selector.select(chooser, kind, &options).min(n - 1))
        }
    }
}

/// Choose one candidate and remove it from `candidates`.
///
/// ```
/// use grackle::coins::Coin;
/// use grackle::core::PlayerId;
/// use grackle::effects::{choose_one, DecisionKind, FirstSelector};
///
/// let mut coins = vec![Coin::Rope];
/// let chosen = choose_one(&mut FirstSelector, PlayerId::new(0), DecisionKind::PlayCoin, &mut coins);
/// assert_eq!(chosen, Some(Coin::Rope));
/// assert!(coins.is_empty());
/// ```
pub fn choose_one<T>(
    selector: &mut dyn Selector,
    chooser: PlayerId,
    kind: DecisionKind,
    candidates: &mut Vec<T>,
) -> Option<T>
where
    T: Copy + Into<Candidate>,
{
    let idx = choose_index(selector, chooser, kind, candidates.as_slice())?;
    Some(candidates.remove(idx))
}

/// Choose an opponent of `exclude`. With two players the choice is forced.
pub fn choose_player(
    selector: &mut dyn Selector,
    chooser: PlayerId,
    kind: DecisionKind,
    player_count: usize,
    exclude: PlayerId,
) -> Option<PlayerId> {
    let mut candidates: Vec<PlayerId> = PlayerId::all(player_count)
        .filter(|&p| p != exclude)
        .collect();
    choose_one(selector, chooser, kind, &mut candidates)
}

/// Choose one of `count` face-down coins by position.
pub fn choose_hidden(
    selector: &mut dyn Selector,
    chooser: PlayerId,
    kind: DecisionKind,
    count: usize,
) -> Option<usize> {
    let positions: Vec<Hidden> = (0..count).map(Hidden).collect();
    choose_index(selector, chooser, kind, positions.as_slice())
}

#[derive(Clone, Copy)]
struct Hidden(usize);

impl From<Hidden> for Candidate {
    fn from(hidden: Hidden) -> Self {
        Candidate::Hidden(hidden.0)
    }
}

/// Always takes the first option and agrees to every prompt.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstSelector;

impl Selector for FirstSelector {
    fn select(&mut self, _chooser: PlayerId, _kind: DecisionKind, _options: &[Candidate]) -> usize {
        0
    }
}

/// Uniformly random decisions from a seeded RNG.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: GameRng,
}

impl RandomSelector {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Selector for RandomSelector {
    fn select(&mut self, _chooser: PlayerId, _kind: DecisionKind, options: &[Candidate]) -> usize {
        self.rng.gen_range_usize(0..options.len().max(1))
    }

    fn confirm(&mut self, _chooser: PlayerId, _kind: DecisionKind, _coin: Coin) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Replays a fixed list of answers.
///
/// Once the script runs out it picks index 0 and confirms. Every question
/// actually asked is recorded so tests can check what was offered.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSelector {
    answers: VecDeque<usize>,
    confirms: VecDeque<bool>,
    asked: Vec<(PlayerId, DecisionKind, Vec<Candidate>)>,
    turns: Vec<PlayerId>,
}

impl ScriptedSelector {
    /// Create a selector that answers `select` calls in order.
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Set the answers for `confirm` calls.
    #[must_use]
    pub fn with_confirms(mut self, confirms: impl IntoIterator<Item = bool>) -> Self {
        self.confirms = confirms.into_iter().collect();
        self
    }

    /// Unused `select` answers.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Every `select` call made, in order.
    #[must_use]
    pub fn asked(&self) -> &[(PlayerId, DecisionKind, Vec<Candidate>)] {
        &self.asked
    }

    /// Players whose turns have started, in order.
    #[must_use]
    pub fn turns(&self) -> &[PlayerId] {
        &self.turns
    }
}

impl Selector for ScriptedSelector {
    fn select(&mut self, chooser: PlayerId, kind: DecisionKind, options: &[Candidate]) -> usize {
        self.asked.push((chooser, kind, options.to_vec()));
        self.answers.pop_front().unwrap_or(0)
    }

    fn confirm(&mut self, _chooser: PlayerId, _kind: DecisionKind, _coin: Coin) -> bool {
        self.confirms.pop_front().unwrap_or(true)
    }

    fn on_turn_start(&mut self, player: PlayerId) {
        self.turns.push(player);
    }
}
