//! Game state: the aggregate every turn mutates.
//!
//! ## GameState
//!
//! - Players (name, hand, larder, shield, notes) in seat order
//! - The shared pile
//! - Whose turn it is, the go-again flag and the turn counter
//! - The winner, once there is one
//! - Deterministic RNG
//! - The structured event log
//!
//! Coins are never created or destroyed after setup. Every catalog coin
//! sits in exactly one of: the draw stack, the in-play area, a hand, a
//! larder, or the removed pile. `check_conservation` verifies this.

use im::Vector;
use rustc_hash::FxHashMap;

use super::config::GameConfig;
use super::error::{EngineError, InvariantError};
use super::event::{EventRecord, GameEvent};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use super::snapshot::Snapshot;
use crate::coins::{Coin, CoinCatalog};
use crate::zones::Pile;

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    catalog: CoinCatalog,

    /// Seated players.
    pub players: PlayerMap<Player>,

    /// Draw stack, in-play area and removed coins.
    pub pile: Pile,

    current: PlayerId,
    go_again: bool,

    /// Turn number; 0 during setup, 1 for the first turn.
    turn_number: u32,

    /// Event sequence within the current turn.
    sequence: u32,

    winner: Option<PlayerId>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Event history, oldest first.
    log: Vector<EventRecord>,
}

impl GameState {
    /// Set up a new game.
    ///
    /// Builds and shuffles the pile, then deals one coin from the top to
    /// each player in seat order.
    ///
    /// ```
    /// use grackle::core::{GameConfig, GameState};
    ///
    /// let state = GameState::new(GameConfig::new(2), 42).unwrap();
    /// assert_eq!(state.player_count(), 2);
    /// assert!(state.players.values().all(|p| p.hand.len() == 1));
    /// assert!(state.check_conservation().is_ok());
    /// ```
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;

        let catalog = CoinCatalog::standard();
        let mut rng = GameRng::new(seed);
        let pile = Pile::build(
            &catalog,
            config.remove_count,
            config.reserved_count(),
            &mut rng,
        );
        let players = PlayerMap::new(config.player_count, |p| {
            Player::new(config.player_name(p), config.hand_capacity)
        });

        let mut state = Self::assemble(config, catalog, players, pile, rng);

        for player in PlayerId::all(state.player_count()) {
            let Some(coin) = state.pile.draw_top() else {
                break;
            };
            if let Err(coin) = state.players[player].hand.try_add(coin) {
                state.pile.return_to_top(coin);
                continue;
            }
            state.record(GameEvent::Dealt { player, coin });
        }

        state.check_conservation()?;
        Ok(state)
    }

    /// Set up a game with every coin placed by hand.
    ///
    /// Catalog coins the layout does not mention are treated as removed
    /// before shuffling. Used to stage exact positions for tests and
    /// puzzles.
    pub fn from_layout(config: GameConfig, layout: Layout, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;

        let catalog = CoinCatalog::standard();
        let mut players = PlayerMap::new(config.player_count, |p| {
            Player::new(config.player_name(p), config.hand_capacity)
        });

        let seat = |player: PlayerId| {
            if player.index() < config.player_count {
                Ok(player)
            } else {
                Err(EngineError::UnknownSeat(player))
            }
        };

        for (player, coins) in layout.hands {
            let hand = &mut players[seat(player)?].hand;
            for coin in coins {
                hand.try_add(coin)
                    .map_err(|coin| EngineError::HandOverflow { player, coin })?;
            }
        }
        for (player, coin) in layout.larders {
            players[seat(player)?]
                .hand
                .set_larder(coin)
                .map_err(|coin| EngineError::HandOverflow { player, coin })?;
        }
        for player in layout.shields {
            players[seat(player)?].hand.enable_shield();
        }
        let current = seat(layout.current)?;

        let mut placed: Vec<Coin> = layout
            .draw_stack
            .iter()
            .chain(layout.in_play.iter())
            .copied()
            .collect();
        for p in players.values() {
            placed.extend(p.hand.coins().iter().copied());
            placed.extend(p.hand.larder());
        }
        let removed = catalog
            .all_ids()
            .iter()
            .copied()
            .filter(|c| !placed.contains(c))
            .collect();

        let pile = Pile::from_parts(layout.draw_stack, layout.in_play, removed);
        let mut state = Self::assemble(config, catalog, players, pile, GameRng::new(seed));
        state.current = current;

        state.check_conservation()?;
        Ok(state)
    }

    /// Rebuild a playable state from a snapshot. The event log starts empty.
    pub fn restore(snapshot: Snapshot) -> Result<Self, EngineError> {
        snapshot.config.validate()?;
        if snapshot.players.len() != snapshot.config.player_count {
            return Err(EngineError::SeatCountMismatch {
                players: snapshot.players.len(),
                expected: snapshot.config.player_count,
            });
        }
        if snapshot.current.index() >= snapshot.config.player_count {
            return Err(EngineError::UnknownSeat(snapshot.current));
        }
        for (seat, player) in PlayerId::all(snapshot.players.len()).zip(&snapshot.players) {
            let hand = &player.hand;
            if hand.len() > hand.capacity() {
                return Err(EngineError::OverfullHand {
                    player: seat,
                    held: hand.len(),
                    capacity: hand.capacity(),
                });
            }
            if hand.capacity() != snapshot.config.hand_capacity {
                return Err(EngineError::HandCapacityMismatch {
                    player: seat,
                    capacity: hand.capacity(),
                    expected: snapshot.config.hand_capacity,
                });
            }
        }
        if let Some(winner) = snapshot.winner {
            if winner.index() >= snapshot.config.player_count {
                return Err(EngineError::UnknownSeat(winner));
            }
        }
        let terminal = snapshot.pile.is_terminal();
        if snapshot.winner.is_some() != terminal {
            return Err(EngineError::WinnerMismatch {
                winner: snapshot.winner,
                terminal,
            });
        }

        let mut state = Self::assemble(
            snapshot.config,
            CoinCatalog::standard(),
            PlayerMap::from_vec(snapshot.players),
            snapshot.pile,
            GameRng::from_state(&snapshot.rng),
        );
        state.current = snapshot.current;
        state.go_again = snapshot.go_again;
        state.turn_number = snapshot.turn_number;
        state.winner = snapshot.winner;

        state.check_conservation()?;
        Ok(state)
    }

    fn assemble(
        config: GameConfig,
        catalog: CoinCatalog,
        players: PlayerMap<Player>,
        pile: Pile,
        rng: GameRng,
    ) -> Self {
        Self {
            config,
            catalog,
            players,
            pile,
            current: PlayerId::new(0),
            go_again: false,
            turn_number: 0,
            sequence: 0,
            winner: None,
            rng,
            log: Vector::new(),
        }
    }

    /// Capture everything needed to render or resume the game.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            players: self.players.values().cloned().collect(),
            pile: self.pile.clone(),
            current: self.current,
            go_again: self.go_again,
            turn_number: self.turn_number,
            winner: self.winner,
            rng: self.rng.state(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CoinCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// The player whose turn it is (or was, once the game is over).
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Will the current player act again after this turn?
    #[must_use]
    pub fn go_again(&self) -> bool {
        self.go_again
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Are Key and Chest both in play?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.pile.is_terminal()
    }

    // === Event Log ===

    /// Full event history, oldest first.
    #[must_use]
    pub fn log(&self) -> &Vector<EventRecord> {
        &self.log
    }

    /// Events without their turn and sequence stamps.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.log.iter().map(|r| &r.event)
    }

    /// Events logged during one turn.
    pub fn events_in_turn(&self, turn: u32) -> impl Iterator<Item = &GameEvent> {
        self.log
            .iter()
            .filter(move |r| r.turn == turn)
            .map(|r| &r.event)
    }

    /// Append an event to the log.
    pub fn record(&mut self, event: GameEvent) {
        self.log.push_back(EventRecord {
            turn: self.turn_number,
            sequence: self.sequence,
            event,
        });
        self.sequence += 1;
    }

    // === Turn Bookkeeping ===

    /// Start a new turn: bump the counter and clear the go-again flag.
    pub(crate) fn begin_turn(&mut self) {
        self.turn_number += 1;
        self.sequence = 0;
        self.go_again = false;
    }

    pub(crate) fn set_go_again(&mut self) {
        self.go_again = true;
    }

    /// Pass control to the next seat unless the current player goes again.
    pub(crate) fn advance(&mut self) {
        if !self.go_again {
            self.current = self.current.next(self.player_count());
        }
    }

    pub(crate) fn declare_winner(&mut self, player: PlayerId) {
        self.winner = Some(player);
        self.record(GameEvent::Won { player });
    }

    /// Lower every player's shield.
    ///
    /// Always logs `ShieldsDropped`, even when no shield was up. Players
    /// who lost a raised shield are told.
    pub fn drop_all_shields(&mut self) {
        for (_, player) in self.players.iter_mut() {
            if player.hand.disable_shield() {
                player.note("Your shield was knocked down.");
            }
        }
        self.record(GameEvent::ShieldsDropped);
    }

    // === Invariants ===

    /// Verify every catalog coin is in exactly one zone.
    pub fn check_conservation(&self) -> Result<(), InvariantError> {
        let mut counts: FxHashMap<Coin, usize> = FxHashMap::default();

        let pile = self
            .pile
            .draw_stack()
            .iter()
            .chain(self.pile.in_play())
            .chain(self.pile.removed());
        for &coin in pile {
            *counts.entry(coin).or_insert(0) += 1;
        }
        for player in self.players.values() {
            for &coin in player.hand.coins().iter().chain(player.hand.larder().iter()) {
                *counts.entry(coin).or_insert(0) += 1;
            }
        }

        for &coin in self.catalog.all_ids() {
            match counts.get(&coin).copied().unwrap_or(0) {
                0 => return Err(InvariantError::Missing(coin)),
                1 => {}
                count => return Err(InvariantError::Duplicated { coin, count }),
            }
        }
        Ok(())
    }
}

/// Explicit coin placement for `GameState::from_layout`.
///
/// ```
/// use grackle::coins::Coin;
/// use grackle::core::{GameConfig, GameState, Layout, PlayerId};
///
/// let layout = Layout::new()
///     .with_draw_stack([Coin::Boots, Coin::Chest])
///     .with_in_play([Coin::Key])
///     .with_hand(PlayerId::new(0), [Coin::Arrow])
///     .with_hand(PlayerId::new(1), [Coin::Rope]);
///
/// let state = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap();
/// assert_eq!(state.pile.draw_stack(), &[Coin::Boots, Coin::Chest]);
/// assert_eq!(state.pile.removed().len(), 10);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Layout {
    draw_stack: Vec<Coin>,
    in_play: Vec<Coin>,
    hands: Vec<(PlayerId, Vec<Coin>)>,
    larders: Vec<(PlayerId, Coin)>,
    shields: Vec<PlayerId>,
    current: PlayerId,
}

impl Layout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw stack contents, top first.
    #[must_use]
    pub fn with_draw_stack(mut self, coins: impl IntoIterator<Item = Coin>) -> Self {
        self.draw_stack = coins.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_in_play(mut self, coins: impl IntoIterator<Item = Coin>) -> Self {
        self.in_play = coins.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_hand(mut self, player: PlayerId, coins: impl IntoIterator<Item = Coin>) -> Self {
        self.hands.push((player, coins.into_iter().collect()));
        self
    }

    #[must_use]
    pub fn with_larder(mut self, player: PlayerId, coin: Coin) -> Self {
        self.larders.push((player, coin));
        self
    }

    #[must_use]
    pub fn with_shield(mut self, player: PlayerId) -> Self {
        self.shields.push(player);
        self
    }

    /// Whose turn comes first.
    #[must_use]
    pub fn with_current(mut self, player: PlayerId) -> Self {
        self.current = player;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::Hand;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_new_deals_one_each() {
        let state = GameState::new(GameConfig::new(3), 7).unwrap();

        assert_eq!(state.turn_number(), 0);
        assert_eq!(state.current_player(), P0);
        assert!(!state.go_again());
        assert!(!state.is_over());
        for player in state.players.values() {
            assert_eq!(player.hand.len(), 1);
            assert_eq!(player.hand.larder(), None);
            assert!(!player.hand.is_shielded());
        }
        assert_eq!(state.pile.draw_stack().len(), 12);
        assert_eq!(
            state
                .events()
                .filter(|e| matches!(e, GameEvent::Dealt { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_new_is_deterministic() {
        let a = GameState::new(GameConfig::new(2).with_remove_count(4), 99).unwrap();
        let b = GameState::new(GameConfig::new(2).with_remove_count(4), 99).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let err = GameState::new(GameConfig::new(1), 0).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_player_names() {
        let state = GameState::new(GameConfig::new(2), 1).unwrap();
        assert_eq!(state.player(P0).name, "Player 1");
        assert_eq!(state.player(P1).name, "Player 2");
    }

    #[test]
    fn test_layout_places_coins() {
        let layout = Layout::new()
            .with_draw_stack([Coin::Boots])
            .with_in_play([Coin::Key])
            .with_hand(P0, [Coin::Arrow, Coin::Rope])
            .with_larder(P1, Coin::Wind)
            .with_shield(P1)
            .with_current(P1);
        let state = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap();

        assert_eq!(state.current_player(), P1);
        assert_eq!(state.player(P0).hand.coins(), &[Coin::Arrow, Coin::Rope]);
        assert_eq!(state.player(P1).hand.larder(), Some(Coin::Wind));
        assert!(state.player(P1).hand.is_shielded());
        assert_eq!(state.pile.removed().len(), 10);
    }

    #[test]
    fn test_layout_rejects_duplicates() {
        let layout = Layout::new()
            .with_draw_stack([Coin::Boots])
            .with_hand(P0, [Coin::Boots]);
        let err = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Invariant(InvariantError::Duplicated { coin: Coin::Boots, count: 2 })
        ));
    }

    #[test]
    fn test_layout_rejects_overfull_hand() {
        let layout = Layout::new().with_hand(P0, [Coin::Arrow, Coin::Rope, Coin::Wind]);
        let err = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::HandOverflow { player: P0, coin: Coin::Wind }
        ));
    }

    #[test]
    fn test_layout_rejects_unknown_seat() {
        let layout = Layout::new().with_hand(PlayerId::new(5), [Coin::Arrow]);
        let err = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap_err();
        assert!(matches!(err, EngineError::UnknownSeat(_)));
    }

    #[test]
    fn test_conservation_detects_missing_coin() {
        let mut state = GameState::new(GameConfig::new(2), 3).unwrap();
        let coin = state.pile.draw_top().unwrap();
        assert_eq!(state.check_conservation(), Err(InvariantError::Missing(coin)));
    }

    #[test]
    fn test_drop_all_shields_logs_once() {
        let layout = Layout::new().with_shield(P0).with_shield(P1);
        let mut state = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap();

        state.drop_all_shields();

        assert!(state.players.values().all(|p| !p.hand.is_shielded()));
        assert_eq!(state.events().last(), Some(&GameEvent::ShieldsDropped));
        assert_eq!(state.player(P1).notes(), &["Your shield was knocked down.".to_string()]);

        state.drop_all_shields();
        assert_eq!(state.player(P1).notes().len(), 1);
    }

    #[test]
    fn test_record_stamps_turn_and_sequence() {
        let mut state = GameState::new(GameConfig::new(2), 3).unwrap();
        state.begin_turn();
        state.record(GameEvent::NoCoins { player: P0 });
        state.record(GameEvent::GoAgain { player: P0 });

        let last: Vec<_> = state.log().iter().rev().take(2).cloned().collect();
        assert_eq!(last[0].turn, 1);
        assert_eq!(last[0].sequence, 1);
        assert_eq!(last[1].sequence, 0);
        assert_eq!(state.events_in_turn(1).count(), 2);
    }

    #[test]
    fn test_advance_respects_go_again() {
        let mut state = GameState::new(GameConfig::new(3), 3).unwrap();
        state.begin_turn();
        state.set_go_again();
        state.advance();
        assert_eq!(state.current_player(), P0);

        state.begin_turn();
        state.advance();
        assert_eq!(state.current_player(), P1);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut state = GameState::new(GameConfig::new(2).with_remove_count(2), 11).unwrap();
        state.player_mut(P1).note("hello");
        let snapshot = state.snapshot();

        let restored = GameState::restore(snapshot.clone()).unwrap();

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.player(P1).notes(), &["hello".to_string()]);
        assert!(restored.log().is_empty());
    }

    #[test]
    fn test_restore_rejects_wrong_hand_capacity() {
        let mut snapshot = GameState::new(GameConfig::new(2), 11).unwrap().snapshot();
        snapshot.players[1].hand = Hand::new(3);

        let err = GameState::restore(snapshot).unwrap_err();

        assert!(matches!(
            err,
            EngineError::HandCapacityMismatch { player: P1, capacity: 3, expected: 2 }
        ));
    }

    #[test]
    fn test_restore_rejects_overfull_hand() {
        let snapshot = GameState::new(GameConfig::new(2), 11).unwrap().snapshot();
        let mut value = serde_json::to_value(&snapshot).unwrap();
        let coins = value["players"][0]["hand"]["coins"].as_array_mut().unwrap();
        for coin in [Coin::Wind, Coin::Rope] {
            coins.push(serde_json::to_value(coin).unwrap());
        }
        let snapshot: Snapshot = serde_json::from_value(value).unwrap();

        let err = GameState::restore(snapshot).unwrap_err();

        assert!(matches!(
            err,
            EngineError::OverfullHand { player: P0, held: 3, capacity: 2 }
        ));
    }

    #[test]
    fn test_restore_rejects_winner_off_the_table() {
        let layout = Layout::new().with_in_play([Coin::Key, Coin::Chest]);
        let mut snapshot = GameState::from_layout(GameConfig::new(2), layout, 0)
            .unwrap()
            .snapshot();
        snapshot.winner = Some(PlayerId::new(5));

        let err = GameState::restore(snapshot).unwrap_err();

        assert!(matches!(err, EngineError::UnknownSeat(p) if p == PlayerId::new(5)));
    }

    #[test]
    fn test_restore_rejects_winner_without_win() {
        let mut snapshot = GameState::new(GameConfig::new(2), 11).unwrap().snapshot();
        snapshot.winner = Some(P0);

        let err = GameState::restore(snapshot).unwrap_err();

        assert!(matches!(
            err,
            EngineError::WinnerMismatch { winner: Some(P0), terminal: false }
        ));
    }

    #[test]
    fn test_restore_keeps_finished_game() {
        let layout = Layout::new()
            .with_in_play([Coin::Key])
            .with_hand(P0, [Coin::Chest]);
        let mut state = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap();
        state.begin_turn();
        state.pile.play(Coin::Chest);
        state.player_mut(P0).hand.remove(Coin::Chest);
        state.declare_winner(P0);

        let restored = GameState::restore(state.snapshot()).unwrap();

        assert_eq!(restored.winner(), Some(P0));
    }

    #[test]
    fn test_restore_rejects_seat_mismatch() {
        let mut snapshot = GameState::new(GameConfig::new(2), 11).unwrap().snapshot();
        snapshot.players.pop();
        let err = GameState::restore(snapshot).unwrap_err();
        assert!(matches!(
            err,
            EngineError::SeatCountMismatch { players: 1, expected: 2 }
        ));
    }
}
