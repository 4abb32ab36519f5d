//! Property tests over random tables, seeds and decisions.

use proptest::prelude::*;

use grackle::coins::{Coin, CoinCatalog};
use grackle::core::{EngineError, GameConfig, GameEvent, GameState, Layout, PlayerId};
use grackle::effects::{choose_one, DecisionKind, RandomSelector, ScriptedSelector};
use grackle::rules::TurnEngine;

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (2usize..=6, 2usize..=4, 0usize..=14, 1usize..=8).prop_map(
        |(players, capacity, remove, depth)| {
            GameConfig::new(players)
                .with_hand_capacity(capacity)
                .with_remove_count(remove)
                .with_max_chain_depth(depth)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every coin stays in exactly one zone after every turn.
    #[test]
    fn prop_conservation(config in config_strategy(), seed in any::<u64>(), picks in any::<u64>()) {
        let mut state = GameState::new(config, seed).unwrap();
        let mut engine = TurnEngine::new(RandomSelector::new(picks));

        for _ in 0..200 {
            let report = engine.play_turn(&mut state).unwrap();
            prop_assert!(state.check_conservation().is_ok());
            if report.result.is_some() {
                break;
            }
        }
    }

    /// A winner exists exactly when Key and Chest are both in play, and
    /// the game refuses further turns once decided.
    #[test]
    fn prop_win_iff_terminal(config in config_strategy(), seed in any::<u64>(), picks in any::<u64>()) {
        let mut state = GameState::new(config, seed).unwrap();
        let mut engine = TurnEngine::new(RandomSelector::new(picks));

        for _ in 0..200 {
            let report = engine.play_turn(&mut state).unwrap();
            prop_assert_eq!(report.result.is_some(), state.is_terminal());
            prop_assert_eq!(state.is_over(), state.is_terminal());
            if state.is_over() {
                let is_game_over = matches!(engine.play_turn(&mut state), Err(EngineError::GameOver { .. }));
                prop_assert!(is_game_over);
                break;
            }
        }
    }

    /// A full larder decides the next coin played, whatever is in hand.
    #[test]
    fn prop_larder_forces_play(
        larder_idx in 0usize..13,
        hand_picks in proptest::collection::vec(0usize..12, 0..2),
        answer in 0usize..4,
    ) {
        let mut pool: Vec<Coin> = Coin::ALL
            .iter()
            .copied()
            .filter(|c| !c.is_terminal())
            .collect();
        let larder = pool.remove(larder_idx);
        let mut hand = Vec::new();
        for pick in hand_picks {
            hand.push(pool.remove(pick % pool.len()));
        }

        let layout = Layout::new()
            .with_draw_stack(pool)
            .with_hand(PlayerId::new(0), hand)
            .with_larder(PlayerId::new(0), larder);
        let mut state = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap();
        let mut engine = TurnEngine::new(ScriptedSelector::new([answer; 8]));

        let report = engine.play_turn(&mut state).unwrap();

        prop_assert_eq!(report.played, Some(larder));
        prop_assert_eq!(report.drawn, None);
        let forced = state
            .events()
            .any(|e| *e == GameEvent::ForcedFromLarder { player: PlayerId::new(0), coin: larder });
        prop_assert!(forced);
    }

    /// Targeted effects leave a shielded target exactly as it was.
    #[test]
    fn prop_shield_blocks_targeted(which in 0usize..4, extra in 0usize..3) {
        let targeted = [Coin::Arrow, Coin::Knife, Coin::Raven, Coin::Sickle];
        let coin = targeted[which];
        let spare = [Coin::Rope, Coin::Wind, Coin::Lantern][extra];
        prop_assert!(CoinCatalog::standard().effect(coin).is_targeted());

        let layout = Layout::new()
            .with_draw_stack([Coin::Boots, Coin::Shovel])
            .with_hand(PlayerId::new(0), [coin])
            .with_hand(PlayerId::new(1), [spare, Coin::Chest])
            .with_shield(PlayerId::new(1));
        let mut state = GameState::from_layout(GameConfig::new(2), layout, 0).unwrap();
        let before = state.player(PlayerId::new(1)).hand.clone();
        // Play the targeted coin rather than the Boots just drawn.
        let mut engine = TurnEngine::new(ScriptedSelector::new([0]));

        let report = engine.play_turn(&mut state).unwrap();

        prop_assert_eq!(report.played, Some(coin));
        prop_assert_eq!(&state.player(PlayerId::new(1)).hand, &before);
        let blocked = state.events().any(|e| matches!(e, GameEvent::Blocked { .. }));
        prop_assert!(blocked);
    }

    /// A single candidate is taken without consulting the selector.
    #[test]
    fn prop_singleton_auto_pick(idx in 0usize..15, answer in any::<usize>()) {
        let coin = Coin::ALL[idx];
        let mut candidates = vec![coin];
        let mut selector = ScriptedSelector::new([answer]);

        let chosen = choose_one(&mut selector, PlayerId::new(0), DecisionKind::PlayCoin, &mut candidates);

        prop_assert_eq!(chosen, Some(coin));
        prop_assert!(candidates.is_empty());
        prop_assert_eq!(selector.remaining(), 1);
    }
}
