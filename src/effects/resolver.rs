//! Effect resolution: what each coin does to the game state.
//!
//! `EffectResolver::resolve` handles exactly one coin. Effects that hand
//! another coin back for resolution (Boots, Mirror) return
//! `Step::Chain` instead of recursing; the turn engine owns the loop and
//! its depth cap.
//!
//! Empty piles, empty hands and an empty in-play area are all normal here.
//! An effect with nothing to act on logs what happened and settles.

use crate::coins::Coin;
use crate::core::{GameEvent, GameState, PlayerId};

use super::effect::{EffectKind, Pending, Step};
use super::targeting::{choose_hidden, choose_one, choose_player, DecisionKind, Selector};

/// Resolves coins against the game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve one coin for `player`.
    ///
    /// Played and chained coins are moved into play first, except Wind,
    /// which plays itself after sweeping the in-play area. Mirrored coins
    /// are already in play and only have their effect repeated.
    pub fn resolve(
        state: &mut GameState,
        selector: &mut dyn Selector,
        player: PlayerId,
        pending: Pending,
    ) -> Step {
        let coin = pending.coin;
        let effect = state.catalog().effect(coin);

        if !pending.enters_play() {
            state.record(GameEvent::Mirrored { player, coin });
        } else if effect.plays_before_resolving() {
            state.pile.play(coin);
            state.record(GameEvent::Played { player, coin });
        }

        match effect {
            EffectKind::Key => Step::Settled,

            EffectKind::Chest => {
                state.set_go_again();
                state.record(GameEvent::GoAgain { player });
                Step::Settled
            }

            EffectKind::Arrow => {
                Self::arrow(state, selector, player, coin);
                Step::Settled
            }

            EffectKind::Boots => match state.pile.draw_top() {
                Some(next) => {
                    state.record(GameEvent::Chained { player, coin: next });
                    Step::Chain(Pending::chained(next))
                }
                None => {
                    state.record(GameEvent::PileEmpty { player });
                    Step::Settled
                }
            },

            EffectKind::CoinPurse => {
                Self::coin_purse(state, selector, player);
                Step::Settled
            }

            EffectKind::HamHock => {
                Self::ham_hock(state, player);
                Step::Settled
            }

            EffectKind::Knife => {
                Self::knife(state, selector, player, coin);
                Step::Settled
            }

            EffectKind::Lantern => {
                Self::lantern(state, selector, player);
                Step::Settled
            }

            EffectKind::Mirror => {
                let mut candidates: Vec<Coin> = state
                    .pile
                    .in_play()
                    .iter()
                    .copied()
                    .filter(|&c| c != coin)
                    .collect();
                match choose_one(selector, player, DecisionKind::InPlay(effect), &mut candidates) {
                    Some(target) => Step::Chain(Pending::mirrored(target)),
                    None => Step::Settled,
                }
            }

            EffectKind::Raven => {
                Self::raven(state, selector, player, coin);
                Step::Settled
            }

            EffectKind::Rope => {
                Self::rope(state, selector, player);
                Step::Settled
            }

            EffectKind::Shield => {
                if state.players[player].hand.enable_shield() {
                    state.record(GameEvent::ShieldRaised { player });
                } else {
                    state.record(GameEvent::ShieldAlreadyRaised { player });
                    state.players[player].note("Your shield was already up.");
                }
                Step::Settled
            }

            EffectKind::Shovel => {
                Self::shovel(state, selector, player, coin);
                Step::Settled
            }

            EffectKind::Sickle => {
                Self::sickle(state, selector, player, coin);
                Step::Settled
            }

            EffectKind::Wind => {
                let count = state.pile.reintegrate();
                state.record(GameEvent::Reintegrated { count });
                state.pile.shuffle(&mut state.rng);
                state.pile.remove_from_draw(coin);
                state.pile.play(coin);
                state.record(GameEvent::Played { player, coin });
                state.drop_all_shields();
                Step::Settled
            }
        }
    }

    /// Draw the top coin into a player's hand.
    ///
    /// A coin that does not fit goes straight back on top of the pile.
    /// Returns the coin only if it was kept.
    pub fn draw_into_hand(state: &mut GameState, player: PlayerId) -> Option<Coin> {
        let Some(coin) = state.pile.draw_top() else {
            state.record(GameEvent::PileEmpty { player });
            return None;
        };
        match state.players[player].hand.try_add(coin) {
            Ok(()) => {
                state.record(GameEvent::Drew { player, coin });
                Some(coin)
            }
            Err(coin) => {
                state.pile.return_to_top(coin);
                state.record(GameEvent::DrawRejected { player, coin });
                None
            }
        }
    }

    fn arrow(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId, coin: Coin) {
        let Some((target, taken)) = Self::take_from_target(state, selector, player, coin) else {
            return;
        };
        state.pile.bury_at_bottom(taken);
        state.record(GameEvent::Buried { coin: taken });
        let by = Self::name(state, player);
        state.players[target].note(format!("{by} shot your {taken} to the bottom of the pile."));
        Self::draw_into_hand(state, target);
    }

    fn coin_purse(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId) {
        let Some(drawn) = state.pile.draw_top() else {
            state.record(GameEvent::PileEmpty { player });
            return;
        };

        let hand = &mut state.players[player].hand;
        let returned = match hand.try_add(drawn) {
            Ok(()) => {
                state.record(GameEvent::Drew { player, coin: drawn });
                state.players[player]
                    .hand
                    .take_one(None, selector, player, DecisionKind::ReturnToTop)
            }
            Err(drawn) => {
                // Full hand: the drawn coin is one of the candidates.
                let mut candidates: Vec<Coin> = hand.coins().to_vec();
                candidates.push(drawn);
                let chosen = choose_one(selector, player, DecisionKind::ReturnToTop, &mut candidates);
                if let Some(chosen) = chosen.filter(|&c| c != drawn) {
                    hand.remove(chosen);
                    if let Err(drawn) = hand.try_add(drawn) {
                        state.pile.return_to_top(drawn);
                    } else {
                        state.record(GameEvent::Drew { player, coin: drawn });
                    }
                }
                chosen
            }
        };

        if let Some(coin) = returned {
            state.pile.return_to_top(coin);
            state.record(GameEvent::ReturnedToTop { coin });
        }
    }

    fn ham_hock(state: &mut GameState, player: PlayerId) {
        let Some(drawn) = state.pile.draw_top() else {
            state.record(GameEvent::PileEmpty { player });
            return;
        };
        match state.players[player].hand.set_larder(drawn) {
            Ok(()) => state.record(GameEvent::LarderFilled { player, coin: drawn }),
            Err(coin) => {
                state.pile.return_to_top(coin);
                state.record(GameEvent::LarderRejected { player, coin });
                state.players[player].note("Your larder is already full.");
            }
        }
    }

    fn knife(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId, coin: Coin) {
        let Some(target) = Self::choose_target(state, selector, player, coin) else {
            return;
        };

        let given = state.players[player]
            .hand
            .take_one(None, selector, player, DecisionKind::GiveCoin);
        let count = state.players[target].hand.len();
        let taken = choose_hidden(selector, player, DecisionKind::TargetCoin(EffectKind::Knife), count)
            .and_then(|idx| state.players[target].hand.take_at(idx));

        if let Some(coin) = given {
            if let Err(coin) = state.players[target].hand.try_add(coin) {
                state.pile.return_to_top(coin);
                state.record(GameEvent::ReturnedToTop { coin });
            }
        }
        if let Some(coin) = taken {
            if let Err(coin) = state.players[player].hand.try_add(coin) {
                state.pile.return_to_top(coin);
                state.record(GameEvent::ReturnedToTop { coin });
            }
        }
        state.record(GameEvent::Swapped { player, target });

        let by = Self::name(state, player);
        let message = match (given, taken) {
            (Some(g), Some(t)) => format!("{by} traded you their {g} for your {t}."),
            (Some(g), None) => format!("{by} gave you their {g}."),
            (None, Some(t)) => format!("{by} took your {t}."),
            (None, None) => format!("{by} tried to trade, but neither of you had a coin."),
        };
        state.players[target].note(message);
        if let Some(t) = taken {
            state.players[player].note(format!("You received {t}."));
        }
    }

    fn lantern(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId) {
        let mut drawn: Vec<Coin> = (0..2).map_while(|_| state.pile.draw_top()).collect();

        let top = match drawn.len() {
            0 => {
                state.record(GameEvent::PileEmpty { player });
                return;
            }
            1 => drawn.pop(),
            _ => choose_one(selector, player, DecisionKind::LanternTop, &mut drawn),
        };

        for coin in drawn.into_iter().chain(top) {
            state.pile.return_to_top(coin);
            state.record(GameEvent::ReturnedToTop { coin });
        }
    }

    fn raven(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId, coin: Coin) {
        let Some(target) = Self::choose_target(state, selector, player, coin) else {
            return;
        };
        let hand = &state.players[target].hand;
        let Some(idx) = choose_hidden(selector, player, DecisionKind::TargetCoin(EffectKind::Raven), hand.len()) else {
            Self::note_empty_hand(state, player, target);
            return;
        };
        let seen = hand.coins()[idx];

        state.record(GameEvent::Revealed { player, target });
        let by = Self::name(state, player);
        let of = Self::name(state, target);
        state.players[player].note(format!("{of} is holding {seen}."));
        state.players[target].note(format!("{by} looked at your {seen}."));
    }

    fn rope(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId) {
        let Some(bottom) = state.pile.peek_bottom() else {
            state.record(GameEvent::PileEmpty { player });
            return;
        };
        if selector.confirm(player, DecisionKind::MoveBottomToTop, bottom) {
            state.pile.remove_from_draw(bottom);
            state.pile.return_to_top(bottom);
            state.record(GameEvent::ReturnedToTop { coin: bottom });
        }
    }

    fn shovel(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId, coin: Coin) {
        let mut candidates: Vec<Coin> = state
            .pile
            .in_play()
            .iter()
            .copied()
            .filter(|&c| c != coin)
            .collect();
        let Some(buried) =
            choose_one(selector, player, DecisionKind::InPlay(EffectKind::Shovel), &mut candidates)
        else {
            return;
        };

        state.pile.remove_from_play(buried);
        state.pile.bury_at_bottom(buried);
        state.record(GameEvent::Buried { coin: buried });

        // Shields last only as long as the Shield coin stays in play.
        if state.catalog().effect(buried) == EffectKind::Shield {
            state.drop_all_shields();
        }
    }

    fn sickle(state: &mut GameState, selector: &mut dyn Selector, player: PlayerId, coin: Coin) {
        let Some((target, taken)) = Self::take_from_target(state, selector, player, coin) else {
            return;
        };
        state.pile.play(taken);
        state.record(GameEvent::Sickled {
            player,
            target,
            coin: taken,
        });
        let by = Self::name(state, player);
        state.players[target].note(format!("{by} cut your {taken} into play."));
        Self::draw_into_hand(state, target);
    }

    /// Pick an opponent for a targeted effect, stopping at their shield.
    fn choose_target(
        state: &mut GameState,
        selector: &mut dyn Selector,
        player: PlayerId,
        coin: Coin,
    ) -> Option<PlayerId> {
        let effect = state.catalog().effect(coin);
        let target = choose_player(
            selector,
            player,
            DecisionKind::Target(effect),
            state.player_count(),
            player,
        )?;

        if state.players[target].hand.is_shielded() {
            state.record(GameEvent::Blocked {
                player,
                target,
                coin,
            });
            let by = Self::name(state, player);
            let of = Self::name(state, target);
            state.players[target].note(format!("Your shield blocked {by}'s {coin}."));
            state.players[player].note(format!("{of}'s shield blocked your {coin}."));
            return None;
        }
        Some(target)
    }

    /// Pick an opponent and take one of their held coins, face down.
    fn take_from_target(
        state: &mut GameState,
        selector: &mut dyn Selector,
        player: PlayerId,
        coin: Coin,
    ) -> Option<(PlayerId, Coin)> {
        let target = Self::choose_target(state, selector, player, coin)?;
        let effect = state.catalog().effect(coin);
        let count = state.players[target].hand.len();

        match choose_hidden(selector, player, DecisionKind::TargetCoin(effect), count)
            .and_then(|idx| state.players[target].hand.take_at(idx))
        {
            Some(taken) => Some((target, taken)),
            None => {
                Self::note_empty_hand(state, player, target);
                None
            }
        }
    }

    fn note_empty_hand(state: &mut GameState, player: PlayerId, target: PlayerId) {
        let of = Self::name(state, target);
        state.players[player].note(format!("{of} has no coins."));
    }

    fn name(state: &GameState, player: PlayerId) -> String {
        state.players[player].name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Layout};
    use crate::effects::FirstSelector;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn state(layout: Layout) -> GameState {
        GameState::from_layout(GameConfig::new(2), layout, 0).unwrap()
    }

    #[test]
    fn test_draw_into_hand() {
        let mut state = state(Layout::new().with_draw_stack([Coin::Rope, Coin::Wind]));

        assert_eq!(EffectResolver::draw_into_hand(&mut state, P0), Some(Coin::Rope));
        assert_eq!(state.player(P0).hand.coins(), &[Coin::Rope]);
        assert_eq!(state.pile.draw_stack(), &[Coin::Wind]);
    }

    #[test]
    fn test_draw_into_full_hand_returns_coin() {
        let mut state = state(
            Layout::new()
                .with_draw_stack([Coin::Rope])
                .with_hand(P0, [Coin::Key, Coin::Chest]),
        );

        assert_eq!(EffectResolver::draw_into_hand(&mut state, P0), None);
        assert_eq!(state.pile.draw_stack(), &[Coin::Rope]);
        assert_eq!(
            state.events().last(),
            Some(&GameEvent::DrawRejected { player: P0, coin: Coin::Rope })
        );
    }

    #[test]
    fn test_draw_from_empty_pile() {
        let mut state = state(Layout::new());
        assert_eq!(EffectResolver::draw_into_hand(&mut state, P1), None);
        assert_eq!(state.events().last(), Some(&GameEvent::PileEmpty { player: P1 }));
    }

    #[test]
    fn test_played_coin_enters_play() {
        let mut state = state(Layout::new().with_hand(P0, [Coin::Key]));
        state.player_mut(P0).hand.remove(Coin::Key);

        let step = EffectResolver::resolve(&mut state, &mut FirstSelector, P0, Pending::played(Coin::Key));

        assert_eq!(step, Step::Settled);
        assert_eq!(state.pile.in_play(), &[Coin::Key]);
        assert!(state.check_conservation().is_ok());
    }

    #[test]
    fn test_mirrored_coin_is_not_played_twice() {
        let mut state = state(Layout::new().with_in_play([Coin::Chest]));

        let step = EffectResolver::resolve(&mut state, &mut FirstSelector, P0, Pending::mirrored(Coin::Chest));

        assert_eq!(step, Step::Settled);
        assert_eq!(state.pile.in_play(), &[Coin::Chest]);
        assert!(state.go_again());
    }
}
