//! Rejected actions must leave the state byte-for-byte unchanged.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::cards_types::Rank;
use super::rounds;
use super::{test_gens, test_prelude, test_state_helpers};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Throw arbitrary intents at a random mid-game state; every rejection
    /// is a perfect no-op.
    #[test]
    fn prop_rejected_actions_are_no_ops(
        players in test_gens::player_count(),
        seed in any::<u64>(),
        warmup in 0usize..60,
        actor in 0usize..8,
        card in test_gens::card(),
        is_defending in any::<bool>(),
    ) {
        let mut state = test_state_helpers::seeded_game(players, seed);
        let mut rng = ChaCha20Rng::seed_from_u64(seed ^ 0xc2b2_ae35);
        for _ in 0..warmup {
            if !test_state_helpers::playout_step(&mut state, &mut rng) {
                break;
            }
        }
        // Deliberately sometimes an id outside the game.
        let player = format!("p{actor}");

        let before = state.clone();
        if rounds::make_move(&mut state, &player, card, is_defending).is_err() {
            prop_assert_eq!(&state, &before);
        }

        let before = state.clone();
        if rounds::take_cards(&mut state, &player).is_err() {
            prop_assert_eq!(&state, &before);
        }

        let before = state.clone();
        if rounds::pass_turn(&mut state, &player).is_err() {
            prop_assert_eq!(&state, &before);
        }

        let before = state.clone();
        if rounds::end_turn(&mut state).is_err() {
            prop_assert_eq!(&state, &before);
        }
    }

    /// An accepted follow-up attack always matches a rank that was already
    /// on the table before the call.
    #[test]
    fn prop_follow_up_attacks_match_a_rank_in_play(
        players in test_gens::player_count(),
        seed in any::<u64>(),
        warmup in 1usize..60,
    ) {
        let mut state = test_state_helpers::seeded_game(players, seed);
        let mut rng = ChaCha20Rng::seed_from_u64(seed ^ 0x27d4_eb2f);
        for _ in 0..warmup {
            if !test_state_helpers::playout_step(&mut state, &mut rng) {
                break;
            }
        }
        if state.phase.is_finished() || state.table.is_empty() {
            return Ok(());
        }

        let ranks_in_play: Vec<Rank> = state
            .table
            .attacking()
            .iter()
            .chain(state.table.defending().iter())
            .map(|c| c.rank)
            .collect();
        let attacker = state.current_turn.clone();
        let hand = state.players[&attacker].hand.clone();

        for card in hand {
            let mut attempt = state.clone();
            if rounds::attack_card(&mut attempt, &attacker, card).is_ok() {
                prop_assert!(ranks_in_play.contains(&card.rank));
            }
        }
    }
}
