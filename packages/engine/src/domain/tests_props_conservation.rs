//! Random full playouts: card conservation and structural invariants.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::cards_types::Card;
use super::dealing::full_deck;
use super::{test_gens, test_prelude, test_state_helpers};

fn sorted_full_deck() -> Vec<Card> {
    let mut deck = full_deck();
    deck.sort();
    deck
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Without disconnects, every reachable state accounts for all 36 cards
    /// across deck, hands, table, and discard.
    #[test]
    fn prop_playout_conserves_all_36_cards(
        players in test_gens::player_count(),
        seed in any::<u64>(),
    ) {
        let full = sorted_full_deck();
        let mut state = test_state_helpers::seeded_game(players, seed);
        let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_mul(0x9e37_79b9));

        let mut steps = 0;
        loop {
            prop_assert_eq!(&test_state_helpers::circulating_cards(&state), &full);
            test_state_helpers::assert_structural_invariants(&state);
            if !test_state_helpers::playout_step(&mut state, &mut rng) {
                break;
            }
            steps += 1;
            prop_assert!(steps < 5_000, "playout did not terminate");
        }
        prop_assert!(state.phase.is_finished(), "playout stalled before a finish");
    }

    /// Every game ends, and a recorded winner is always one of the original
    /// players.
    #[test]
    fn prop_every_playout_terminates_with_a_consistent_winner(
        players in test_gens::player_count(),
        seed in any::<u64>(),
    ) {
        let mut state = test_state_helpers::seeded_game(players, seed);
        let mut rng = ChaCha20Rng::seed_from_u64(seed ^ 0x5bd1_e995);
        test_state_helpers::play_until_finished(&mut state, &mut rng);

        if let Some(winner) = state.winner() {
            let original: Vec<String> = (0..players).map(|i| format!("p{i}")).collect();
            prop_assert!(original.contains(winner));
        }
    }
}
