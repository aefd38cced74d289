//! Property tests for defense legality.

use proptest::prelude::*;

use super::rules::can_defend;
use super::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// canDefend(A, D, T) holds iff D is a trump against a non-trump, or
    /// D follows A's suit with a strictly higher value.
    #[test]
    fn prop_defense_legality_iff(
        (attack, defense, trump) in test_gens::three_distinct_cards()
    ) {
        let expected = (defense.suit == trump.suit && attack.suit != trump.suit)
            || (defense.suit == attack.suit && defense.value() > attack.value());
        prop_assert_eq!(can_defend(attack, defense, trump), expected);
    }

    /// A card never beats itself, trump or not.
    #[test]
    fn prop_card_never_beats_itself(
        card in test_gens::card(),
        trump in test_gens::card(),
    ) {
        prop_assert!(!can_defend(card, card, trump));
    }

    /// Beating is antisymmetric under a fixed trump: if D beats A then A
    /// does not beat D.
    #[test]
    fn prop_beats_is_antisymmetric(
        (attack, defense, trump) in test_gens::three_distinct_cards()
    ) {
        if can_defend(attack, defense, trump) {
            prop_assert!(!can_defend(defense, attack, trump));
        }
    }
}
