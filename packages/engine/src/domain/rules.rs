//! Pure move-legality predicates. No state mutation happens here.

use super::cards_types::Card;
use super::state::{GameState, MAX_TABLE_ATTACKS};

/// Membership test by (suit, rank).
pub fn has_card(hand: &[Card], card: Card) -> bool {
    hand.contains(&card)
}

/// Whether the table can accept another attack card at all.
///
/// The attack pile is capped at six, and the defender must keep strictly
/// more cards in hand than there are attack positions, so every position
/// can still be answered.
pub fn can_add_card(state: &GameState) -> bool {
    if state.table.attack_count() >= MAX_TABLE_ATTACKS {
        return false;
    }
    let Ok(defender) = state.player(&state.next_defender) else {
        return false;
    };
    defender.hand.len() > state.table.attack_count()
}

/// Whether `card` is a legal attack for `player_id` given the table.
///
/// Opening attack: any card, except that opening with a trump is forbidden
/// while the attacker still holds a non-trump alternative. Follow-up
/// attacks: the card's rank must already appear somewhere on the table.
pub fn is_valid_card_to_add(state: &GameState, card: Card, player_id: &str) -> bool {
    if state.table.is_empty() {
        let Ok(player) = state.player(player_id) else {
            return false;
        };
        let has_non_trump = player.hand.iter().any(|c| c.suit != state.trump.suit);
        !(has_non_trump && card.suit == state.trump.suit)
    } else {
        state.table.rank_on_table(card.rank)
    }
}

/// Whether `defending` beats `attacking` given the trump card.
///
/// A trump beats any non-trump; otherwise the defense must match suit
/// (trump against trump included) and carry a strictly higher value.
pub fn can_defend(attacking: Card, defending: Card, trump: Card) -> bool {
    if defending.suit == trump.suit && attacking.suit != trump.suit {
        return true;
    }
    defending.suit == attacking.suit && defending.value() > attacking.value()
}
