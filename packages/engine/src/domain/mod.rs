//! Rules engine for the 36-card trick game.
//!
//! Everything in this module is pure domain logic: no I/O, no transport, no
//! shared registries. The transport layer owns a [`GameState`] (usually via
//! [`crate::store::GameStore`]) and calls exactly one entry point per player
//! intent.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod disconnect;
pub mod player_view;
pub mod rounds;
pub mod rules;
pub mod state;
pub mod turn_order;

#[cfg(test)]
pub(crate) mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;

#[cfg(test)]
mod tests_props_conservation;
#[cfg(test)]
mod tests_props_defense;
#[cfg(test)]
mod tests_props_rejection;

pub use cards_types::{Card, Rank, Suit};
pub use dealing::{full_deck, initialize_game, initialize_game_with_rng, refill_hands};
pub use disconnect::remove_player;
pub use player_view::{player_view, OpponentPublic, PlayerView, SelfView, ViewStatus};
pub use rounds::{
    attack_card, can_pass, check_game_end, defend_card, end_turn, make_move, pass_turn,
    take_cards, RoundClose,
};
pub use rules::{can_add_card, can_defend, has_card, is_valid_card_to_add};
pub use state::{
    GameState, Phase, PlayerId, PlayerInfo, PlayerState, Table, DECK_SIZE, HAND_SIZE,
    MAX_PLAYERS, MAX_TABLE_ATTACKS, MIN_PLAYERS,
};
pub use turn_order::TurnOrder;
