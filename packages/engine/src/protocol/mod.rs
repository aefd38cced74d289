//! Closed, versioned intent schema for the transport boundary.
//!
//! Transports deserialize exactly one [`ClientIntent`] per inbound message
//! and hand it to [`apply_intent`], which dispatches to exactly one engine
//! entry point. Unknown intent types fail deserialization; they never reach
//! the engine.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::disconnect::remove_player;
use crate::domain::rounds::{attack_card, defend_card, end_turn, pass_turn, take_cards};
use crate::domain::state::GameState;
use crate::errors::domain::DomainError;

/// Bump on any incompatible change to the intent schema.
pub const PROTOCOL_VERSION: u32 = 1;

/// Every move a client can ask for. The schema is closed: adding a variant
/// is a protocol version bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientIntent {
    Attack { card: Card },
    Defend { card: Card },
    TakeCards,
    Pass,
    EndTurn,
    Disconnect,
}

/// Apply one intent to the game on behalf of `player_id`.
///
/// `Err` means the intent was rejected and the state is unchanged; the
/// transport decides whether to report the rejection or stay silent.
pub fn apply_intent(
    state: &mut GameState,
    player_id: &str,
    intent: &ClientIntent,
) -> Result<(), DomainError> {
    match intent {
        ClientIntent::Attack { card } => attack_card(state, player_id, *card),
        ClientIntent::Defend { card } => defend_card(state, player_id, *card),
        ClientIntent::TakeCards => take_cards(state, player_id),
        ClientIntent::Pass => pass_turn(state, player_id).map(|_| ()),
        ClientIntent::EndTurn => end_turn(state).map(|_| ()),
        ClientIntent::Disconnect => remove_player(state, player_id),
    }
}
