//! Per-player redacted projection of the game state.
//!
//! This is the sole privacy boundary: every externally observable state push
//! goes through [`player_view`], and nothing here exposes another player's
//! hand or the draw pile's contents.

use serde::Serialize;

use super::cards_types::Card;
use super::state::{GameState, Phase, PlayerId};
use crate::errors::domain::DomainError;

/// What a player sees of themselves: the full hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfView {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub is_attacker: bool,
    pub has_picked_up_cards: bool,
}

/// What a player sees of an opponent: counts and flags, never cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentPublic {
    pub id: PlayerId,
    pub name: String,
    pub card_count: usize,
    pub is_attacker: bool,
}

/// Redacted per-player snapshot pushed to clients after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub lobby_id: String,
    pub trump: Card,
    /// Remaining draw pile size; contents stay hidden.
    pub deck_count: usize,
    pub discard_count: usize,
    pub attacking: Vec<Card>,
    pub defending: Vec<Card>,
    pub current_turn: PlayerId,
    pub next_defender: PlayerId,
    pub status: ViewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
    pub can_take_cards: bool,
    pub first_move: bool,
    pub me: SelfView,
    /// Opponents in rotation order.
    pub others: Vec<OpponentPublic>,
}

/// Wire form of [`Phase`], without the winner payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Playing,
    TakingCards,
    Finished,
}

impl From<&Phase> for ViewStatus {
    fn from(phase: &Phase) -> Self {
        match phase {
            Phase::Playing => Self::Playing,
            Phase::TakingCards => Self::TakingCards,
            Phase::Finished { .. } => Self::Finished,
        }
    }
}

/// Project the state as seen by `player_id`.
pub fn player_view(state: &GameState, player_id: &str) -> Result<PlayerView, DomainError> {
    let me = state.player(player_id)?;

    let others = state
        .turn_order
        .iter()
        .filter(|id| *id != player_id)
        .filter_map(|id| state.players.get(id))
        .map(|p| OpponentPublic {
            id: p.id.clone(),
            name: p.name.clone(),
            card_count: p.hand.len(),
            is_attacker: p.is_attacker,
        })
        .collect();

    Ok(PlayerView {
        lobby_id: state.lobby_id.clone(),
        trump: state.trump,
        deck_count: state.deck.len(),
        discard_count: state.discard.len(),
        attacking: state.table.attacking().to_vec(),
        defending: state.table.defending().to_vec(),
        current_turn: state.current_turn.clone(),
        next_defender: state.next_defender.clone(),
        status: ViewStatus::from(&state.phase),
        winner: state.winner().cloned(),
        can_take_cards: state.can_take_cards,
        first_move: state.first_move,
        me: SelfView {
            id: me.id.clone(),
            name: me.name.clone(),
            hand: me.hand.clone(),
            is_attacker: me.is_attacker,
            has_picked_up_cards: me.has_picked_up_cards,
        },
        others,
    })
}
