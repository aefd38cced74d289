//! Game state container and its invariants.

use std::collections::{HashMap, HashSet};

use super::cards_types::Card;
use super::turn_order::TurnOrder;
use crate::errors::domain::{DomainError, ValidationKind};

pub type PlayerId = String;

/// Cards dealt to (and refilled up to) each hand.
pub const HAND_SIZE: usize = 6;
/// Maximum attack cards on the table in one round.
pub const MAX_TABLE_ATTACKS: usize = 6;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const DECK_SIZE: usize = 36;

/// Display info supplied by the lobby at game start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
}

/// Per-player state, owned exclusively by [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    /// Hand contents; order carries no meaning.
    pub hand: Vec<Card>,
    /// Whether this player may currently add attack cards.
    pub is_attacker: bool,
    /// Whether this player forfeited the current round by picking up.
    pub has_picked_up_cards: bool,
}

/// Overall game progression.
///
/// The winner exists only once the game is finished, so it lives inside the
/// `Finished` variant rather than as a free-floating optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Rounds in progress; `current_turn` and `next_defender` are live.
    Playing,
    /// Defender is absorbing the table; round bookkeeping in flight.
    TakingCards,
    /// No further mutation permitted. `winner: None` means the game ended
    /// without a winner (everyone exited simultaneously or all disconnected).
    Finished { winner: Option<PlayerId> },
}

impl Phase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished { .. })
    }
}

/// The attack and defense piles, position-aligned: `defending[i]` beats
/// `attacking[i]`, and a missing index in `defending` is an unanswered
/// attack. A defense always answers the earliest unanswered position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    attacking: Vec<Card>,
    defending: Vec<Card>,
}

impl Table {
    pub fn attacking(&self) -> &[Card] {
        &self.attacking
    }

    pub fn defending(&self) -> &[Card] {
        &self.defending
    }

    pub fn attack_count(&self) -> usize {
        self.attacking.len()
    }

    pub fn defense_count(&self) -> usize {
        self.defending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacking.is_empty()
    }

    /// Whether every attack position has a matching defense.
    pub fn all_answered(&self) -> bool {
        self.defending.len() == self.attacking.len()
    }

    /// The attack card the next defense has to beat.
    pub fn next_unanswered(&self) -> Option<&Card> {
        self.attacking.get(self.defending.len())
    }

    /// Whether `rank` already appears in either pile.
    pub fn rank_on_table(&self, rank: super::cards_types::Rank) -> bool {
        self.attacking
            .iter()
            .chain(self.defending.iter())
            .any(|c| c.rank == rank)
    }

    pub fn push_attack(&mut self, card: Card) {
        debug_assert!(self.attacking.len() < MAX_TABLE_ATTACKS);
        self.attacking.push(card);
    }

    pub fn push_defense(&mut self, card: Card) {
        debug_assert!(self.defending.len() < self.attacking.len());
        self.defending.push(card);
    }

    /// Empty both piles, returning every card that was on the table.
    pub fn take_all(&mut self) -> Vec<Card> {
        let mut cards = std::mem::take(&mut self.attacking);
        cards.append(&mut self.defending);
        cards
    }
}

/// Entire game container, sufficient for every engine operation.
///
/// Owned by the transport layer; mutated only through engine entry points,
/// one intent at a time per game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub lobby_id: String,
    /// Draw pile; cards are drawn from the end.
    pub deck: Vec<Card>,
    /// Fixed for the whole game; its suit is the trump suit.
    pub trump: Card,
    pub players: HashMap<PlayerId, PlayerState>,
    pub table: Table,
    /// Beaten cards from defended rounds; they never re-enter play.
    pub discard: Vec<Card>,
    /// Rotation of active player ids.
    pub turn_order: TurnOrder,
    /// Player expected to open or continue the attack.
    pub current_turn: PlayerId,
    /// The single player obligated to answer this round's attacks.
    pub next_defender: PlayerId,
    pub phase: Phase,
    /// Attackers who declined to add more cards this round.
    pub passed_players: HashSet<PlayerId>,
    /// Whether the defender currently has the option to pick up the table.
    pub can_take_cards: bool,
    /// Whether the current round was already resolved by a pickup.
    pub round_ended: bool,
    /// Whether no round has completed yet.
    pub first_move: bool,
}

impl GameState {
    /// Reject any mutation once the game is finished.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.phase.is_finished() {
            return Err(DomainError::validation(
                ValidationKind::GameFinished,
                "Game is finished",
            ));
        }
        Ok(())
    }

    pub fn player(&self, id: &str) -> Result<&PlayerState, DomainError> {
        self.players
            .get(id)
            .ok_or_else(|| DomainError::validation(ValidationKind::UnknownPlayer, format!("Unknown player: {id}")))
    }

    pub fn player_mut(&mut self, id: &str) -> Result<&mut PlayerState, DomainError> {
        self.players
            .get_mut(id)
            .ok_or_else(|| DomainError::validation(ValidationKind::UnknownPlayer, format!("Unknown player: {id}")))
    }

    /// Winner id once the game is finished.
    pub fn winner(&self) -> Option<&PlayerId> {
        match &self.phase {
            Phase::Finished { winner } => winner.as_ref(),
            _ => None,
        }
    }

    /// Finish the game immediately. Used by round resolution and as the
    /// structural guard when the rotation empties underneath us.
    pub fn finish(&mut self, winner: Option<PlayerId>) {
        self.phase = Phase::Finished { winner };
        self.can_take_cards = false;
    }
}
