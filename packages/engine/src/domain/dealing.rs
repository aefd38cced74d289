//! Deck construction, shuffling, game initialization, and hand refills.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use super::cards_types::{Card, Rank, Suit};
use super::state::{
    GameState, Phase, PlayerId, PlayerInfo, PlayerState, Table, DECK_SIZE, HAND_SIZE, MAX_PLAYERS,
    MIN_PLAYERS,
};
use super::turn_order::TurnOrder;
use crate::errors::domain::{DomainError, ValidationKind};

/// All 36 (suit, rank) combinations in a fixed order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Start a game with the process RNG.
pub fn initialize_game(
    player_ids: &[PlayerId],
    lobby_id: &str,
    player_infos: &[PlayerInfo],
) -> Result<GameState, DomainError> {
    initialize_game_with_rng(player_ids, lobby_id, player_infos, &mut rand::rng())
}

/// Start a game with a caller-supplied RNG (deterministic in tests).
///
/// Shuffles the deck (Fisher-Yates via `SliceRandom`), designates the bottom
/// card as trump, deals [`HAND_SIZE`] cards to each player from the top, and
/// picks the first attacker: the holder of the lowest-value trump card, ties
/// broken by `player_ids` order, falling back to the first id when nobody
/// was dealt a trump.
///
/// The trump card stays at the bottom of the draw pile and is drawn last, so
/// the full 36-card multiset is always accounted for across deck, hands,
/// table, and discard.
pub fn initialize_game_with_rng<R: Rng + ?Sized>(
    player_ids: &[PlayerId],
    lobby_id: &str,
    player_infos: &[PlayerInfo],
    rng: &mut R,
) -> Result<GameState, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_ids.len()) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!(
                "Player count must be {MIN_PLAYERS}..={MAX_PLAYERS}, got {}",
                player_ids.len()
            ),
        ));
    }

    let unique: HashSet<&PlayerId> = player_ids.iter().collect();
    if unique.len() != player_ids.len() {
        return Err(DomainError::validation(
            ValidationKind::DuplicatePlayerId,
            "Player ids must be unique",
        ));
    }

    let names: HashMap<&str, &str> = player_infos
        .iter()
        .map(|info| (info.id.as_str(), info.name.as_str()))
        .collect();
    if let Some(missing) = player_ids.iter().find(|id| !names.contains_key(id.as_str())) {
        return Err(DomainError::validation(
            ValidationKind::PlayerInfoMismatch,
            format!("No display info for player: {missing}"),
        ));
    }

    let mut deck = full_deck();
    deck.shuffle(rng);

    // Bottom card of the draw pile is the trump; it is drawn last.
    let trump = deck[0];

    let mut players: HashMap<PlayerId, PlayerState> = HashMap::with_capacity(player_ids.len());
    for id in player_ids {
        let mut hand = Vec::with_capacity(HAND_SIZE);
        for _ in 0..HAND_SIZE {
            if let Some(card) = deck.pop() {
                hand.push(card);
            }
        }
        players.insert(
            id.clone(),
            PlayerState {
                id: id.clone(),
                name: names[id.as_str()].to_string(),
                hand,
                is_attacker: false,
                has_picked_up_cards: false,
            },
        );
    }

    let first_attacker = lowest_trump_holder(player_ids, &players, trump.suit)
        .unwrap_or_else(|| player_ids[0].clone());

    let turn_order = TurnOrder::rotated(player_ids, &first_attacker);
    let next_defender = turn_order
        .after(&first_attacker)
        .cloned()
        .ok_or_else(|| {
            DomainError::validation(ValidationKind::EmptyRotation, "Rotation lost its players")
        })?;

    if let Some(attacker) = players.get_mut(&first_attacker) {
        attacker.is_attacker = true;
    }

    info!(
        lobby_id,
        players = player_ids.len(),
        trump = %format!("{}{}", trump.rank.as_str(), trump.suit.as_str()),
        first_attacker = %first_attacker,
        "Game initialized"
    );

    Ok(GameState {
        lobby_id: lobby_id.to_string(),
        deck,
        trump,
        players,
        table: Table::default(),
        discard: Vec::new(),
        turn_order,
        current_turn: first_attacker,
        next_defender,
        phase: Phase::Playing,
        passed_players: HashSet::new(),
        can_take_cards: false,
        round_ended: false,
        first_move: true,
    })
}

/// Holder of the lowest-value trump card, ties broken by `player_ids` order.
fn lowest_trump_holder(
    player_ids: &[PlayerId],
    players: &HashMap<PlayerId, PlayerState>,
    trump_suit: Suit,
) -> Option<PlayerId> {
    let mut best: Option<(u8, &PlayerId)> = None;
    for id in player_ids {
        let Some(player) = players.get(id) else {
            continue;
        };
        let lowest = player
            .hand
            .iter()
            .filter(|c| c.suit == trump_suit)
            .map(|c| c.value())
            .min();
        if let Some(value) = lowest {
            // Strictly-less keeps the earlier id on ties.
            if best.map_or(true, |(bv, _)| value < bv) {
                best = Some((value, id));
            }
        }
    }
    best.map(|(_, id)| id.clone())
}

/// Refill every hand up to [`HAND_SIZE`] at the end of a round.
///
/// Draw order: the current attacker first, then around the rotation, with
/// the current defender always drawing last so the attacker can immediately
/// decide their next attack.
pub fn refill_hands(state: &mut GameState) {
    let mut order: Vec<PlayerId> = Vec::with_capacity(state.turn_order.len());
    if state.turn_order.contains(&state.current_turn) {
        order.push(state.current_turn.clone());
        let mut rest = state.turn_order.cycle_from(&state.current_turn);
        rest.pop(); // the cycle ends back at the attacker
        order.extend(rest);
    } else {
        order.extend(state.turn_order.iter().cloned());
    }

    // Defender draws last regardless of ring position.
    if let Some(pos) = order.iter().position(|id| *id == state.next_defender) {
        let defender = order.remove(pos);
        order.push(defender);
    }

    for id in order {
        let Some(player) = state.players.get_mut(&id) else {
            continue;
        };
        while player.hand.len() < HAND_SIZE {
            match state.deck.pop() {
                Some(card) => player.hand.push(card),
                None => break,
            }
        }
    }
}
