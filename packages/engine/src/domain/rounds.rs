//! Round state machine: attacking, defending, pickup, passing, and
//! end-of-round resolution.
//!
//! Every entry point validates fully before its first mutation, so an `Err`
//! always leaves the game state byte-for-byte unchanged.

use tracing::{debug, info};

use super::cards_types::Card;
use super::dealing::refill_hands;
use super::rules::{can_add_card, can_defend, has_card, is_valid_card_to_add};
use super::state::{GameState, Phase, PlayerId, MAX_TABLE_ATTACKS};
use super::turn_order::TurnOrder;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of closing a round, describing which branch was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundClose {
    /// Whether every attack position was answered (successful defense).
    pub defended: bool,
    /// Whether closing the round finished the game.
    pub game_finished: bool,
}

/// Add a card to the attack pile.
pub fn attack_card(state: &mut GameState, player_id: &str, card: Card) -> Result<(), DomainError> {
    state.ensure_active()?;
    let player = state.player(player_id)?;

    if player_id != state.current_turn && !player.is_attacker {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Not an eligible attacker",
        ));
    }
    if player.has_picked_up_cards {
        return Err(DomainError::validation(
            ValidationKind::AlreadyPickedUp,
            "Player forfeited this round by picking up",
        ));
    }
    if !has_card(&player.hand, card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    }
    if !can_add_card(state) {
        let kind = if state.table.attack_count() >= MAX_TABLE_ATTACKS {
            ValidationKind::AttackLimitReached
        } else {
            ValidationKind::DefenderOutOfCards
        };
        return Err(DomainError::validation(kind, "Table cannot take another attack"));
    }
    if !is_valid_card_to_add(state, card, player_id) {
        let kind = if state.table.is_empty() {
            ValidationKind::TrumpOpeningRestricted
        } else {
            ValidationKind::RankNotOnTable
        };
        return Err(DomainError::validation(kind, "Card is not a legal attack"));
    }

    let opening = state.table.is_empty();
    remove_from_hand(state, player_id, card)?;
    state.table.push_attack(card);
    state.can_take_cards = true;

    // The first attack of a round opens the pile-on window for everyone
    // except the defender.
    if opening {
        let defender = state.next_defender.clone();
        for player in state.players.values_mut() {
            player.is_attacker = player.id != defender;
        }
    }

    debug!(
        lobby_id = %state.lobby_id,
        player = player_id,
        attacks = state.table.attack_count(),
        "Attack card played"
    );
    Ok(())
}

/// Answer the earliest unanswered attack.
pub fn defend_card(state: &mut GameState, player_id: &str, card: Card) -> Result<(), DomainError> {
    state.ensure_active()?;
    let player = state.player(player_id)?;

    if player_id != state.next_defender {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Only the defender may defend",
        ));
    }
    if !has_card(&player.hand, card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    }
    let Some(&attacking) = state.table.next_unanswered() else {
        return Err(DomainError::validation(
            ValidationKind::NoAttackToAnswer,
            "No unanswered attack on the table",
        ));
    };
    if !can_defend(attacking, card, state.trump) {
        return Err(DomainError::validation(
            ValidationKind::CannotBeatCard,
            "Defense does not beat the attack",
        ));
    }

    remove_from_hand(state, player_id, card)?;
    state.table.push_defense(card);
    if state.table.all_answered() {
        // The free-pickup window closes once the defense catches up.
        state.can_take_cards = false;
    }

    debug!(
        lobby_id = %state.lobby_id,
        player = player_id,
        defenses = state.table.defense_count(),
        "Defense card played"
    );
    Ok(())
}

/// Defender forfeits the round and absorbs the table.
pub fn take_cards(state: &mut GameState, player_id: &str) -> Result<(), DomainError> {
    state.ensure_active()?;
    state.player(player_id)?;

    if !state.can_take_cards || player_id != state.next_defender {
        return Err(DomainError::validation(
            ValidationKind::TakeUnavailable,
            "Take-cards is not available",
        ));
    }

    state.phase = Phase::TakingCards;
    state.round_ended = true;

    let cards = state.table.take_all();
    let taken = cards.len();
    if let Ok(defender) = state.player_mut(player_id) {
        defender.hand.extend(cards);
        defender.has_picked_up_cards = true;
    }
    state.can_take_cards = false;

    // Refill with the pre-rotation pointers: attacker first, defender last.
    refill_hands(state);

    let pre = state.turn_order.clone();
    let former_defender = state.next_defender.clone();

    if check_game_end(state) {
        info!(
            lobby_id = %state.lobby_id,
            player = player_id,
            taken,
            "Round forfeited; game finished"
        );
        return Ok(());
    }

    // Attack passes over the taker: the two players after the former
    // defender become attacker and defender.
    let target = pre.after(&former_defender).cloned();
    match target.and_then(|t| resolve_rotation(&pre, state, &t)) {
        Some((current, defender)) => {
            state.current_turn = current;
            state.next_defender = defender;
        }
        None => {
            state.finish(None);
            return Ok(());
        }
    }

    state.passed_players.clear();
    let current = state.current_turn.clone();
    for player in state.players.values_mut() {
        player.is_attacker = player.id == current;
        // The pickup closed the round, so the forfeit flag is spent.
        player.has_picked_up_cards = false;
    }
    state.phase = Phase::Playing;
    state.round_ended = false;
    state.first_move = false;

    info!(
        lobby_id = %state.lobby_id,
        player = player_id,
        taken,
        next_attacker = %state.current_turn,
        "Round forfeited by pickup"
    );
    Ok(())
}

/// Whether `player_id` may declare a pass right now.
pub fn can_pass(state: &GameState, player_id: &str) -> bool {
    !state.phase.is_finished()
        && player_id == state.current_turn
        && !state.table.is_empty()
        && !state.passed_players.contains(player_id)
}

/// Decline to add further attacks this round.
///
/// Closes the round once every player except the defender has passed;
/// otherwise the turn moves to the next attacker, skipping the defender.
pub fn pass_turn(state: &mut GameState, player_id: &str) -> Result<Option<RoundClose>, DomainError> {
    state.ensure_active()?;
    state.player(player_id)?;

    if !can_pass(state, player_id) {
        return Err(DomainError::validation(
            ValidationKind::PassUnavailable,
            "Pass is not available",
        ));
    }

    state.passed_players.insert(player_id.to_string());
    debug!(lobby_id = %state.lobby_id, player = player_id, "Player passed");

    let everyone_passed = state
        .turn_order
        .iter()
        .filter(|id| **id != state.next_defender)
        .all(|id| state.passed_players.contains(id));

    if everyone_passed {
        return end_turn(state).map(Some);
    }

    match state
        .turn_order
        .after_skipping(&state.current_turn, &state.next_defender)
        .cloned()
    {
        Some(next) => state.current_turn = next,
        None => state.finish(None),
    }
    Ok(None)
}

/// Close the current round: game-end check, refill, table clear, rotation.
pub fn end_turn(state: &mut GameState) -> Result<RoundClose, DomainError> {
    state.ensure_active()?;
    if state.table.is_empty() && !state.round_ended {
        return Err(DomainError::validation(
            ValidationKind::RoundNotStarted,
            "No round activity to close",
        ));
    }

    let defended =
        !state.table.is_empty() && state.table.all_answered() && !state.round_ended;
    let old_current = state.current_turn.clone();
    let old_defender = state.next_defender.clone();
    let pre = state.turn_order.clone();

    if check_game_end(state) {
        return Ok(RoundClose {
            defended,
            game_finished: true,
        });
    }

    for player in state.players.values_mut() {
        player.has_picked_up_cards = false;
    }

    // Refill with the pre-rotation pointers: attacker first, defender last.
    refill_hands(state);

    let cleared = state.table.take_all();
    state.discard.extend(cleared);
    state.passed_players.clear();

    // The refill may have drained the deck; players it left empty-handed
    // are out now, or the rotation below could hand the attack to someone
    // with no cards.
    if check_game_end(state) {
        return Ok(RoundClose {
            defended,
            game_finished: true,
        });
    }

    // Successful defense earns the attack; a pickup skips the round past
    // the failed attacker.
    let target = if defended {
        Some(old_defender)
    } else {
        pre.after_n(&old_current, 2).cloned()
    };
    match target.and_then(|t| resolve_rotation(&pre, state, &t)) {
        Some((current, defender)) => {
            state.current_turn = current;
            state.next_defender = defender;
        }
        None => {
            state.finish(None);
            return Ok(RoundClose {
                defended,
                game_finished: true,
            });
        }
    }

    let current = state.current_turn.clone();
    for player in state.players.values_mut() {
        player.is_attacker = player.id == current;
    }
    state.can_take_cards = false;
    state.round_ended = false;
    state.first_move = false;

    info!(
        lobby_id = %state.lobby_id,
        defended,
        next_attacker = %state.current_turn,
        next_defender = %state.next_defender,
        "Round closed"
    );
    Ok(RoundClose {
        defended,
        game_finished: false,
    })
}

/// Evaluate win/elimination conditions once the deck is empty.
///
/// Empty-handed players leave the rotation (they have exited the game).
/// When exactly one player with cards remains they are the loser and the
/// player after them in the pre-removal rotation is recorded as the winner;
/// an emptied rotation finishes the game with no winner.
pub fn check_game_end(state: &mut GameState) -> bool {
    if !state.deck.is_empty() {
        return false;
    }

    let pre: Vec<PlayerId> = state.turn_order.iter().cloned().collect();
    let exiting: Vec<PlayerId> = pre
        .iter()
        .filter(|id| {
            state
                .players
                .get(id.as_str())
                .is_some_and(|p| p.hand.is_empty())
        })
        .cloned()
        .collect();

    for id in &exiting {
        state.turn_order.remove(id);
        state.players.remove(id);
        state.passed_players.remove(id);
        info!(lobby_id = %state.lobby_id, player = %id, "Player exited with an empty hand");
    }

    match state.turn_order.len() {
        0 => {
            state.finish(None);
            info!(lobby_id = %state.lobby_id, "Game finished with no loser");
            true
        }
        1 => {
            let loser = state.turn_order.first().cloned();
            let winner = loser.as_ref().and_then(|l| {
                let pos = pre.iter().position(|id| id == l)?;
                Some(pre[(pos + 1) % pre.len()].clone())
            });
            info!(
                lobby_id = %state.lobby_id,
                loser = loser.as_deref().unwrap_or("?"),
                winner = winner.as_deref().unwrap_or("?"),
                "Game finished"
            );
            state.finish(winner);
            true
        }
        _ => false,
    }
}

/// Boundary dispatch: one call per move intent.
pub fn make_move(
    state: &mut GameState,
    player_id: &str,
    card: Card,
    is_defending: bool,
) -> Result<(), DomainError> {
    if is_defending {
        defend_card(state, player_id, card)
    } else {
        attack_card(state, player_id, card)
    }
}

/// Map a rotation target computed on the pre-elimination ring onto the
/// active ring: the first still-active player at or after `target`, and the
/// next active player after them.
fn resolve_rotation(
    pre: &TurnOrder,
    state: &GameState,
    target: &str,
) -> Option<(PlayerId, PlayerId)> {
    let mut current = None;
    for i in 0..pre.len() {
        let id = pre.after_n(target, i)?;
        if state.turn_order.contains(id) {
            current = Some(id.clone());
            break;
        }
    }
    let current = current?;

    for j in 1..=pre.len() {
        let id = pre.after_n(&current, j)?;
        if *id != current && state.turn_order.contains(id) {
            return Some((current, id.clone()));
        }
    }
    None
}

fn remove_from_hand(state: &mut GameState, player_id: &str, card: Card) -> Result<(), DomainError> {
    let player = state.player_mut(player_id)?;
    let pos = player.hand.iter().position(|&c| c == card).ok_or_else(|| {
        DomainError::validation(ValidationKind::CardNotInHand, "Card not in hand")
    })?;
    player.hand.remove(pos);
    Ok(())
}
