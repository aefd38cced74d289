//! Removal of a departed player from every rotation structure.

use tracing::info;

use super::state::{GameState, Phase};
use crate::errors::domain::DomainError;

/// Remove `player_id` from the game after a disconnect.
///
/// Turn and defender pointers are advanced past the departing player before
/// the removal so they never dangle. The departing hand leaves the system.
/// Fewer than two remaining players finishes the game; a sole survivor is
/// recorded as the winner. A disconnect after the game finished is a no-op.
pub fn remove_player(state: &mut GameState, player_id: &str) -> Result<(), DomainError> {
    if state.phase.is_finished() {
        return Ok(());
    }
    state.player(player_id)?;

    if state.current_turn == player_id {
        if let Some(next) = state.turn_order.after(player_id).cloned() {
            state.current_turn = next;
        }
    }
    if state.next_defender == player_id {
        if let Some(next) = state.turn_order.after(player_id).cloned() {
            state.next_defender = next;
        }
    }

    state.turn_order.remove(player_id);
    state.players.remove(player_id);
    state.passed_players.remove(player_id);

    match state.turn_order.len() {
        0 => state.finish(None),
        1 => {
            let winner = state.turn_order.first().cloned();
            state.finish(winner);
        }
        _ => {
            // Pointer advancement above can land both on the same player
            // when the defender departs right before the old attacker.
            if state.current_turn == state.next_defender {
                match state.turn_order.after(&state.current_turn).cloned() {
                    Some(next) => state.next_defender = next,
                    None => state.finish(None),
                }
            }
        }
    }

    info!(
        lobby_id = %state.lobby_id,
        player = player_id,
        remaining = state.turn_order.len(),
        finished = matches!(state.phase, Phase::Finished { .. }),
        "Player removed after disconnect"
    );
    Ok(())
}
