//! Test-only builders and playout drivers for game states.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use std::collections::{HashMap, HashSet};

use super::cards_parsing::try_parse_cards;
use super::cards_types::Card;
use super::dealing::initialize_game_with_rng;
use super::rounds;
use super::rules::{can_add_card, can_defend, is_valid_card_to_add};
use super::state::{GameState, Phase, PlayerId, PlayerInfo, PlayerState, Table};
use super::turn_order::TurnOrder;

/// Deterministic game with players `p0..p{n-1}`.
pub fn seeded_game(player_count: usize, seed: u64) -> GameState {
    let ids: Vec<PlayerId> = (0..player_count).map(|i| format!("p{i}")).collect();
    let infos: Vec<PlayerInfo> = ids
        .iter()
        .map(|id| PlayerInfo {
            id: id.clone(),
            name: format!("name-{id}"),
        })
        .collect();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    initialize_game_with_rng(&ids, "test-lobby", &infos, &mut rng)
        .expect("test setup uses valid player lists")
}

/// Hand-crafted state from card tokens: hands in rotation order, a draw
/// pile, a trump, and the opening attacker. The defender is the next player
/// in rotation.
pub fn build_state(
    hands: &[(&str, &[&str])],
    deck: &[&str],
    trump: &str,
    attacker: &str,
) -> GameState {
    let ids: Vec<PlayerId> = hands.iter().map(|(id, _)| id.to_string()).collect();
    let mut players: HashMap<PlayerId, PlayerState> = HashMap::new();
    for (id, tokens) in hands {
        players.insert(
            id.to_string(),
            PlayerState {
                id: id.to_string(),
                name: id.to_string(),
                hand: try_parse_cards(tokens.iter().copied()).expect("test tokens are valid"),
                is_attacker: false,
                has_picked_up_cards: false,
            },
        );
    }
    let turn_order = TurnOrder::rotated(&ids, attacker);
    let next_defender = turn_order
        .after(attacker)
        .expect("at least two players")
        .clone();
    let mut state = GameState {
        lobby_id: "test-lobby".to_string(),
        deck: try_parse_cards(deck.iter().copied()).expect("test tokens are valid"),
        trump: trump.parse().expect("test tokens are valid"),
        players,
        table: Table::default(),
        discard: Vec::new(),
        turn_order,
        current_turn: attacker.to_string(),
        next_defender,
        phase: Phase::Playing,
        passed_players: HashSet::new(),
        can_take_cards: false,
        round_ended: false,
        first_move: true,
    };
    state
        .players
        .get_mut(attacker)
        .expect("attacker is a player")
        .is_attacker = true;
    state
}

/// Every card still in the system, sorted: deck, hands, table, discard.
pub fn circulating_cards(state: &GameState) -> Vec<Card> {
    let mut all: Vec<Card> = state.deck.clone();
    for player in state.players.values() {
        all.extend(player.hand.iter().copied());
    }
    all.extend(state.table.attacking().iter().copied());
    all.extend(state.table.defending().iter().copied());
    all.extend(state.discard.iter().copied());
    all.sort();
    all
}

/// Structural invariants that must hold after every successful operation.
pub fn assert_structural_invariants(state: &GameState) {
    assert!(state.table.defense_count() <= state.table.attack_count());
    assert!(state.table.attack_count() <= super::state::MAX_TABLE_ATTACKS);
    assert_eq!(state.turn_order.len(), state.players.len());
    if matches!(state.phase, Phase::Playing) {
        assert!(state.turn_order.contains(&state.current_turn));
        assert!(state.turn_order.contains(&state.next_defender));
        assert_ne!(state.current_turn, state.next_defender);
    }
}

/// First legal attack card for `player_id`, in hand order.
pub fn legal_attack(state: &GameState, player_id: &str) -> Option<Card> {
    let player = state.players.get(player_id)?;
    player
        .hand
        .iter()
        .copied()
        .find(|c| is_valid_card_to_add(state, *c, player_id))
}

/// Lowest-value card the defender can answer the next attack with.
pub fn cheapest_defense(state: &GameState) -> Option<Card> {
    let attacking = *state.table.next_unanswered()?;
    let defender = state.players.get(&state.next_defender)?;
    defender
        .hand
        .iter()
        .copied()
        .filter(|d| can_defend(attacking, *d, state.trump))
        .min_by_key(|d| (d.suit == state.trump.suit, d.value()))
}

/// Advance the game by one legal action. Returns false once no further
/// progress is possible (the game finished).
pub fn playout_step<R: Rng>(state: &mut GameState, rng: &mut R) -> bool {
    if state.phase.is_finished() {
        return false;
    }

    if state.table.is_empty() {
        let attacker = state.current_turn.clone();
        let Some(card) = legal_attack(state, &attacker) else {
            return false;
        };
        return rounds::attack_card(state, &attacker, card).is_ok();
    }

    if !state.table.all_answered() {
        let defender = state.next_defender.clone();
        return match cheapest_defense(state) {
            Some(card) => rounds::defend_card(state, &defender, card).is_ok(),
            None => rounds::take_cards(state, &defender).is_ok(),
        };
    }

    // Defense has caught up: the turn holder piles on or passes.
    let attacker = state.current_turn.clone();
    if can_add_card(state) && rng.random_bool(0.5) {
        if let Some(card) = legal_attack(state, &attacker) {
            return rounds::attack_card(state, &attacker, card).is_ok();
        }
    }
    rounds::pass_turn(state, &attacker).is_ok()
}

/// Play random legal moves until the game finishes, checking invariants at
/// every step. Returns the number of actions taken.
pub fn play_until_finished(state: &mut GameState, rng: &mut ChaCha20Rng) -> usize {
    let mut steps = 0;
    while playout_step(state, rng) {
        assert_structural_invariants(state);
        steps += 1;
        assert!(steps < 5_000, "playout did not terminate");
    }
    assert!(state.phase.is_finished(), "playout stalled before a finish");
    steps
}
