//! In-process registry of running games.
//!
//! One entry per lobby. Each game sits behind its own mutex, so exactly one
//! intent per game is in flight at a time while independent games proceed in
//! parallel.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::domain::state::GameState;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Shared game registry handed to every transport connection.
#[derive(Default)]
pub struct GameStore {
    games: DashMap<String, Mutex<GameState>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly initialized game under its lobby id.
    pub fn create(&self, state: GameState) -> Result<(), DomainError> {
        let lobby_id = state.lobby_id.clone();
        match self.games.entry(lobby_id.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::LobbyTaken,
                format!("Game already running for lobby: {lobby_id}"),
            )),
            Entry::Vacant(slot) => {
                slot.insert(Mutex::new(state));
                info!(lobby_id = %lobby_id, "Game registered");
                Ok(())
            }
        }
    }

    /// Run `f` under the game's lock. The closure gets exclusive mutable
    /// access, so a read-modify-write (apply intent, then project views)
    /// is atomic with respect to other intents for the same lobby.
    pub fn with_game<T>(
        &self,
        lobby_id: &str,
        f: impl FnOnce(&mut GameState) -> T,
    ) -> Result<T, DomainError> {
        let game = self.games.get(lobby_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("No game for lobby: {lobby_id}"))
        })?;
        let mut state = game.lock();
        Ok(f(&mut state))
    }

    pub fn contains(&self, lobby_id: &str) -> bool {
        self.games.contains_key(lobby_id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Drop a game unconditionally. Returns whether it existed.
    pub fn remove(&self, lobby_id: &str) -> bool {
        let removed = self.games.remove(lobby_id).is_some();
        if removed {
            info!(lobby_id, "Game removed");
        }
        removed
    }

    /// Drop a game only once it has finished. Returns whether it was dropped.
    pub fn remove_if_finished(&self, lobby_id: &str) -> bool {
        let removed = self
            .games
            .remove_if(lobby_id, |_, game| game.lock().phase.is_finished())
            .is_some();
        if removed {
            info!(lobby_id, "Finished game removed");
        }
        removed
    }
}
