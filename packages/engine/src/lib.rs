//! Rules engine for a 36-card attacker/defender trick game.
//!
//! The crate is transport-agnostic: it exposes pure state transitions over a
//! [`domain::GameState`] plus a per-player redacted projection, a closed
//! intent schema for transports, and an in-process [`store::GameStore`]
//! registry. All illegal actions fail closed with a typed
//! [`errors::DomainError`] and zero state change.

pub mod domain;
pub mod errors;
pub mod protocol;
pub mod store;

pub use domain::{initialize_game, player_view, GameState, PlayerView};
pub use errors::{DomainError, ErrorCode};
pub use protocol::{apply_intent, ClientIntent, PROTOCOL_VERSION};
pub use store::GameStore;
