//! Stable error codes for the transport boundary.
//!
//! The engine itself rejects moves with [`DomainError`]; a transport layer
//! that wants to report the rejection over the wire maps it to one of these
//! codes. Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

use super::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

/// Centralized error codes exposed at the engine boundary.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Move rejections
    UnknownPlayer,
    OutOfTurn,
    CardNotInHand,
    AttackLimitReached,
    DefenderOutOfCards,
    RankNotOnTable,
    TrumpOpeningRestricted,
    NoAttackToAnswer,
    CannotBeatCard,
    TakeUnavailable,
    PassUnavailable,
    AlreadyPickedUp,
    GameFinished,
    RoundNotStarted,

    // Setup / parse failures
    InvalidPlayerCount,
    DuplicatePlayerId,
    PlayerInfoMismatch,
    EmptyRotation,
    ParseCard,

    // Store
    GameNotFound,
    PlayerNotFound,
    LobbyTaken,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::AttackLimitReached => "ATTACK_LIMIT_REACHED",
            Self::DefenderOutOfCards => "DEFENDER_OUT_OF_CARDS",
            Self::RankNotOnTable => "RANK_NOT_ON_TABLE",
            Self::TrumpOpeningRestricted => "TRUMP_OPENING_RESTRICTED",
            Self::NoAttackToAnswer => "NO_ATTACK_TO_ANSWER",
            Self::CannotBeatCard => "CANNOT_BEAT_CARD",
            Self::TakeUnavailable => "TAKE_UNAVAILABLE",
            Self::PassUnavailable => "PASS_UNAVAILABLE",
            Self::AlreadyPickedUp => "ALREADY_PICKED_UP",
            Self::GameFinished => "GAME_FINISHED",
            Self::RoundNotStarted => "ROUND_NOT_STARTED",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::DuplicatePlayerId => "DUPLICATE_PLAYER_ID",
            Self::PlayerInfoMismatch => "PLAYER_INFO_MISMATCH",
            Self::EmptyRotation => "EMPTY_ROTATION",
            Self::ParseCard => "PARSE_CARD",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::LobbyTaken => "LOBBY_TAKEN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation { kind, .. } => match kind {
                ValidationKind::UnknownPlayer => Self::UnknownPlayer,
                ValidationKind::OutOfTurn => Self::OutOfTurn,
                ValidationKind::CardNotInHand => Self::CardNotInHand,
                ValidationKind::AttackLimitReached => Self::AttackLimitReached,
                ValidationKind::DefenderOutOfCards => Self::DefenderOutOfCards,
                ValidationKind::RankNotOnTable => Self::RankNotOnTable,
                ValidationKind::TrumpOpeningRestricted => Self::TrumpOpeningRestricted,
                ValidationKind::NoAttackToAnswer => Self::NoAttackToAnswer,
                ValidationKind::CannotBeatCard => Self::CannotBeatCard,
                ValidationKind::TakeUnavailable => Self::TakeUnavailable,
                ValidationKind::PassUnavailable => Self::PassUnavailable,
                ValidationKind::AlreadyPickedUp => Self::AlreadyPickedUp,
                ValidationKind::GameFinished => Self::GameFinished,
                ValidationKind::RoundNotStarted => Self::RoundNotStarted,
                ValidationKind::InvalidPlayerCount => Self::InvalidPlayerCount,
                ValidationKind::DuplicatePlayerId => Self::DuplicatePlayerId,
                ValidationKind::PlayerInfoMismatch => Self::PlayerInfoMismatch,
                ValidationKind::EmptyRotation => Self::EmptyRotation,
                ValidationKind::ParseCard => Self::ParseCard,
            },
            DomainError::Conflict { kind, .. } => match kind {
                ConflictKind::LobbyTaken => Self::LobbyTaken,
            },
            DomainError::NotFound { kind, .. } => match kind {
                NotFoundKind::Game => Self::GameNotFound,
                NotFoundKind::Player => Self::PlayerNotFound,
            },
        }
    }
}
