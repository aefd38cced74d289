//! Domain-level error type shared by every engine entry point.
//!
//! All illegal actions fail closed: an `Err(DomainError)` means the call was
//! rejected and the game state is unchanged. The transport layer decides
//! whether to surface the rejection (via [`crate::errors::ErrorCode`]) or
//! simply not broadcast an update.

use thiserror::Error;

/// Typed reasons a proposed action can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Action attempted by a player the game does not know about.
    UnknownPlayer,
    /// Acting player is neither the current turn holder nor an eligible attacker.
    OutOfTurn,
    /// Acting player does not hold the card they tried to play.
    CardNotInHand,
    /// The attack pile already holds the maximum of six cards.
    AttackLimitReached,
    /// The defender has no spare card for another attack position.
    DefenderOutOfCards,
    /// Non-opening attack whose rank is not yet on the table.
    RankNotOnTable,
    /// Opening attack with a trump while a non-trump alternative exists.
    TrumpOpeningRestricted,
    /// Defense played while every attack position is already answered.
    NoAttackToAnswer,
    /// Proposed defense does not beat the attack at its position.
    CannotBeatCard,
    /// Take-cards invoked outside the pickup window or by a non-defender.
    TakeUnavailable,
    /// Pass invoked out of turn, before any attack, or twice in one round.
    PassUnavailable,
    /// Attacker already forfeited the round by picking up cards.
    AlreadyPickedUp,
    /// Any mutation attempted after the game finished.
    GameFinished,
    /// End-turn invoked before any round activity.
    RoundNotStarted,
    /// Game initialization with fewer than 2 or more than 6 players.
    InvalidPlayerCount,
    /// Game initialization with a repeated player id.
    DuplicatePlayerId,
    /// Player display info does not cover the supplied player ids.
    PlayerInfoMismatch,
    /// Rotation arithmetic hit an emptied turn order.
    EmptyRotation,
    /// Card token could not be parsed.
    ParseCard,
}

/// Missing resources in domain terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
}

/// Semantic conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConflictKind {
    /// A game already exists under the given lobby id.
    LobbyTaken,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input validation or rule violation; the move was rejected.
    #[error("validation {kind:?}: {detail}")]
    Validation { kind: ValidationKind, detail: String },
    /// Semantic conflict.
    #[error("conflict {kind:?}: {detail}")]
    Conflict { kind: ConflictKind, detail: String },
    /// Missing resource in domain terms.
    #[error("not found {kind:?}: {detail}")]
    NotFound { kind: NotFoundKind, detail: String },
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            detail: detail.into(),
        }
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    /// Rejection kind, if this error is a validation failure.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            Self::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
