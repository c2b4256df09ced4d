//! Errors used throughout the laser-chess engine.
//!
//! `GameError` is the single error type returned by layout construction,
//! action validation, the event log and the search. Variants fall into
//! three groups:
//! - invalid commands (wrong piece, illegal destination or rotation, nothing
//!   selected, game already decided, wrong kind of player). These are
//!   rejected before any state is touched and are safe to show to a player;
//! - invariant violations (`EmptyLog`, `UnbalancedLog`). These mean a caller
//!   popped more events than it pushed and indicate a bug;
//! - `InvalidLayout`, raised while building a custom position.

use thiserror::Error;

use crate::game_state::laser_types::{Cell, Color, Orientation, PieceId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no piece with index {0}")]
    UnknownPiece(PieceId),

    #[error("piece {0} has been destroyed")]
    PieceDestroyed(PieceId),

    #[error("piece {piece} belongs to {owner}, but {to_move} is to move")]
    NotYourPiece {
        piece: PieceId,
        owner: Color,
        to_move: Color,
    },

    #[error("piece {piece} cannot move to {to}")]
    IllegalDestination { piece: PieceId, to: Cell },

    #[error("piece {piece} cannot rotate to {orientation}")]
    IllegalRotation {
        piece: PieceId,
        orientation: Orientation,
    },

    #[error("square ({row},{column}) is off the board")]
    OutOfBounds { row: i16, column: i16 },

    #[error("no piece is selected")]
    NothingSelected,

    #[error("the game is over, {winner} has won")]
    GameOver { winner: Color },

    #[error("{0} is not controlled by an engine")]
    NotAnAiTurn(Color),

    #[error("{0} is controlled by an engine")]
    NotAHumanTurn(Color),

    #[error("{0} has no legal action")]
    NoLegalActions(Color),

    /// Popped the event log while it was empty.
    #[error("the event log is empty")]
    EmptyLog,

    /// A destruction entry had no action entry underneath it.
    #[error("destruction of piece {0} is not paired with an action")]
    UnbalancedLog(PieceId),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

impl GameError {
    /// True for rejections a front-end should treat as a silent no-op.
    pub fn is_invalid_command(&self) -> bool {
        !matches!(
            self,
            GameError::EmptyLog | GameError::UnbalancedLog(_) | GameError::InvalidLayout(_)
        )
    }
}
