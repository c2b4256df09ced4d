use crate::game_state::laser_types::{Cell, Orientation, PieceId};

/// Single reversible record on the event log.
///
/// `Destruction` entries always sit on top of the action entry of the same
/// ply, which is what lets `undo_last_event` unwind a whole ply at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    Move { piece: PieceId, from: Cell },
    Rotate { piece: PieceId, from: Orientation },
    Destruction { piece: PieceId },
}
