//! Laser propagation and hit resolution.
//!
//! `resolve_hit` is a pure table keyed by (kind, incoming direction,
//! orientation). `GameState::fire_beam` walks the board from an emitter,
//! applying that table at every struck piece until the beam leaves the
//! board, is absorbed, or destroys a piece.

use std::fmt;

use log::{debug, trace, warn};

use crate::game_state::laser_rules::{BOARD_COLUMNS, BOARD_ROWS};
use crate::game_state::laser_types::*;

/// What a struck piece does to the beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    Destroy,
    Reflect(Orientation),
    /// Beam stops on the piece, which survives.
    Absorb,
}

/// How a fired beam ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamOutcome {
    ExitedBoard,
    Destroyed(PieceId),
    Absorbed(PieceId),
}

impl BeamOutcome {
    pub fn destroyed_piece(&self) -> Option<PieceId> {
        match self {
            BeamOutcome::Destroyed(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for BeamOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeamOutcome::ExitedBoard => write!(f, "left the board"),
            BeamOutcome::Destroyed(id) => write!(f, "destroyed #{id}"),
            BeamOutcome::Absorbed(id) => write!(f, "absorbed by #{id}"),
        }
    }
}

/// Every cell the beam crossed, starting at the emitter and ending at the
/// last in-bounds cell (the struck piece's cell when it hit something).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeamPath {
    pub cells: Vec<Cell>,
    pub outcome: BeamOutcome,
    pub reflections: usize,
}

/// Resolve a strike on a piece of `kind` facing `orientation` by a beam
/// travelling in `incoming`.
pub fn resolve_hit(kind: PieceKind, incoming: Orientation, orientation: Orientation) -> HitResult {
    use crate::game_state::laser_types::Orientation::{Down, Left, Right, Up};

    match kind {
        PieceKind::Queen => HitResult::Destroy,
        PieceKind::LaserEmitter => HitResult::Absorb,
        PieceKind::Defender => {
            // Shield face blocks a head-on beam without sending it anywhere.
            if incoming == orientation.opposite() {
                HitResult::Absorb
            } else {
                HitResult::Destroy
            }
        }
        PieceKind::Switch => {
            // left/right is a "\" mirror, up/down a "/" mirror
            let out = match (incoming, orientation.is_horizontal()) {
                (Right, true) => Down,
                (Right, false) => Up,
                (Left, true) => Up,
                (Left, false) => Down,
                (Up, true) => Left,
                (Up, false) => Right,
                (Down, true) => Right,
                (Down, false) => Left,
            };
            HitResult::Reflect(out)
        }
        PieceKind::Deflector => match (incoming, orientation) {
            (Right, Left) => HitResult::Reflect(Down),
            (Right, Up) => HitResult::Reflect(Up),
            (Left, Right) => HitResult::Reflect(Up),
            (Left, Down) => HitResult::Reflect(Down),
            (Up, Left) => HitResult::Reflect(Left),
            (Up, Down) => HitResult::Reflect(Right),
            (Down, Right) => HitResult::Reflect(Right),
            (Down, Up) => HitResult::Reflect(Left),
            _ => HitResult::Destroy,
        },
    }
}

impl GameState {
    /// Fire `color`'s emitter and apply the consequence.
    ///
    /// Pushes at most one `Destruction` record. Beam paths are reversible and
    /// emitters absorb, so a beam cannot revisit a (cell, direction) pair; if
    /// it ever does the beam is stopped there rather than looping.
    pub fn fire_beam(&mut self, color: Color) -> BeamPath {
        let emitter_id = self.emitters[color.index()];
        let emitter = self.pieces[emitter_id];

        let mut cell = emitter.position;
        let mut direction = emitter.orientation;
        let mut cells = vec![cell];
        let mut reflections = 0usize;
        let mut visited = [[0u8; BOARD_COLUMNS]; BOARD_ROWS];

        let outcome = loop {
            let Some(next) = cell.step(direction) else {
                break BeamOutcome::ExitedBoard;
            };
            cell = next;
            cells.push(cell);

            let Some(struck) = self.board.occupant(cell) else {
                continue;
            };
            let piece = self.pieces[struck];
            match resolve_hit(piece.kind, direction, piece.orientation) {
                HitResult::Destroy => {
                    self.destroy_piece(struck);
                    break BeamOutcome::Destroyed(struck);
                }
                HitResult::Absorb => break BeamOutcome::Absorbed(struck),
                HitResult::Reflect(out) => {
                    let seen = &mut visited[cell.row as usize][cell.column as usize];
                    let bit = 1u8 << out.index();
                    if *seen & bit != 0 {
                        warn!("beam revisited {cell} heading {out}; stopping it");
                        break BeamOutcome::Absorbed(struck);
                    }
                    *seen |= bit;
                    trace!("{piece} reflects {direction} beam to {out}");
                    direction = out;
                    reflections += 1;
                }
            }
        };

        debug!("{color} beam {outcome} after {reflections} reflections");
        BeamPath {
            cells,
            outcome,
            reflections,
        }
    }
}
