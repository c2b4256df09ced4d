//! Core mutable game state.
//!
//! `GameState` owns the board, the index-stable piece list, the turn
//! counter and the reversible event log. Pieces are never removed: a
//! destroyed piece keeps its slot with `destroyed == true`, so the queen and
//! emitter indices captured at construction stay valid for the whole game.

use log::info;

use crate::beam::beam_resolver::BeamPath;
use crate::errors::GameError;
use crate::game_state::board::Board;
use crate::game_state::laser_rules::{
    emitter_orientations, starting_layout, SWITCH_ORIENTATIONS,
};
use crate::game_state::laser_types::*;

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub pieces: Vec<Piece>,
    pub turn: u32,

    // [color]
    pub emitters: [PieceId; 2],
    pub queens: [PieceId; 2],

    pub log: Vec<LogEntry>,

    /// Path of the most recent committed beam, for front-ends.
    pub last_beam: Option<BeamPath>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new_game() -> Self {
        let state =
            Self::with_pieces(starting_layout()).expect("starting layout should always be valid");
        info!("new game with {} pieces", state.pieces.len());
        state
    }

    /// Build a position from an explicit piece list.
    ///
    /// Requires exactly one queen and one emitter per color, unique in-bounds
    /// cells, home-zone compatible placement and the orientation restrictions
    /// of switches and emitters. Piece order is preserved as the index order.
    pub fn with_pieces(pieces: Vec<Piece>) -> Result<Self, GameError> {
        let mut board = Board::new();
        let mut queens: [Option<PieceId>; 2] = [None; 2];
        let mut emitters: [Option<PieceId>; 2] = [None; 2];

        for (id, piece) in pieces.iter().enumerate() {
            let cell = piece.position;
            let square = board
                .get(i16::from(cell.row), i16::from(cell.column))
                .ok_or_else(|| GameError::InvalidLayout(format!("{piece} is off the board")))?;
            if square.occupant.is_some() {
                return Err(GameError::InvalidLayout(format!("{cell} holds two pieces")));
            }
            if !square.admits(piece.color) {
                return Err(GameError::InvalidLayout(format!(
                    "{piece} stands in the opposing home zone"
                )));
            }

            let slot = match piece.kind {
                PieceKind::Queen => Some(&mut queens[piece.color.index()]),
                PieceKind::LaserEmitter => {
                    if !emitter_orientations(piece.color).contains(&piece.orientation) {
                        return Err(GameError::InvalidLayout(format!(
                            "{piece} points off the board"
                        )));
                    }
                    Some(&mut emitters[piece.color.index()])
                }
                PieceKind::Switch if !SWITCH_ORIENTATIONS.contains(&piece.orientation) => {
                    return Err(GameError::InvalidLayout(format!(
                        "{piece} must face right or up"
                    )));
                }
                _ => None,
            };
            if let Some(slot) = slot {
                if slot.replace(id).is_some() {
                    return Err(GameError::InvalidLayout(format!(
                        "{} has more than one {}",
                        piece.color, piece.kind
                    )));
                }
            }

            if !piece.destroyed {
                board.set_occupant(cell, id);
            }
        }

        let require = |slots: [Option<PieceId>; 2], kind: PieceKind| {
            let mut ids = [0; 2];
            for color in [Color::Red, Color::Blue] {
                ids[color.index()] = slots[color.index()].ok_or_else(|| {
                    GameError::InvalidLayout(format!("{color} has no {kind}"))
                })?;
            }
            Ok::<_, GameError>(ids)
        };

        Ok(Self {
            board,
            queens: require(queens, PieceKind::Queen)?,
            emitters: require(emitters, PieceKind::LaserEmitter)?,
            pieces,
            turn: 0,
            log: Vec::new(),
            last_beam: None,
        })
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        Color::for_turn(self.turn)
    }

    pub fn piece(&self, id: PieceId) -> Result<&Piece, GameError> {
        self.pieces.get(id).ok_or(GameError::UnknownPiece(id))
    }

    #[inline]
    pub fn queen(&self, color: Color) -> &Piece {
        &self.pieces[self.queens[color.index()]]
    }

    #[inline]
    pub fn emitter(&self, color: Color) -> &Piece {
        &self.pieces[self.emitters[color.index()]]
    }

    /// Live piece on `cell`, if any.
    pub fn piece_at(&self, cell: Cell) -> Option<(PieceId, &Piece)> {
        self.board.occupant(cell).map(|id| (id, &self.pieces[id]))
    }

    /// The owner of a destroyed queen loses.
    pub fn winner(&self) -> Option<Color> {
        [Color::Red, Color::Blue]
            .into_iter()
            .find(|color| self.queen(*color).destroyed)
            .map(Color::opposite)
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Number of pending undo records.
    #[inline]
    pub fn log_depth(&self) -> usize {
        self.log.len()
    }

    /// Checks that every occupied square points at a live piece standing on
    /// it and every live piece is registered on its square.
    pub fn occupancy_is_consistent(&self) -> bool {
        let squares_ok = self.board.squares().all(|square| match square.occupant {
            Some(id) => self
                .pieces
                .get(id)
                .is_some_and(|p| p.is_alive() && p.position == square.cell),
            None => true,
        });
        let pieces_ok = self.pieces.iter().enumerate().all(|(id, piece)| {
            piece.destroyed || self.board.occupant(piece.position) == Some(id)
        });
        squares_ok && pieces_ok
    }
}
