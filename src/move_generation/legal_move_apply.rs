//! In-place make/unmake for laser-chess actions.
//!
//! `apply_action` and `fire_beam` push undo records; `undo_last_event`
//! pops them. A destruction record is always unwound together with the
//! action record underneath it, so one `undo_last_event` call reverts one
//! whole ply. `play_action` is the validated entry point used for committed
//! plies: it checks every precondition before mutating anything.

use log::{debug, info};

use crate::beam::beam_resolver::BeamPath;
use crate::errors::GameError;
use crate::game_state::laser_types::*;

/// Result of one committed ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyReport {
    pub color: Color,
    pub action: Action,
    pub beam: BeamPath,
    pub winner: Option<Color>,
}

impl GameState {
    /// Mutate the piece and board for `action` and push its undo record.
    ///
    /// Only structural checks are done here (live piece, empty in-bounds
    /// destination, emitters stay put); turn ownership and rule legality
    /// belong to `play_action`.
    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        let id = action.piece();
        let piece = self.piece(id)?;
        if piece.destroyed {
            return Err(GameError::PieceDestroyed(id));
        }

        match action {
            Action::Move { to, .. } => {
                let (row, column) = (i16::from(to.row), i16::from(to.column));
                if Cell::checked(row, column).is_none() {
                    return Err(GameError::OutOfBounds { row, column });
                }
                if piece.kind == PieceKind::LaserEmitter || self.board.occupant(to).is_some() {
                    return Err(GameError::IllegalDestination { piece: id, to });
                }
                let from = piece.position;
                self.relocate(id, from, to);
                self.log.push(LogEntry::Move { piece: id, from });
            }
            Action::Rotate { orientation, .. } => {
                let from = piece.orientation;
                self.pieces[id].orientation = orientation;
                self.log.push(LogEntry::Rotate { piece: id, from });
            }
        }
        Ok(())
    }

    /// Pop and revert one ply. A destruction record also pops the record
    /// beneath it.
    pub fn undo_last_event(&mut self) -> Result<(), GameError> {
        let mut entry = self.log.pop().ok_or(GameError::EmptyLog)?;
        loop {
            match entry {
                LogEntry::Move { piece, from } => {
                    let to = self.pieces[piece].position;
                    self.relocate(piece, to, from);
                    return Ok(());
                }
                LogEntry::Rotate { piece, from } => {
                    self.pieces[piece].orientation = from;
                    return Ok(());
                }
                LogEntry::Destruction { piece } => {
                    self.restore_piece(piece);
                    entry = self.log.pop().ok_or(GameError::UnbalancedLog(piece))?;
                }
            }
        }
    }

    #[inline]
    pub fn advance_turn(&mut self) {
        self.turn += 1;
    }

    /// Validate, apply, fire and advance: one full committed ply.
    ///
    /// Rejected actions leave the state untouched.
    pub fn play_action(&mut self, action: Action) -> Result<PlyReport, GameError> {
        if let Some(winner) = self.winner() {
            return Err(GameError::GameOver { winner });
        }
        let color = self.side_to_move();
        let id = action.piece();
        let piece = self.piece(id)?;
        if piece.destroyed {
            return Err(GameError::PieceDestroyed(id));
        }
        if piece.color != color {
            return Err(GameError::NotYourPiece {
                piece: id,
                owner: piece.color,
                to_move: color,
            });
        }
        if !self.is_legal_action(&action) {
            return Err(match action {
                Action::Move { to, .. } => GameError::IllegalDestination { piece: id, to },
                Action::Rotate { orientation, .. } => {
                    GameError::IllegalRotation { piece: id, orientation }
                }
            });
        }

        self.apply_action(action)?;
        let beam = self.fire_beam(color);
        self.advance_turn();
        self.last_beam = Some(beam.clone());

        let winner = self.winner();
        info!("turn {}: {color} played {action}, beam {}", self.turn, beam.outcome);
        if let Some(winner) = winner {
            info!("{winner} wins");
        }
        Ok(PlyReport {
            color,
            action,
            beam,
            winner,
        })
    }

    pub(crate) fn destroy_piece(&mut self, id: PieceId) {
        let cell = self.pieces[id].position;
        self.pieces[id].destroyed = true;
        self.board.clear_occupant(cell);
        self.log.push(LogEntry::Destruction { piece: id });
        debug!("destroyed {}", self.pieces[id]);
    }

    fn restore_piece(&mut self, id: PieceId) {
        let cell = self.pieces[id].position;
        self.pieces[id].destroyed = false;
        self.board.set_occupant(cell, id);
    }

    fn relocate(&mut self, id: PieceId, from: Cell, to: Cell) {
        self.board.clear_occupant(from);
        self.board.set_occupant(to, id);
        self.pieces[id].position = to;
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::IndexedRandom;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Snapshot {
        occupants: Vec<Option<PieceId>>,
        pieces: Vec<Piece>,
        log_depth: usize,
        turn: u32,
    }

    fn snapshot(game: &GameState) -> Snapshot {
        Snapshot {
            occupants: game.board.squares().map(|s| s.occupant).collect(),
            pieces: game.pieces.clone(),
            log_depth: game.log.len(),
            turn: game.turn,
        }
    }

    #[test]
    fn move_then_undo_restores_position() {
        let mut game = GameState::new_game();
        let before = snapshot(&game);
        let queen = game.queens[Color::Red.index()];

        game.apply_action(Action::Move {
            piece: queen,
            to: Cell::new(1, 5),
        })
        .expect("move should apply");
        assert_eq!(game.pieces[queen].position, Cell::new(1, 5));
        assert_eq!(game.board.occupant(Cell::new(1, 5)), Some(queen));
        assert_eq!(game.board.occupant(Cell::new(0, 5)), None);
        assert_eq!(game.log, vec![LogEntry::Move { piece: queen, from: Cell::new(0, 5) }]);
        assert!(game.occupancy_is_consistent());

        game.undo_last_event().expect("undo should succeed");
        assert_eq!(snapshot(&game), before);
    }

    #[test]
    fn undo_unwinds_destruction_with_its_action() {
        let mut game = GameState::new_game();
        let before = snapshot(&game);
        let laser = game.emitters[Color::Red.index()];

        // Turning the red laser along row 0 burns red's own defender at (0,4).
        game.apply_action(Action::Rotate {
            piece: laser,
            orientation: Orientation::Right,
        })
        .expect("rotation should apply");
        let beam = game.fire_beam(Color::Red);
        let victim = beam.outcome.destroyed_piece().expect("defender should burn");
        assert_eq!(game.pieces[victim].kind, PieceKind::Defender);
        assert_eq!(game.pieces[victim].position, Cell::new(0, 4));
        assert_eq!(game.log.len(), 2);
        assert!(game.occupancy_is_consistent());

        game.undo_last_event().expect("undo should succeed");
        assert_eq!(snapshot(&game), before);
        assert!(game.occupancy_is_consistent());
    }

    #[test]
    fn empty_log_is_an_error() {
        let mut game = GameState::new_game();
        assert_eq!(game.undo_last_event(), Err(GameError::EmptyLog));
    }

    #[test]
    fn apply_rejects_off_board_cells_and_moving_emitters() {
        let mut game = GameState::new_game();
        let before = snapshot(&game);
        let red_queen = game.queens[Color::Red.index()];
        let red_laser = game.emitters[Color::Red.index()];

        assert_eq!(
            game.apply_action(Action::Move {
                piece: red_queen,
                to: Cell::new(8, 5)
            }),
            Err(GameError::OutOfBounds { row: 8, column: 5 })
        );
        assert_eq!(
            game.apply_action(Action::Move {
                piece: red_laser,
                to: Cell::new(1, 0)
            }),
            Err(GameError::IllegalDestination {
                piece: red_laser,
                to: Cell::new(1, 0)
            })
        );
        assert_eq!(game.pieces[red_laser].position, Cell::new(0, 0));
        assert_eq!(snapshot(&game), before);
    }

    #[test]
    fn orphan_destruction_is_reported() {
        let mut game = GameState::new_game();
        let defender = 2;
        game.destroy_piece(defender);
        assert_eq!(game.undo_last_event(), Err(GameError::UnbalancedLog(defender)));
        assert!(game.pieces[defender].is_alive());
    }

    #[test]
    fn play_action_rejects_without_mutating() {
        let mut game = GameState::new_game();
        let before = snapshot(&game);
        let blue_queen = game.queens[Color::Blue.index()];
        let red_queen = game.queens[Color::Red.index()];

        let err = game
            .play_action(Action::Move {
                piece: blue_queen,
                to: Cell::new(6, 4),
            })
            .expect_err("blue may not move on red's turn");
        assert!(matches!(err, GameError::NotYourPiece { .. }));

        let err = game
            .play_action(Action::Move {
                piece: red_queen,
                to: Cell::new(2, 5),
            })
            .expect_err("queen only steps one square");
        assert!(matches!(err, GameError::IllegalDestination { .. }));

        let err = game
            .play_action(Action::Rotate {
                piece: red_queen,
                orientation: Orientation::Left,
            })
            .expect_err("queens do not rotate");
        assert!(matches!(err, GameError::IllegalRotation { .. }));

        assert!(matches!(
            game.play_action(Action::Move { piece: 99, to: Cell::new(1, 1) }),
            Err(GameError::UnknownPiece(99))
        ));

        assert_eq!(snapshot(&game), before);
        assert!(game.last_beam.is_none());
    }

    #[test]
    fn play_action_fires_and_advances() {
        let mut game = GameState::new_game();
        let red_queen = game.queens[Color::Red.index()];
        let report = game
            .play_action(Action::Move {
                piece: red_queen,
                to: Cell::new(1, 5),
            })
            .expect("legal move");
        assert_eq!(report.color, Color::Red);
        assert_eq!(report.winner, None);
        assert_eq!(game.turn, 1);
        assert_eq!(game.side_to_move(), Color::Blue);
        assert_eq!(game.last_beam.as_ref(), Some(&report.beam));
        assert_eq!(game.log.len(), 1);
    }

    #[test]
    fn two_cycles_leave_the_game_unchanged() {
        let mut game = GameState::new_game();
        let before = snapshot(&game);
        for color in [Color::Red, Color::Blue] {
            let action = game.all_legal_actions(color)[0];
            game.apply_action(action).expect("legal action");
            game.fire_beam(color);
            game.undo_last_event().expect("undo should succeed");
        }
        assert_eq!(snapshot(&game), before);
    }

    #[test]
    fn random_plies_keep_occupancy_and_unwind_exactly() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut game = GameState::new_game();
            let mut history = vec![snapshot(&game)];
            for _ in 0..30 {
                if game.is_over() {
                    break;
                }
                let color = game.side_to_move();
                let actions = game.all_legal_actions(color);
                let Some(action) = actions.choose(&mut rng).copied() else {
                    break;
                };
                game.apply_action(action).expect("generated action applies");
                game.fire_beam(color);
                game.advance_turn();
                assert!(game.occupancy_is_consistent());
                history.push(snapshot(&game));
            }

            history.pop();
            while let Some(expected) = history.pop() {
                game.undo_last_event().expect("every ply is undoable");
                let mut restored = snapshot(&game);
                restored.turn = expected.turn;
                assert_eq!(restored, expected);
            }
            assert!(game.log.is_empty());
        }
    }
}
