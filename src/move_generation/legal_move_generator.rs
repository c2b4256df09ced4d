//! Legal move, rotation and action enumeration.
//!
//! Enumeration order is part of the contract: the search keeps the first
//! action reaching an extremum, so pieces are visited in index order, moves
//! come before rotations, and moves follow a row-major scan of the 3x3
//! neighbourhood.

use crate::game_state::laser_rules::{emitter_orientations, SWITCH_ORIENTATIONS};
use crate::game_state::laser_types::*;

/// Orientations a piece may rotate to, ignoring whose turn it is.
pub fn rotation_targets(piece: &Piece) -> Vec<Orientation> {
    let current = piece.orientation;
    match piece.kind {
        PieceKind::Queen => Vec::new(),
        PieceKind::Defender | PieceKind::Deflector => {
            vec![current.clockwise(), current.anticlockwise()]
        }
        PieceKind::Switch => toggle(SWITCH_ORIENTATIONS, current),
        PieceKind::LaserEmitter => toggle(emitter_orientations(piece.color), current),
    }
}

fn toggle(pair: [Orientation; 2], current: Orientation) -> Vec<Orientation> {
    let other = if current == pair[0] { pair[1] } else { pair[0] };
    vec![other]
}

/// Rotation a front-end button maps to. Two-state pieces toggle whichever
/// button is pressed; queens cannot rotate.
pub fn rotation_for_request(piece: &Piece, direction: RotationDirection) -> Option<Orientation> {
    match piece.kind {
        PieceKind::Queen => None,
        PieceKind::Defender | PieceKind::Deflector => Some(match direction {
            RotationDirection::Clockwise => piece.orientation.clockwise(),
            RotationDirection::AntiClockwise => piece.orientation.anticlockwise(),
        }),
        PieceKind::Switch | PieceKind::LaserEmitter => rotation_targets(piece).first().copied(),
    }
}

impl GameState {
    /// Empty, in-bounds neighbouring squares whose home zone admits the
    /// piece's color. Emitters and destroyed pieces never move.
    pub fn legal_moves(&self, id: PieceId) -> Vec<Cell> {
        let Some(piece) = self.pieces.get(id) else {
            return Vec::new();
        };
        if piece.destroyed || piece.kind == PieceKind::LaserEmitter {
            return Vec::new();
        }

        let mut moves = Vec::with_capacity(8);
        for d_row in -1..=1 {
            for d_column in -1..=1 {
                if d_row == 0 && d_column == 0 {
                    continue;
                }
                let Some(cell) = piece.position.offset(d_row, d_column) else {
                    continue;
                };
                let square = self.board.square(cell);
                if square.occupant.is_none() && square.admits(piece.color) {
                    moves.push(cell);
                }
            }
        }
        moves
    }

    pub fn legal_rotations(&self, id: PieceId) -> Vec<Orientation> {
        match self.pieces.get(id) {
            Some(piece) if piece.is_alive() => rotation_targets(piece),
            _ => Vec::new(),
        }
    }

    pub fn all_legal_actions(&self, color: Color) -> Vec<Action> {
        let mut actions = Vec::new();
        for (id, piece) in self.pieces.iter().enumerate() {
            if piece.destroyed || piece.color != color {
                continue;
            }
            actions.extend(
                self.legal_moves(id)
                    .into_iter()
                    .map(|to| Action::Move { piece: id, to }),
            );
            actions.extend(
                self.legal_rotations(id)
                    .into_iter()
                    .map(|orientation| Action::Rotate { piece: id, orientation }),
            );
        }
        actions
    }

    pub fn is_legal_action(&self, action: &Action) -> bool {
        match *action {
            Action::Move { piece, to } => self.legal_moves(piece).contains(&to),
            Action::Rotate { piece, orientation } => {
                self.legal_rotations(piece).contains(&orientation)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::laser_rules::starting_layout;

    fn find(game: &GameState, color: Color, kind: PieceKind, row: u8, column: u8) -> PieceId {
        game.pieces
            .iter()
            .position(|p| p.color == color && p.kind == kind && p.position == Cell::new(row, column))
            .expect("piece should exist in layout")
    }

    #[test]
    fn rotation_sets_per_kind() {
        use crate::game_state::laser_types::Orientation::*;

        let queen = Piece::queen(Color::Red, 0, 5);
        assert!(rotation_targets(&queen).is_empty());

        for o in Orientation::ALL {
            let defender = Piece::defender(Color::Red, 0, 4, o);
            let targets = rotation_targets(&defender);
            assert_eq!(targets.len(), 2);
            assert!(!targets.contains(&o));
            assert!(!targets.contains(&o.opposite()));

            let deflector = Piece::deflector(Color::Blue, 2, 3, o);
            assert_eq!(rotation_targets(&deflector), targets);
        }

        assert_eq!(rotation_targets(&Piece::switch(Color::Red, 3, 4, Right)), vec![Up]);
        assert_eq!(rotation_targets(&Piece::switch(Color::Red, 3, 4, Up)), vec![Right]);

        assert_eq!(rotation_targets(&Piece::laser(Color::Red, 0, 0, Down)), vec![Right]);
        assert_eq!(rotation_targets(&Piece::laser(Color::Red, 0, 0, Right)), vec![Down]);
        assert_eq!(rotation_targets(&Piece::laser(Color::Blue, 7, 9, Up)), vec![Left]);
        assert_eq!(rotation_targets(&Piece::laser(Color::Blue, 7, 9, Left)), vec![Up]);
    }

    #[test]
    fn rotation_requests_follow_the_clock() {
        let deflector = Piece::deflector(Color::Red, 1, 2, Orientation::Left);
        assert_eq!(
            rotation_for_request(&deflector, RotationDirection::Clockwise),
            Some(Orientation::Up)
        );
        assert_eq!(
            rotation_for_request(&deflector, RotationDirection::AntiClockwise),
            Some(Orientation::Down)
        );
        let laser = Piece::laser(Color::Blue, 7, 9, Orientation::Up);
        for direction in [RotationDirection::Clockwise, RotationDirection::AntiClockwise] {
            assert_eq!(rotation_for_request(&laser, direction), Some(Orientation::Left));
        }
        let queen = Piece::queen(Color::Blue, 7, 4);
        assert_eq!(rotation_for_request(&queen, RotationDirection::Clockwise), None);
    }

    #[test]
    fn moves_respect_occupancy_and_home_zones() {
        let game = GameState::new_game();

        // Red queen at (0,5): flanked by its defenders, row -1 is off board.
        let red_queen = game.queens[Color::Red.index()];
        assert_eq!(
            game.legal_moves(red_queen),
            vec![Cell::new(1, 4), Cell::new(1, 5), Cell::new(1, 6)]
        );

        // Red deflector at (1,2) may not enter the blue square (0,1).
        let deflector = find(&game, Color::Red, PieceKind::Deflector, 1, 2);
        let moves = game.legal_moves(deflector);
        assert!(!moves.contains(&Cell::new(0, 1)));
        assert!(moves.contains(&Cell::new(0, 2)));
        assert!(moves.contains(&Cell::new(1, 1)));

        // Red deflector at (3,0) may use its own column.
        let edge = find(&game, Color::Red, PieceKind::Deflector, 3, 0);
        assert!(game.legal_moves(edge).contains(&Cell::new(2, 0)));

        assert!(game.legal_moves(game.emitters[Color::Red.index()]).is_empty());
    }

    #[test]
    fn moves_scan_row_major() {
        let game = GameState::new_game();
        let blue_switch = find(&game, Color::Blue, PieceKind::Switch, 4, 4);
        let moves = game.legal_moves(blue_switch);
        let mut sorted = moves.clone();
        sorted.sort_by_key(|c| (c.row, c.column));
        assert_eq!(moves, sorted);
    }

    #[test]
    fn all_actions_only_cover_live_pieces_of_the_color() {
        let mut game = GameState::new_game();
        let victim = find(&game, Color::Red, PieceKind::Deflector, 5, 6);
        game.pieces[victim].destroyed = true;
        let cell = game.pieces[victim].position;
        game.board.clear_occupant(cell);

        let actions = game.all_legal_actions(Color::Red);
        assert!(!actions.is_empty());
        for action in &actions {
            let piece = &game.pieces[action.piece()];
            assert_eq!(piece.color, Color::Red);
            assert!(piece.is_alive());
            assert!(game.is_legal_action(action));
        }
        assert!(actions.iter().all(|a| a.piece() != victim));

        // Pieces in index order, moves before rotations.
        let mut last_piece = 0;
        let mut seen_rotation = false;
        for action in &actions {
            if action.piece() != last_piece {
                assert!(action.piece() > last_piece);
                last_piece = action.piece();
                seen_rotation = false;
            }
            match action {
                Action::Move { .. } => assert!(!seen_rotation),
                Action::Rotate { .. } => seen_rotation = true,
            }
        }
    }

    #[test]
    fn layout_indices_are_stable() {
        let game = GameState::new_game();
        assert_eq!(game.pieces, starting_layout());
    }
}
