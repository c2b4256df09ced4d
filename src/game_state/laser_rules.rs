//! Canonical laser-chess rule constants.
//!
//! Board geometry, the static home-zone tint, per-kind orientation
//! restrictions and the standard starting layout.

use crate::game_state::laser_types::{Color, Orientation, Piece};

pub const BOARD_ROWS: usize = 8;
pub const BOARD_COLUMNS: usize = 10;

/// Switches only ever face one of these two values; `Left` reflects like
/// `Right` and `Down` like `Up`.
pub const SWITCH_ORIENTATIONS: [Orientation; 2] = [Orientation::Right, Orientation::Up];

/// Home-zone tint of a square.
///
/// Column 0 is red and column 9 blue on every row; columns 8 and 1 are red
/// and blue respectively on the first and last rows only.
pub const fn home_zone(row: usize, column: usize) -> Option<Color> {
    let edge_row = row == 0 || row == BOARD_ROWS - 1;
    if column == 0 || (column == 8 && edge_row) {
        Some(Color::Red)
    } else if column == BOARD_COLUMNS - 1 || (column == 1 && edge_row) {
        Some(Color::Blue)
    } else {
        None
    }
}

/// The two orientations an emitter may take: those pointing from its home
/// corner into the board.
pub const fn emitter_orientations(color: Color) -> [Orientation; 2] {
    match color {
        Color::Red => [Orientation::Right, Orientation::Down],
        Color::Blue => [Orientation::Left, Orientation::Up],
    }
}

/// Standard 26-piece opening layout. Emitters and queens come first for each
/// color so their indices are easy to spot in logs.
pub fn starting_layout() -> Vec<Piece> {
    use crate::game_state::laser_types::Color::{Blue, Red};
    use crate::game_state::laser_types::Orientation::{Down, Left, Right, Up};

    vec![
        // red
        Piece::laser(Red, 0, 0, Down),
        Piece::queen(Red, 0, 5),
        Piece::defender(Red, 0, 4, Down),
        Piece::defender(Red, 0, 6, Down),
        Piece::deflector(Red, 0, 7, Down),
        Piece::deflector(Red, 1, 2, Left),
        Piece::deflector(Red, 3, 0, Right),
        Piece::deflector(Red, 3, 7, Down),
        Piece::deflector(Red, 4, 0, Down),
        Piece::deflector(Red, 4, 7, Right),
        Piece::deflector(Red, 5, 6, Down),
        Piece::switch(Red, 3, 4, Right),
        Piece::switch(Red, 3, 5, Up),
        // blue
        Piece::laser(Blue, 7, 9, Up),
        Piece::queen(Blue, 7, 4),
        Piece::defender(Blue, 7, 3, Up),
        Piece::defender(Blue, 7, 5, Up),
        Piece::deflector(Blue, 7, 2, Up),
        Piece::deflector(Blue, 6, 7, Right),
        Piece::deflector(Blue, 4, 2, Up),
        Piece::deflector(Blue, 4, 9, Left),
        Piece::deflector(Blue, 3, 2, Left),
        Piece::deflector(Blue, 3, 9, Up),
        Piece::deflector(Blue, 2, 3, Up),
        Piece::switch(Blue, 4, 4, Up),
        Piece::switch(Blue, 4, 5, Right),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_zone_pattern_matches_corner_map() {
        for row in 0..BOARD_ROWS {
            assert_eq!(home_zone(row, 0), Some(Color::Red));
            assert_eq!(home_zone(row, 9), Some(Color::Blue));
        }
        assert_eq!(home_zone(0, 8), Some(Color::Red));
        assert_eq!(home_zone(7, 8), Some(Color::Red));
        assert_eq!(home_zone(0, 1), Some(Color::Blue));
        assert_eq!(home_zone(7, 1), Some(Color::Blue));
        assert_eq!(home_zone(3, 8), None);
        assert_eq!(home_zone(3, 1), None);
        assert_eq!(home_zone(4, 5), None);
    }

    #[test]
    fn starting_layout_respects_home_zones() {
        for piece in starting_layout() {
            let zone = home_zone(piece.position.row as usize, piece.position.column as usize);
            assert!(
                zone.is_none() || zone == Some(piece.color),
                "{piece} sits in the wrong home zone"
            );
        }
    }
}
