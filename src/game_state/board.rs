//! Fixed 8x10 grid of squares.
//!
//! Each square knows its static home-zone tint, which piece (if any) sits on
//! it, and a highlight flag that only front-ends read.

use crate::game_state::laser_rules::{home_zone, BOARD_COLUMNS, BOARD_ROWS};
use crate::game_state::laser_types::{Cell, Color, PieceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub cell: Cell,
    pub zone: Option<Color>,
    pub occupant: Option<PieceId>,
    pub highlighted: bool,
}

impl Square {
    /// Whether a piece of `color` may stand here.
    #[inline]
    pub fn admits(&self, color: Color) -> bool {
        self.zone.map_or(true, |zone| zone == color)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Square; BOARD_COLUMNS]; BOARD_ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let squares = std::array::from_fn(|row| {
            std::array::from_fn(|column| Square {
                cell: Cell::new(row as u8, column as u8),
                zone: home_zone(row, column),
                occupant: None,
                highlighted: false,
            })
        });
        Self { squares }
    }

    #[inline]
    pub fn square(&self, cell: Cell) -> &Square {
        &self.squares[cell.row as usize][cell.column as usize]
    }

    #[inline]
    fn square_mut(&mut self, cell: Cell) -> &mut Square {
        &mut self.squares[cell.row as usize][cell.column as usize]
    }

    /// Lookup from raw coordinates, `None` when off the board.
    pub fn get(&self, row: i16, column: i16) -> Option<&Square> {
        Cell::checked(row, column).map(|cell| self.square(cell))
    }

    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<PieceId> {
        self.square(cell).occupant
    }

    #[inline]
    pub fn set_occupant(&mut self, cell: Cell, piece: PieceId) {
        self.square_mut(cell).occupant = Some(piece);
    }

    #[inline]
    pub fn clear_occupant(&mut self, cell: Cell) -> Option<PieceId> {
        self.square_mut(cell).occupant.take()
    }

    pub fn set_highlight(&mut self, cell: Cell, highlighted: bool) {
        self.square_mut(cell).highlighted = highlighted;
    }

    pub fn clear_highlights(&mut self) {
        for square in self.squares.iter_mut().flatten() {
            square.highlighted = false;
        }
    }

    pub fn highlighted_cells(&self) -> Vec<Cell> {
        self.squares()
            .filter(|square| square.highlighted)
            .map(|square| square.cell)
            .collect()
    }

    /// Row-major iteration over every square.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Square; BOARD_COLUMNS]> {
        self.squares.iter()
    }
}
