//! Core value types shared by the board, the beam resolver and the search.
//!
//! Pieces are a closed set of kinds dispatched by `match`, never by trait
//! objects, so every (kind, incoming direction, orientation) combination is
//! visible in one place.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::LogEntry;

/// Player color. Neutral squares carry `None` instead of a third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Even turns belong to red, odd turns to blue.
    #[inline]
    pub const fn for_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Color::Red
        } else {
            Color::Blue
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

/// Facing of a piece, or the travel direction of a beam.
///
/// The discriminants form a 4-cycle: anti-clockwise is `+1`, clockwise is
/// `-1`, both modulo 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Right,
        Orientation::Up,
        Orientation::Left,
        Orientation::Down,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Orientation::Right,
            1 => Orientation::Up,
            2 => Orientation::Left,
            _ => Orientation::Down,
        }
    }

    #[inline]
    pub const fn clockwise(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    #[inline]
    pub const fn anticlockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Right | Orientation::Left)
    }

    /// Row/column step for one cell of travel. Row 0 is the red edge.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Orientation::Right => (0, 1),
            Orientation::Up => (-1, 0),
            Orientation::Left => (0, -1),
            Orientation::Down => (1, 0),
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "right" | "r" => Some(Orientation::Right),
            "up" | "u" => Some(Orientation::Up),
            "left" | "l" => Some(Orientation::Left),
            "down" | "d" => Some(Orientation::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Right => "right",
            Orientation::Up => "up",
            Orientation::Left => "left",
            Orientation::Down => "down",
        };
        f.write_str(name)
    }
}

/// Rotation request coming from a front-end button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    AntiClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Queen,
    Defender,
    Deflector,
    Switch,
    LaserEmitter,
}

impl PieceKind {
    pub fn glyph(self) -> char {
        match self {
            PieceKind::Queen => 'Q',
            PieceKind::Defender => 'D',
            PieceKind::Deflector => 'F',
            PieceKind::Switch => 'S',
            PieceKind::LaserEmitter => 'L',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Queen => "queen",
            PieceKind::Defender => "defender",
            PieceKind::Deflector => "deflector",
            PieceKind::Switch => "switch",
            PieceKind::LaserEmitter => "laser",
        };
        f.write_str(name)
    }
}

/// Board coordinate. `Cell::new` does not check bounds; `Cell::checked`,
/// `Cell::offset` and `Cell::step` only ever yield in-bounds cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: u8,
    pub column: u8,
}

impl Cell {
    #[inline]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Bounds-checked construction from signed coordinates.
    #[inline]
    pub fn checked(row: i16, column: i16) -> Option<Self> {
        use crate::game_state::laser_rules::{BOARD_COLUMNS, BOARD_ROWS};
        if (0..BOARD_ROWS as i16).contains(&row) && (0..BOARD_COLUMNS as i16).contains(&column) {
            Some(Self::new(row as u8, column as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_column: i8) -> Option<Self> {
        Self::checked(
            i16::from(self.row) + i16::from(d_row),
            i16::from(self.column) + i16::from(d_column),
        )
    }

    /// Next cell in `direction`, or `None` when the step leaves the board.
    #[inline]
    pub fn step(self, direction: Orientation) -> Option<Self> {
        let (d_row, d_column) = direction.delta();
        self.offset(d_row, d_column)
    }

    #[inline]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.column.abs_diff(other.column))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

/// Stable index into `GameState::pieces`. Never reused.
pub type PieceId = usize;

/// A piece on (or formerly on) the board.
///
/// Queens carry a fixed `Up` orientation that no rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Cell,
    pub orientation: Orientation,
    pub destroyed: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color, position: Cell, orientation: Orientation) -> Self {
        Self {
            kind,
            color,
            position,
            orientation,
            destroyed: false,
        }
    }

    pub const fn queen(color: Color, row: u8, column: u8) -> Self {
        Self::new(PieceKind::Queen, color, Cell::new(row, column), Orientation::Up)
    }

    pub const fn defender(color: Color, row: u8, column: u8, orientation: Orientation) -> Self {
        Self::new(PieceKind::Defender, color, Cell::new(row, column), orientation)
    }

    pub const fn deflector(color: Color, row: u8, column: u8, orientation: Orientation) -> Self {
        Self::new(PieceKind::Deflector, color, Cell::new(row, column), orientation)
    }

    pub const fn switch(color: Color, row: u8, column: u8, orientation: Orientation) -> Self {
        Self::new(PieceKind::Switch, color, Cell::new(row, column), orientation)
    }

    pub const fn laser(color: Color, row: u8, column: u8, orientation: Orientation) -> Self {
        Self::new(PieceKind::LaserEmitter, color, Cell::new(row, column), orientation)
    }

    #[inline]
    pub const fn is_alive(&self) -> bool {
        !self.destroyed
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.color, self.kind, self.position)?;
        if self.kind != PieceKind::Queen {
            write!(f, " facing {}", self.orientation)?;
        }
        if self.destroyed {
            write!(f, " (destroyed)")?;
        }
        Ok(())
    }
}

/// One half of a ply: the beam is fired separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move { piece: PieceId, to: Cell },
    Rotate { piece: PieceId, orientation: Orientation },
}

impl Action {
    #[inline]
    pub const fn piece(&self) -> PieceId {
        match self {
            Action::Move { piece, .. } | Action::Rotate { piece, .. } => *piece,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { piece, to } => write!(f, "move #{piece} {to}"),
            Action::Rotate { piece, orientation } => write!(f, "rotate #{piece} {orientation}"),
        }
    }
}
