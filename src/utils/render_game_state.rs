//! Terminal-oriented text renderer.
//!
//! Draws the 8x10 board for the text front-end, tests and diagnostics.
//! Red pieces use upper-case glyphs and blue pieces lower-case ones, each
//! followed by an arrow for its orientation. Empty squares show their home
//! zone (`r`/`b`), a highlight (`*`) or the last beam (`+`).

use std::collections::HashSet;

use crate::beam::beam_resolver::BeamPath;
use crate::game_state::laser_rules::BOARD_COLUMNS;
use crate::game_state::laser_types::*;

/// Render the board, including the last fired beam if there is one.
pub fn render_game_state(game_state: &GameState) -> String {
    render_with_beam(game_state, game_state.last_beam.as_ref())
}

pub fn render_with_beam(game_state: &GameState, beam: Option<&BeamPath>) -> String {
    let beam_cells: HashSet<Cell> = beam
        .map(|path| path.cells.iter().copied().collect())
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str(&column_header());

    for (row, squares) in game_state.board.rows().enumerate() {
        out.push_str(&format!("{row} "));
        for square in squares.iter() {
            let token = match square.occupant {
                Some(id) => piece_token(&game_state.pieces[id]),
                None if square.highlighted => "**".to_owned(),
                None if beam_cells.contains(&square.cell) => "++".to_owned(),
                None => match square.zone {
                    Some(Color::Red) => "r.".to_owned(),
                    Some(Color::Blue) => "b.".to_owned(),
                    None => " .".to_owned(),
                },
            };
            out.push(' ');
            out.push_str(&token);
        }
        out.push_str(&format!(" {row}\n"));
    }

    out.push_str(&column_header());
    out.push_str(&format!(
        "turn {}, {} to move",
        game_state.turn,
        game_state.side_to_move()
    ));
    if let Some(winner) = game_state.winner() {
        out.push_str(&format!(", {winner} has won"));
    }
    out
}

/// One-line description of a beam path.
pub fn render_beam(beam: &BeamPath) -> String {
    let cells = beam
        .cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "beam {cells} | {} after {} reflection(s)",
        beam.outcome, beam.reflections
    )
}

fn column_header() -> String {
    let mut header = String::from(" ");
    for column in 0..BOARD_COLUMNS {
        header.push_str(&format!("  {column}"));
    }
    header.push('\n');
    header
}

fn piece_token(piece: &Piece) -> String {
    let glyph = match piece.color {
        Color::Red => piece.kind.glyph(),
        Color::Blue => piece.kind.glyph().to_ascii_lowercase(),
    };
    let arrow = if piece.kind == PieceKind::Queen {
        ' '
    } else {
        orientation_arrow(piece.orientation)
    };
    format!("{glyph}{arrow}")
}

fn orientation_arrow(orientation: Orientation) -> char {
    match orientation {
        Orientation::Right => '>',
        Orientation::Up => '^',
        Orientation::Left => '<',
        Orientation::Down => 'v',
    }
}
