//! Pluggable position evaluation.
//!
//! Scores are always taken from a fixed perspective color, never flipped by
//! search depth: positive is good for `perspective`.

use log::warn;

use crate::game_state::laser_types::*;

pub type Score = f64;

/// Score of a position in which a queen has fallen.
pub const WIN_SCORE: Score = 1e10;

/// Bound used to seed alpha/beta; strictly outside every reachable score.
pub const SCORE_INFINITY: Score = 2e10;

pub trait BoardScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> Score;
}

/// Rewards defenders that stay close to their own queen and every surviving
/// deflector.
#[derive(Debug, Clone, Copy)]
pub struct QueenGuardScorer {
    pub defender_weight: Score,
    pub deflector_weight: Score,
}

impl Default for QueenGuardScorer {
    fn default() -> Self {
        Self {
            defender_weight: 1e4,
            deflector_weight: 7.5e4,
        }
    }
}

impl QueenGuardScorer {
    /// Manhattan distance from a piece to its own queen, floored at 1.
    fn distance_to_queen(game_state: &GameState, piece: &Piece) -> u32 {
        let queen = game_state.queen(piece.color);
        let distance = piece.position.manhattan_distance(queen.position);
        if distance == 0 {
            warn!("{piece} shares a square with its queen");
        }
        distance.max(1)
    }
}

impl BoardScorer for QueenGuardScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> Score {
        if game_state.queen(perspective).destroyed {
            return -WIN_SCORE;
        }
        if game_state.queen(perspective.opposite()).destroyed {
            return WIN_SCORE;
        }

        let mut value = 0.0;
        for piece in game_state.pieces.iter().filter(|p| p.is_alive()) {
            let sign = if piece.color == perspective { 1.0 } else { -1.0 };
            match piece.kind {
                PieceKind::Defender => {
                    let distance = Self::distance_to_queen(game_state, piece);
                    value += sign * self.defender_weight / Score::from(distance);
                }
                PieceKind::Deflector => value += sign * self.deflector_weight,
                _ => {}
            }
        }
        value
    }
}
