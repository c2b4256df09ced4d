//! Action-tree enumeration counts.
//!
//! Walks every line of `depth` plies from the side to move, applying each
//! action, firing the mover's beam and undoing the ply again, and tallies
//! what happened at the deepest ply. Useful as a regression fingerprint for
//! the rules and as a stress test of make/unmake balance.

use crate::beam::beam_resolver::BeamOutcome;
use crate::errors::GameError;
use crate::game_state::laser_types::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub moves: usize,
    pub rotations: usize,
    pub destructions: usize,
    pub queen_kills: usize,
    pub absorptions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.moves += rhs.moves;
        self.rotations += rhs.rotations;
        self.destructions += rhs.destructions;
        self.queen_kills += rhs.queen_kills;
        self.absorptions += rhs.absorptions;
    }
}

pub fn perft(game_state: &mut GameState, depth: u8) -> Result<PerftCounts, GameError> {
    let color = game_state.side_to_move();
    perft_from(game_state, color, depth)
}

/// Perft with an explicit first mover; colors alternate from there.
pub fn perft_from(
    game_state: &mut GameState,
    color: Color,
    depth: u8,
) -> Result<PerftCounts, GameError> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for action in game_state.all_legal_actions(color) {
        game_state.apply_action(action)?;
        let beam = game_state.fire_beam(color);

        let counts = if depth == 1 || game_state.is_over() {
            leaf_counts(game_state, &action, &beam.outcome)
        } else {
            perft_from(game_state, color.opposite(), depth - 1)?
        };
        total.merge(counts);

        game_state.undo_last_event()?;
    }
    Ok(total)
}

fn leaf_counts(game_state: &GameState, action: &Action, outcome: &BeamOutcome) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    match action {
        Action::Move { .. } => counts.moves = 1,
        Action::Rotate { .. } => counts.rotations = 1,
    }
    match outcome {
        BeamOutcome::Destroyed(id) => {
            counts.destructions = 1;
            if game_state.pieces[*id].kind == PieceKind::Queen {
                counts.queen_kills = 1;
            }
        }
        BeamOutcome::Absorbed(_) => counts.absorptions = 1,
        BeamOutcome::ExitedBoard => {}
    }
    counts
}
