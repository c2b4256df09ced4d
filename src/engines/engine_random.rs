//! Random-action engine.
//!
//! Picks uniformly among the legal actions of the side to move. Used as a
//! sparring partner in engine matches and for smoke testing.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::GameError;
use crate::game_state::laser_types::GameState;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "LaserChess Random"
    }

    fn choose_action(&mut self, game_state: &mut GameState) -> Result<EngineOutput, GameError> {
        let actions = game_state.all_legal_actions(game_state.side_to_move());

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine legal_actions {}", actions.len()));
        if game_state.is_over() {
            return Ok(out);
        }

        out.best_action = actions.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_engine_is_reproducible() {
        let mut game = GameState::new_game();
        let a = RandomEngine::seeded(11).choose_action(&mut game).expect("runs");
        let b = RandomEngine::seeded(11).choose_action(&mut game).expect("runs");
        assert_eq!(a.best_action, b.best_action);
        let action = a.best_action.expect("opening has actions");
        assert!(game.is_legal_action(&action));
    }
}
