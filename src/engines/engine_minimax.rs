//! Alpha-beta minimax engine.
//!
//! Wraps `minimax_search` with a configurable depth limit and the
//! queen-guard evaluation. This is the automated player the controller
//! uses for AI seats.

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::GameError;
use crate::game_state::laser_types::GameState;
use crate::search::board_scoring::QueenGuardScorer;
use crate::search::minimax::{minimax_search, parse_depth_limit, SearchConfig};

pub struct MinimaxEngine {
    config: SearchConfig,
    scorer: QueenGuardScorer,
}

impl MinimaxEngine {
    pub fn new(depth_limit: u8) -> Self {
        Self::with_config(SearchConfig { depth_limit })
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            scorer: QueenGuardScorer::default(),
        }
    }

    pub fn depth_limit(&self) -> u8 {
        self.config.depth_limit
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "LaserChess Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            self.config.depth_limit = parse_depth_limit(value)?;
            return Ok(());
        }
        Err(format!("unknown option '{name}'"))
    }

    fn choose_action(&mut self, game_state: &mut GameState) -> Result<EngineOutput, GameError> {
        let color = game_state.side_to_move();
        let result = minimax_search(game_state, color, &self.scorer, self.config)?;

        let mut out = EngineOutput {
            best_action: result.best_action,
            ..EngineOutput::default()
        };
        out.info_lines.push(format!(
            "info depth {} nodes {} score {}",
            self.config.depth_limit, result.nodes, result.best_score
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_option_round_trips() {
        let mut engine = MinimaxEngine::default();
        assert_eq!(engine.depth_limit(), 1);
        engine.set_option("depth", "0").expect("valid depth");
        assert_eq!(engine.depth_limit(), 0);
        assert!(engine.set_option("Depth", "deep").is_err());
        assert!(engine.set_option("Depth", "255").is_err());
        assert_eq!(engine.depth_limit(), 0);
        assert!(engine.set_option("Hash", "64").is_err());
    }

    #[test]
    fn chooses_a_legal_action_for_side_to_move() {
        let mut game = GameState::new_game();
        let mut engine = MinimaxEngine::new(0);
        let out = engine.choose_action(&mut game).expect("search should run");
        let action = out.best_action.expect("opening has actions");
        assert!(game.is_legal_action(&action));
        assert_eq!(game.pieces[action.piece()].color, game.side_to_move());
        assert!(game.log.is_empty());
        assert_eq!(out.info_lines.len(), 1);
    }
}
