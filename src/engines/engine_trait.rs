//! Engine abstraction used by the controller and the match harness.
//!
//! Engines receive the live game mutably because search explores lines in
//! place; every engine must hand the state back exactly as it found it.

use crate::errors::GameError;
use crate::game_state::laser_types::{Action, GameState};

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_action: Option<Action>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// Pick an action for the side to move. `best_action` is `None` only
    /// when that side has nothing legal to do or the game is decided.
    fn choose_action(&mut self, game_state: &mut GameState) -> Result<EngineOutput, GameError>;
}
