//! Command and query surface for a board front-end.
//!
//! A front-end (the text loop, or any renderer) drives the game through
//! square clicks, rotation requests and AI-turn requests, and reads back
//! occupancy, highlights, the selection and the last beam. Every state
//! change is followed by a push notification to the registered listeners.

use std::fmt;
use std::mem;

use log::{debug, info};

use crate::beam::beam_resolver::BeamPath;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::Engine;
use crate::errors::GameError;
use crate::game_state::board::Board;
use crate::game_state::laser_types::*;
use crate::move_generation::legal_move_apply::PlyReport;
use crate::move_generation::legal_move_generator::rotation_for_request;
use crate::search::minimax::parse_depth_limit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Ai,
}

impl PlayerKind {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "human" | "h" => Some(PlayerKind::Human),
            "ai" | "engine" => Some(PlayerKind::Ai),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Ai => write!(f, "ai"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub ai_depth_limit: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { ai_depth_limit: 1 }
    }
}

/// What a square click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An own piece is now selected and its destinations highlighted.
    Selected(PieceId),
    /// The selected piece moved to the clicked square.
    Played(PlyReport),
    /// An empty, non-highlighted square was clicked.
    Cleared,
}

type Listener = Box<dyn FnMut(&GameController)>;

pub struct GameController {
    config: ControllerConfig,
    game: GameState,
    players: [PlayerKind; 2],
    engines: [Option<Box<dyn Engine>>; 2],
    selected: Option<PieceId>,
    message: String,
    engine_info: Vec<String>,
    listeners: Vec<Listener>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl GameController {
    /// Controller holding a fresh human-vs-human game.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            game: GameState::new_game(),
            players: [PlayerKind::Human; 2],
            engines: [None, None],
            selected: None,
            message: String::new(),
            engine_info: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&GameController) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Throw away the current game and start a new one.
    pub fn start(&mut self, red: PlayerKind, blue: PlayerKind) {
        info!("starting new game: red {red}, blue {blue}");
        self.game = GameState::new_game();
        self.players = [red, blue];
        self.engines = [self.engine_for(red), self.engine_for(blue)];
        self.selected = None;
        self.engine_info.clear();
        self.message = format!("new game, {} to move", self.game.side_to_move());
        self.notify();
    }

    fn engine_for(&self, kind: PlayerKind) -> Option<Box<dyn Engine>> {
        match kind {
            PlayerKind::Human => None,
            PlayerKind::Ai => Some(Box::new(MinimaxEngine::new(self.config.ai_depth_limit))),
        }
    }

    /// Select a piece, complete a move, or clear the selection.
    ///
    /// Clicking a highlighted square moves the selected piece there. Clicking
    /// a piece of the side to move selects it. Anything else drops the
    /// current selection; clicking an opponent piece is also reported as an
    /// error.
    pub fn click_square(&mut self, row: i16, column: i16) -> Result<ClickOutcome, GameError> {
        let cell = Cell::checked(row, column).ok_or(GameError::OutOfBounds { row, column })?;
        self.ensure_human_turn()?;

        if let Some(selected) = self.selected {
            if self.game.board.square(cell).highlighted {
                let report = self.game.play_action(Action::Move {
                    piece: selected,
                    to: cell,
                })?;
                self.finish_ply(&report);
                return Ok(ClickOutcome::Played(report));
            }
        }

        self.clear_selection();
        let to_move = self.game.side_to_move();
        let target = self.game.piece_at(cell).map(|(id, piece)| (id, piece.color));
        let outcome = match target {
            None => Ok(ClickOutcome::Cleared),
            Some((id, owner)) if owner != to_move => Err(GameError::NotYourPiece {
                piece: id,
                owner,
                to_move,
            }),
            Some((id, _)) => {
                for to in self.game.legal_moves(id) {
                    self.game.board.set_highlight(to, true);
                }
                self.selected = Some(id);
                debug!("selected {}", self.game.pieces[id]);
                Ok(ClickOutcome::Selected(id))
            }
        };
        self.message = match &outcome {
            Ok(ClickOutcome::Selected(id)) => format!("selected {}", self.game.pieces[*id]),
            Ok(_) => String::new(),
            Err(err) => err.to_string(),
        };
        self.notify();
        outcome
    }

    /// Rotate the selected piece one step. The ply is played immediately.
    pub fn rotate_selected(&mut self, direction: RotationDirection) -> Result<PlyReport, GameError> {
        self.ensure_human_turn()?;
        let id = self.selected.ok_or(GameError::NothingSelected)?;
        let piece = self.game.piece(id)?;
        let orientation = rotation_for_request(piece, direction).ok_or(
            GameError::IllegalRotation {
                piece: id,
                orientation: piece.orientation,
            },
        )?;

        let report = self.game.play_action(Action::Rotate { piece: id, orientation })?;
        self.finish_ply(&report);
        Ok(report)
    }

    /// Let the engine seated for the side to move play one ply.
    pub fn play_ai_turn(&mut self) -> Result<PlyReport, GameError> {
        let color = self.game.side_to_move();
        if let Some(winner) = self.game.winner() {
            return Err(GameError::GameOver { winner });
        }
        let engine = self.engines[color.index()]
            .as_mut()
            .ok_or(GameError::NotAnAiTurn(color))?;

        let out = engine.choose_action(&mut self.game)?;
        let action = out.best_action.ok_or(GameError::NoLegalActions(color))?;
        self.engine_info = out.info_lines;

        let report = self.game.play_action(action)?;
        self.finish_ply(&report);
        Ok(report)
    }

    /// Forward an option to every seated engine and remember the depth for
    /// engines created by later games.
    pub fn set_engine_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            self.config.ai_depth_limit = parse_depth_limit(value)?;
        } else if self.engines.iter().all(Option::is_none) {
            return Err(format!("unknown option '{name}'"));
        }
        for engine in self.engines.iter_mut().flatten() {
            engine.set_option(name, value)?;
        }
        Ok(())
    }

    fn ensure_human_turn(&self) -> Result<(), GameError> {
        if let Some(winner) = self.game.winner() {
            return Err(GameError::GameOver { winner });
        }
        let color = self.game.side_to_move();
        match self.players[color.index()] {
            PlayerKind::Human => Ok(()),
            PlayerKind::Ai => Err(GameError::NotAHumanTurn(color)),
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.game.board.clear_highlights();
    }

    fn finish_ply(&mut self, report: &PlyReport) {
        self.clear_selection();
        self.message = match report.winner {
            Some(winner) => format!("{} played {}, {winner} wins", report.color, report.action),
            None => format!(
                "{} played {}, beam {}; {} to move",
                report.color,
                report.action,
                report.beam.outcome,
                self.game.side_to_move()
            ),
        };
        self.notify();
    }

    fn notify(&mut self) {
        let mut listeners = mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(self);
        }
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn board(&self) -> &Board {
        &self.game.board
    }

    pub fn side_to_move(&self) -> Color {
        self.game.side_to_move()
    }

    pub fn player(&self, color: Color) -> PlayerKind {
        self.players[color.index()]
    }

    pub fn is_ai_turn(&self) -> bool {
        self.player(self.side_to_move()) == PlayerKind::Ai && !self.game.is_over()
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    pub fn highlighted_cells(&self) -> Vec<Cell> {
        self.game.board.highlighted_cells()
    }

    pub fn last_beam(&self) -> Option<&BeamPath> {
        self.game.last_beam.as_ref()
    }

    pub fn winner(&self) -> Option<Color> {
        self.game.winner()
    }

    /// Status line describing the last command.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Info lines returned by the engine for the last AI turn.
    pub fn engine_info(&self) -> &[String] {
        &self.engine_info
    }

    pub fn ai_depth_limit(&self) -> u8 {
        self.config.ai_depth_limit
    }
}
