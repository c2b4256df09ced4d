//! Line-oriented text front-end and command loop.
//!
//! Reads one command per line, drives a `GameController`, and writes the
//! board and status back as plain text. Commands:
//!
//! `new <human|ai> <human|ai>`, `click <row> <col>`, `cw`, `ccw`, `ai`,
//! `show`, `beam`, `actions`, `setoption <name> <value>`, `help`, `quit`.

use std::io::{self, BufRead, Write};

use crate::controller::game_controller::{ClickOutcome, ControllerConfig, GameController, PlayerKind};
use crate::errors::GameError;
use crate::game_state::laser_types::RotationDirection;
use crate::move_generation::legal_move_apply::PlyReport;
use crate::utils::render_game_state::{render_beam, render_game_state};

const HELP: &[&str] = &[
    "new <human|ai> <human|ai>  start a game (red first)",
    "click <row> <col>          select a piece or move the selection",
    "cw | ccw                   rotate the selected piece",
    "ai                         let the engine play for the side to move",
    "show                       print the board",
    "beam                       print the last beam path",
    "actions                    list legal actions for the side to move",
    "setoption <name> <value>   set an engine option (e.g. depth 2)",
    "quit                       leave",
];

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut front_end = TextLoop::new(ControllerConfig::default());

    writeln!(stdout, "{}", render_game_state(front_end.controller.game()))?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = front_end.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct TextLoop {
    controller: GameController,
}

impl TextLoop {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            controller: GameController::new(config),
        }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Execute one command line. Returns `true` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();

        match cmd.as_str() {
            "new" => {
                let red = parts.next().map_or(Some(PlayerKind::Human), PlayerKind::parse);
                let blue = parts.next().map_or(Some(PlayerKind::Human), PlayerKind::parse);
                match (red, blue) {
                    (Some(red), Some(blue)) => {
                        self.controller.start(red, blue);
                        writeln!(out, "{}", self.controller.message())?;
                        writeln!(out, "{}", render_game_state(self.controller.game()))?;
                    }
                    _ => writeln!(out, "error: usage: new <human|ai> <human|ai>")?,
                }
            }
            "click" => {
                let row = parts.next().and_then(|t| t.parse::<i16>().ok());
                let column = parts.next().and_then(|t| t.parse::<i16>().ok());
                let (Some(row), Some(column)) = (row, column) else {
                    writeln!(out, "error: usage: click <row> <col>")?;
                    return Ok(false);
                };
                match self.controller.click_square(row, column) {
                    Ok(ClickOutcome::Played(report)) => self.write_ply(&report, out)?,
                    Ok(ClickOutcome::Selected(_)) => {
                        writeln!(out, "{}", self.controller.message())?;
                        let moves = self
                            .controller
                            .highlighted_cells()
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>();
                        writeln!(out, "moves: {}", moves.join(" "))?;
                    }
                    Ok(ClickOutcome::Cleared) => writeln!(out, "selection cleared")?,
                    Err(err) => write_error(&err, out)?,
                }
            }
            "cw" | "ccw" => {
                let direction = if cmd == "cw" {
                    RotationDirection::Clockwise
                } else {
                    RotationDirection::AntiClockwise
                };
                match self.controller.rotate_selected(direction) {
                    Ok(report) => self.write_ply(&report, out)?,
                    Err(err) => write_error(&err, out)?,
                }
            }
            "ai" => match self.controller.play_ai_turn() {
                Ok(report) => {
                    for line in self.controller.engine_info() {
                        writeln!(out, "{line}")?;
                    }
                    self.write_ply(&report, out)?;
                }
                Err(err) => write_error(&err, out)?,
            },
            "show" => {
                writeln!(out, "{}", render_game_state(self.controller.game()))?;
            }
            "beam" => match self.controller.last_beam() {
                Some(beam) => writeln!(out, "{}", render_beam(beam))?,
                None => writeln!(out, "no beam fired yet")?,
            },
            "actions" => {
                let game = self.controller.game();
                let actions = game.all_legal_actions(game.side_to_move());
                writeln!(out, "{} legal actions for {}", actions.len(), game.side_to_move())?;
                for action in actions {
                    writeln!(out, "  {action}")?;
                }
            }
            "setoption" => {
                let name = parts.next().unwrap_or_default();
                let value = parts.collect::<Vec<_>>().join(" ");
                match self.controller.set_engine_option(name, &value) {
                    Ok(()) => writeln!(out, "option {name} = {value}")?,
                    Err(err) => writeln!(out, "error: setoption: {err}")?,
                }
            }
            "help" => {
                for line in HELP {
                    writeln!(out, "{line}")?;
                }
            }
            "quit" | "exit" => {
                return Ok(true);
            }
            _ => {
                writeln!(out, "error: unknown command '{cmd}', try 'help'")?;
            }
        }

        Ok(false)
    }

    fn write_ply(&self, report: &PlyReport, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render_beam(&report.beam))?;
        writeln!(out, "{}", render_game_state(self.controller.game()))?;
        writeln!(out, "{}", self.controller.message())
    }
}

fn write_error(err: &GameError, out: &mut impl Write) -> io::Result<()> {
    if err.is_invalid_command() {
        writeln!(out, "rejected: {err}")
    } else {
        writeln!(out, "error: {err}")
    }
}
