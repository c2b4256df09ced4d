//! Minimal head-to-head engine match harness for local testing.
//!
//! This module runs two `Engine` implementations against each other without
//! any front-end, with an optional seeded random opening prefix.

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::engines::engine_trait::Engine;
use crate::errors::GameError;
use crate::game_state::laser_types::{Color, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    RedWin,
    BlueWin,
    /// The side to move had nothing legal to do.
    NoLegalActions(Color),
    DrawMaxPlies,
}

impl MatchOutcome {
    fn for_winner(winner: Color) -> Self {
        match winner {
            Color::Red => MatchOutcome::RedWin,
            Color::Blue => MatchOutcome::BlueWin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Color },
    NoLegalActions,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_random_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_random_plies: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub started_at: DateTime<Utc>,
    pub final_state: GameState,
    pub opening_actions: Vec<String>,
    pub played_actions: Vec<String>,
    pub red_move_count: u32,
    pub blue_move_count: u32,
    pub red_total_time_ns: u128,
    pub blue_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match.
///
/// `engine_red` moves first.
pub fn play_engine_match(
    mut engine_red: Box<dyn Engine>,
    mut engine_blue: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, GameError> {
    play_engine_match_from_state_internal(
        GameState::new_game(),
        &mut engine_red,
        &mut engine_blue,
        seed,
        config,
        true,
    )
}

/// Play a single match from a caller-provided position, skipping the random
/// opening plies.
pub fn play_engine_match_from_state(
    mut engine_red: Box<dyn Engine>,
    mut engine_blue: Box<dyn Engine>,
    start_state: GameState,
    config: MatchConfig,
) -> Result<MatchResult, GameError> {
    play_engine_match_from_state_internal(
        start_state,
        &mut engine_red,
        &mut engine_blue,
        0,
        config,
        false,
    )
}

fn play_engine_match_from_state_internal(
    mut state: GameState,
    engine_red: &mut Box<dyn Engine>,
    engine_blue: &mut Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> Result<MatchResult, GameError> {
    let started_at = Utc::now();
    engine_red.new_game();
    engine_blue.new_game();

    let opening_actions = if apply_random_opening {
        apply_seeded_random_opening(&mut state, seed, config.opening_random_plies)?
    } else {
        Vec::new()
    };

    let mut played_actions = Vec::<String>::new();
    let mut red_move_count = 0u32;
    let mut blue_move_count = 0u32;
    let mut red_total_time_ns = 0u128;
    let mut blue_total_time_ns = 0u128;

    let mut decided = None;
    for _ in 0..config.max_plies {
        if let Some(winner) = state.winner() {
            decided = Some(MatchOutcome::for_winner(winner));
            break;
        }

        let mover = state.side_to_move();
        let legal_actions = state.all_legal_actions(mover);
        if legal_actions.is_empty() {
            decided = Some(MatchOutcome::NoLegalActions(mover));
            break;
        }

        let started = Instant::now();
        let out = match mover {
            Color::Red => engine_red.choose_action(&mut state)?,
            Color::Blue => engine_blue.choose_action(&mut state)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Red => {
                red_move_count = red_move_count.saturating_add(1);
                red_total_time_ns = red_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Blue => {
                blue_move_count = blue_move_count.saturating_add(1);
                blue_total_time_ns = blue_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        // Legal actions exist here, so a pass is an engine error.
        let chosen = out.best_action.ok_or(GameError::NoLegalActions(mover))?;
        state.play_action(chosen)?;
        played_actions.push(chosen.to_string());
    }

    let outcome = decided
        .or_else(|| state.winner().map(MatchOutcome::for_winner))
        .unwrap_or(MatchOutcome::DrawMaxPlies);
    debug!("match seed {seed} finished after {} plies: {outcome:?}", state.turn);
    Ok(MatchResult {
        outcome,
        started_at,
        final_state: state,
        opening_actions,
        played_actions,
        red_move_count,
        blue_move_count,
        red_total_time_ns,
        blue_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, GameError>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_red = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (red, blue) = if player1_is_red {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            info!(
                "[series] game {}/{} seed={} red={} blue={}",
                i + 1,
                config.games,
                seed,
                red,
                blue
            );
        }

        let result = if player1_is_red {
            play_engine_match(player1_factory(), player2_factory(), seed, config.per_game.clone())?
        } else {
            play_engine_match(player2_factory(), player1_factory(), seed, config.per_game.clone())?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_red {
            (
                result.red_move_count,
                result.blue_move_count,
                result.red_total_time_ns,
                result.blue_total_time_ns,
            )
        } else {
            (
                result.blue_move_count,
                result.red_move_count,
                result.blue_total_time_ns,
                result.red_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let mapped = match result.outcome {
            MatchOutcome::RedWin | MatchOutcome::BlueWin => {
                let color = if result.outcome == MatchOutcome::RedWin {
                    Color::Red
                } else {
                    Color::Blue
                };
                let player = if (color == Color::Red) == player1_is_red {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, color }
            }
            MatchOutcome::NoLegalActions(_) => {
                stats.draws += 1;
                SeriesOutcome::NoLegalActions
            }
            MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            info!(
                "[series] game {}/{} result={:?} p1_wins={} p2_wins={} draws={} started={}",
                i + 1,
                config.games,
                mapped,
                stats.player1_wins,
                stats.player2_wins,
                stats.draws,
                result.started_at.to_rfc3339()
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

/// Play `plies` uniformly random plies in place, stopping early if the game
/// is decided or the side to move is stuck.
fn apply_seeded_random_opening(
    state: &mut GameState,
    seed: u64,
    plies: u8,
) -> Result<Vec<String>, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_actions = Vec::new();

    for _ in 0..plies {
        if state.is_over() {
            break;
        }
        let legal_actions = state.all_legal_actions(state.side_to_move());
        let Some(&chosen) = legal_actions.choose(&mut rng) else {
            break;
        };
        state.play_action(chosen)?;
        opening_actions.push(chosen.to_string());
    }

    Ok(opening_actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::EngineOutput;
    use crate::game_state::laser_types::{Orientation, Piece};

    struct PassingEngine;

    impl Engine for PassingEngine {
        fn name(&self) -> &str {
            "passing"
        }

        fn choose_action(&mut self, _game_state: &mut GameState) -> Result<EngineOutput, GameError> {
            Ok(EngineOutput::default())
        }
    }

    #[test]
    fn engine_without_an_action_fails_the_match() {
        let result = play_engine_match(
            Box::new(PassingEngine),
            Box::new(RandomEngine::seeded(1)),
            7,
            MatchConfig {
                max_plies: 4,
                opening_random_plies: 0,
            },
        );
        assert_eq!(result.err(), Some(GameError::NoLegalActions(Color::Red)));
    }

    #[test]
    fn engine_match_harness_runs_random_vs_minimax() {
        let result = play_engine_match(
            Box::new(RandomEngine::seeded(3)),
            Box::new(MinimaxEngine::new(0)),
            42,
            MatchConfig {
                max_plies: 30,
                opening_random_plies: 2,
            },
        )
        .expect("match should run");

        assert_eq!(result.opening_actions.len(), 2);
        assert!(result.red_move_count + result.blue_move_count > 0);
        assert_eq!(
            result.played_actions.len(),
            (result.red_move_count + result.blue_move_count) as usize
        );
        assert_eq!(
            result.final_state.turn as usize,
            result.opening_actions.len() + result.played_actions.len()
        );
        assert!(result.final_state.occupancy_is_consistent());
        if result.outcome == MatchOutcome::DrawMaxPlies {
            assert_eq!(result.played_actions.len(), 30);
        }
    }

    #[test]
    fn match_from_won_position_ends_at_once() {
        let mut start = GameState::with_pieces(vec![
            Piece::laser(Color::Red, 0, 0, Orientation::Down),
            Piece::queen(Color::Red, 3, 3),
            Piece::laser(Color::Blue, 7, 9, Orientation::Up),
            Piece::queen(Color::Blue, 0, 6),
        ])
        .expect("valid layout");
        let laser = start.emitters[Color::Red.index()];
        start
            .play_action(crate::game_state::laser_types::Action::Rotate {
                piece: laser,
                orientation: Orientation::Right,
            })
            .expect("legal rotation");

        let result = play_engine_match_from_state(
            Box::new(MinimaxEngine::new(1)),
            Box::new(MinimaxEngine::new(1)),
            start,
            MatchConfig::default(),
        )
        .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::RedWin);
        assert!(result.played_actions.is_empty());
    }

    #[test]
    fn engine_match_series_aggregates_results() {
        let stats = play_engine_match_series(
            || Box::new(MinimaxEngine::new(0)) as Box<dyn Engine>,
            || Box::new(RandomEngine::seeded(9)) as Box<dyn Engine>,
            MatchSeriesConfig {
                games: 3,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 12,
                    opening_random_plies: 2,
                },
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 3);
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 3);
        assert!(stats.player1_avg_move_time_ms >= 0.0);
        assert!(stats.overall_avg_move_time_ms >= 0.0);
        assert!(stats.report().starts_with("games=3 "));
    }
}
