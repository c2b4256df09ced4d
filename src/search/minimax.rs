//! Depth-limited minimax with alpha-beta pruning over a live game.
//!
//! The search never copies the position: each explored action is applied,
//! its beam fired, the subtree searched, and the ply undone again through a
//! `PlyGuard`. Levels alternate strictly between the searching color
//! (maximising) and its adversary (minimising), independent of the game's
//! own turn counter. Leaves are scored from the searching color's point of
//! view at every depth.

use std::ops::{Deref, DerefMut};

use log::{debug, error};

use crate::errors::GameError;
use crate::game_state::laser_types::*;
use crate::search::board_scoring::{BoardScorer, Score, SCORE_INFINITY};

/// Largest accepted `depth_limit`; deeper requests are clamped.
pub const MAX_DEPTH_LIMIT: u8 = 32;

/// Parse a depth option value, rejecting anything above `MAX_DEPTH_LIMIT`.
pub fn parse_depth_limit(value: &str) -> Result<u8, String> {
    match value.trim().parse::<u8>() {
        Ok(depth) if depth <= MAX_DEPTH_LIMIT => Ok(depth),
        _ => Err(format!(
            "invalid Depth value '{value}' (expected 0..={MAX_DEPTH_LIMIT})"
        )),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Deepest level that still expands actions. Level 0 is the root, so a
    /// limit of 1 looks at the searching color's action and the reply.
    pub depth_limit: u8,
}

impl SearchConfig {
    /// `depth_limit` clamped to `MAX_DEPTH_LIMIT`.
    pub fn effective_depth_limit(&self) -> u8 {
        self.depth_limit.min(MAX_DEPTH_LIMIT)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth_limit: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_action: Option<Action>,
    pub best_score: Score,
    pub nodes: u64,
    /// Deepest level at which actions were expanded.
    pub deepest_level: u8,
}

/// One applied-and-fired ply that is undone when the guard drops, including
/// on early `?` returns out of the subtree.
pub struct PlyGuard<'g> {
    game_state: &'g mut GameState,
}

impl<'g> PlyGuard<'g> {
    pub fn enter(
        game_state: &'g mut GameState,
        action: Action,
        color: Color,
    ) -> Result<Self, GameError> {
        game_state.apply_action(action)?;
        game_state.fire_beam(color);
        Ok(Self { game_state })
    }
}

impl Deref for PlyGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.game_state
    }
}

impl DerefMut for PlyGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.game_state
    }
}

impl Drop for PlyGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.game_state.undo_last_event() {
            error!("search unwind failed: {err}");
            debug_assert!(std::thread::panicking(), "search unwind failed: {err}");
        }
    }
}

/// Choose an action for `color`.
///
/// Ties keep the first action in enumeration order. A position with no
/// legal action for `color`, or one already decided, yields
/// `best_action: None` and its static score.
pub fn minimax_search<S: BoardScorer>(
    game_state: &mut GameState,
    color: Color,
    scorer: &S,
    config: SearchConfig,
) -> Result<SearchResult, GameError> {
    let baseline = game_state.log_depth();
    let mut searcher = Searcher {
        color,
        scorer,
        depth_limit: config.effective_depth_limit(),
        nodes: 0,
        deepest_level: 0,
    };

    let (best_score, best_action) =
        searcher.minimax(game_state, 0, true, -SCORE_INFINITY, SCORE_INFINITY)?;
    debug_assert_eq!(game_state.log_depth(), baseline);

    debug!(
        "{color} search depth {} nodes {} best {:?} score {best_score}",
        config.effective_depth_limit(), searcher.nodes, best_action
    );
    Ok(SearchResult {
        best_action,
        best_score,
        nodes: searcher.nodes,
        deepest_level: searcher.deepest_level,
    })
}

struct Searcher<'s, S> {
    color: Color,
    scorer: &'s S,
    depth_limit: u8,
    nodes: u64,
    deepest_level: u8,
}

impl<S: BoardScorer> Searcher<'_, S> {
    fn minimax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<(Score, Option<Action>), GameError> {
        self.nodes += 1;

        if depth > self.depth_limit || game_state.is_over() {
            return Ok((self.scorer.score(game_state, self.color), None));
        }

        let mover = if maximizing {
            self.color
        } else {
            self.color.opposite()
        };
        let actions = game_state.all_legal_actions(mover);
        if actions.is_empty() {
            return Ok((self.scorer.score(game_state, self.color), None));
        }
        self.deepest_level = self.deepest_level.max(depth);

        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };
        let mut best_action = None;

        for action in actions {
            let evaluation = {
                let mut ply = PlyGuard::enter(game_state, action, mover)?;
                self.minimax(&mut ply, depth + 1, !maximizing, alpha, beta)?.0
            };

            if maximizing {
                if evaluation > best {
                    best = evaluation;
                    best_action = Some(action);
                }
                alpha = alpha.max(evaluation);
            } else {
                if evaluation < best {
                    best = evaluation;
                    best_action = Some(action);
                }
                beta = beta.min(evaluation);
            }
            if beta < alpha {
                break;
            }
        }

        Ok((best, best_action))
    }
}
