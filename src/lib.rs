//! Crate root module declarations for the laser chess engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! beam resolution, search, engines, the controller and text front-end, and
//! utility helpers) so binaries, benches and external tooling can import
//! stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod game_state;
    pub mod laser_rules;
    pub mod laser_types;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod beam {
    pub mod beam_resolver;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod controller {
    pub mod game_controller;
}

pub mod protocol {
    pub mod text_loop;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod render_game_state;
}
