//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`
//!
//! Per-game progress is logged at `info`, so pair `--verbose` with
//! `RUST_LOG=info`.

use laser_chess::engines::engine_minimax::MinimaxEngine;
use laser_chess::engines::engine_random::RandomEngine;
use laser_chess::engines::engine_trait::Engine;
use laser_chess::errors::GameError;
use laser_chess::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

fn main() -> Result<(), GameError> {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    // Customize these two lines to experiment with different engines and depths.
    let player1 = || Box::new(MinimaxEngine::new(1)) as Box<dyn Engine>;
    let player2 = || Box::new(RandomEngine::new()) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_plies: 200,
                opening_random_plies: 2,
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
