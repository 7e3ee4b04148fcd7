//! # Forage Main Entry Point
//!
//! Parses the CLI, initializes logging, loads the starting level and its
//! assets, and hands the session to the scene loop.

use clap::Parser;
use forage::{
    config, DirectoryLevels, ForageResult, GameDisplay, GameSession, InputHandler, LevelSource,
    SceneManager,
};
use log::info;
use macroquad::prelude::*;
use ::rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

/// Command line arguments for Forage.
#[derive(Parser, Debug)]
#[command(name = "forage")]
#[command(about = "A small 2D tile-map foraging game")]
#[command(version)]
struct Args {
    /// Random seed for entity placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory containing level files and their images
    #[arg(long, default_value = "assets")]
    levels: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Forage")]
async fn main() -> ForageResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Forage v{}", forage::VERSION);
    request_new_screen_size(1000.0, 1000.0);

    // Startup loads are fatal: without the first level and the core sprites
    // there is nothing to run.
    let mut levels = DirectoryLevels::new(&args.levels);
    let grid = levels.load_level(config::START_LEVEL)?;
    let display = GameDisplay::load(&args.levels, &grid).await?;

    let seed = args.seed.unwrap_or(12345);
    info!("Spawning entities with seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let session = GameSession::new(grid, &display.footprints(), &mut rng);

    let mut scenes = SceneManager::new(session, display, InputHandler::new(), levels, seed);
    scenes.run().await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}
