use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use wrapsnake::{game::{settle, SnakeGame}, logger, GameConfig};

#[derive(Parser)]
#[command(name = "wrapsnake")]
#[command(version, about = "Snake on a wraparound grid, in your terminal")]
struct Cli {
    /// Playfield width in pixels (a multiple of the block size)
    #[arg(long, default_value = "400")]
    width: i32,

    /// Playfield height in pixels (a multiple of the block size)
    #[arg(long, default_value = "400")]
    height: i32,

    /// Size of one cell in pixels; the snake moves one block per tick
    #[arg(long, default_value = "10")]
    block_size: i32,

    /// Seed the food placement for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the debug log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.unwrap_or_else(logger::default_log_path);
    logger::init(&log_path)?;
    log::info!("Starting wrapsnake, logging to {}", log_path.display());

    let config = GameConfig::new(cli.width, cli.height, cli.block_size);
    let mut game = SnakeGame::new(config, cli.seed)?;

    // Restore the terminal even when setup or the game loop fails
    let result = game.initialize().and_then(|()| game.run());
    let restored = game.restore();
    settle(result, restored)
}
