use anyhow::Result;
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use plane_snake::game::GameConfig;
use plane_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "plane-snake")]
#[command(version, about = "Snake on a bounded plane, driven by a terminal host")]
struct Cli {
    /// Board extent along x
    #[arg(long, default_value_t = 2.5)]
    board_width: f32,

    /// Board extent along z
    #[arg(long, default_value_t = 2.5)]
    board_height: f32,

    /// Simulation timestep in milliseconds
    #[arg(long, default_value_t = 300.0)]
    tick_ms: f32,

    /// Head travel per tick, in board units
    #[arg(long, default_value_t = 0.1)]
    move_distance: f32,

    /// Accept direction requests that reverse the current heading
    #[arg(long)]
    allow_reversal: bool,

    /// Where to write the session log (the game owns the terminal)
    #[arg(long, default_value = "plane-snake.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&cli.log_file)?,
    )?;

    info!("starting plane-snake");

    let config = GameConfig {
        board_width: cli.board_width,
        board_height: cli.board_height,
        tick_interval_ms: cli.tick_ms,
        move_distance: cli.move_distance,
        reversal_guard: !cli.allow_reversal,
    };

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await
}
