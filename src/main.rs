use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use duel_snake::game::{GameConfig, GameEngine};
use duel_snake::modes::PlayMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "duel_snake")]
#[command(version, about = "Terminal Snake: solo, versus bot or versus player")]
struct Cli {
    /// JSON file overriding any subset of the game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Apples on the board (adjustable again in the menu)
    #[arg(long)]
    apples: Option<usize>,

    /// Cells per side of the grid
    #[arg(long)]
    grid: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "duel_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

impl Cli {
    /// Defaults, then the config file, then individual flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(grid) = self.grid {
            config.grid_size = grid;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(apples) = self.apples {
            config.default_apples = apples;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!(
        "grid {}x{}, tick {} ms, {} fps",
        config.grid_size, config.grid_size, config.tick_ms, config.fps
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut play_mode = PlayMode::new(engine);
    play_mode.run().await?;

    Ok(())
}
