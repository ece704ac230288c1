//! tetrs-replay - headless driver for the TETRS engine
//!
//! Plays a recorded replay (or an idle game when none is given) and prints
//! the outcome as JSON.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tetrs_engine::GameMode;
use tetrs_engine::replay::{DriverOptions, Replay, run_replay};
use tetrs_engine::settings::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Replay a recorded TETRS game headlessly")]
struct Cli {
    /// Replay file (JSON). Without one the game runs with no input.
    replay: Option<PathBuf>,

    /// Game mode when no replay is given
    #[arg(long)]
    mode: Option<GameMode>,

    /// Bag seed, used when the replay doesn't carry one
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Stop after this many milliseconds of game time
    #[arg(long)]
    max_ms: Option<u64>,

    /// Write the default settings file and exit
    #[arg(long)]
    write_default_config: bool,
}

/// Get the tetrs temp directory, creating it if needed
fn tetrs_temp_dir() -> anyhow::Result<PathBuf> {
    let dir = std::env::temp_dir().join("tetrs");
    std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.write_default_config {
        let path = Settings::default().save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let settings = Settings::load();

    // Generate session ID for this run
    let session_id: u32 = rand::random();
    let tetrs_dir = tetrs_temp_dir()?;
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&tetrs_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log.filter)
            .with_context(|| format!("Bad log filter '{}'", settings.log.filter))?,
    };
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "tetrs-replay starting, session={:08x}, log={}",
        session_id,
        tetrs_dir.join(&log_file).display()
    );

    let replay = match &cli.replay {
        Some(path) => Replay::load(path)?,
        None => Replay {
            mode: cli.mode.unwrap_or(settings.game.mode),
            ..Replay::default()
        },
    };

    let options = DriverOptions {
        seed: cli.seed.or(settings.game.seed).unwrap_or_else(rand::random),
        tick_ms: cli.tick_ms.unwrap_or(settings.driver.tick_ms),
        max_ms: cli.max_ms.unwrap_or(settings.driver.max_ms),
    };

    let outcome = run_replay(&replay, options);
    let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
    println!("{json}");

    Ok(())
}
