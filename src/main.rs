use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use times_tables::sound::Muted;
use times_tables::{load_config, Difficulty, GameConfig, Tables};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file overriding the per-difficulty settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Difficulty preselected on the start screen
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    difficulty: u8,

    /// Turn off the terminal bell
    #[arg(long)]
    mute: bool,

    /// Seed for a reproducible question order
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // The TUI owns stdout, so logs only go to a file when one is given.
    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let difficulty = match Difficulty::try_from(args.difficulty) {
        Ok(difficulty) => difficulty,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut tables = match args.seed {
        Some(seed) => Tables::seeded(config, seed),
        None => Tables::new(config),
    }
    .with_difficulty(difficulty);

    if args.mute {
        tables = tables.with_player(Muted);
    }

    if let Err(e) = tables.run().await {
        eprintln!("Error running game: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    tracing::info!(log = %path.display(), "times-tables starting");
    Ok(())
}
