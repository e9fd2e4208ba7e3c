//! Headless driver for the block-blaster engine.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use block_blaster_core::HighScoreStore;

mod play;
mod store;

use play::PlayArgs;
use store::JsonFileStore;

/// Block-placement puzzle on an 8×8 grid, played by a greedy policy.
#[derive(Debug, Parser)]
#[command(name = "block-blaster", version, long_about = None)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one or more games with suggested moves
    Play(PlayArgs),

    /// Show or clear the stored high score
    HighScore {
        /// Delete the stored high score
        #[arg(long)]
        reset: bool,

        /// High score file (defaults to the user config directory)
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose.tracing_level_filter());

    match cli.command {
        Command::Play(args) => play::run(&args),
        Command::HighScore { reset, store } => high_score(reset, store),
    }
}

/// `RUST_LOG` directives refine the level picked with `-v`/`-q`.
fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn high_score(reset: bool, path: Option<PathBuf>) -> Result<()> {
    let mut store = JsonFileStore::open(path)?;

    if reset {
        if store.clear()? {
            println!("Cleared high score at {}", store.path().display());
        } else {
            println!("No high score stored at {}", store.path().display());
        }
        return Ok(());
    }

    match store.load()? {
        Some(high_score) => println!("High score: {}", high_score),
        None => println!("No high score yet"),
    }
    Ok(())
}
