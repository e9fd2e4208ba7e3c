use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use rand::RngCore;

use block_blaster_core::*;

use crate::store::JsonFileStore;

/// Games stop here even when the policy keeps finding moves.
const MAX_MOVES: u32 = 10_000;

#[derive(Debug, clap::Args)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1, value_name = "N")]
    pub games: u32,

    /// Seed of the first game, each following game adds one (random by default)
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// High score file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Read the stored high score but never write it
    #[arg(long)]
    pub no_save: bool,

    /// Print the final board of every game
    #[arg(long)]
    pub show_board: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameReport {
    pub score: u32,
    pub moves: u32,
    pub lines_cleared: u32,
    pub best_combo: u32,
    pub new_high_score: Option<u32>,
    pub finished: bool,
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {}, {} moves, {} lines, best combo {}",
            self.score, self.moves, self.lines_cleared, self.best_combo
        )?;
        if self.new_high_score.is_some() {
            write!(f, " (new high score)")?;
        }
        if !self.finished {
            write!(f, " (stopped after {} moves)", self.moves)?;
        }
        Ok(())
    }
}

pub fn run(args: &PlayArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().next_u64());
    let mut file_store = JsonFileStore::open(args.store.clone())?;
    log::debug!("High score file: {}", file_store.path().display());

    if args.no_save {
        let mut memory = MemoryStore::with_high_score(load_high_score(&mut file_store));
        play_games(args, seed, &mut memory)?;
    } else {
        play_games(args, seed, &mut file_store)?;
    }
    Ok(())
}

/// Plays `args.games` games against `store` and returns the high score afterwards.
fn play_games<S: HighScoreStore>(args: &PlayArgs, seed: u64, store: &mut S) -> Result<u32> {
    let mut high_score = load_high_score(store);
    for index in 0..args.games {
        let game_seed = seed.wrapping_add(index.into());
        let mut engine = GameEngine::new(RandomBlockGenerator::new(game_seed), &mut *store);
        let report = play_game(&mut engine, MAX_MOVES)?;
        high_score = engine.high_score();

        println!("Game {} (seed {}): {}", index + 1, game_seed, report);
        if args.show_board {
            println!("{}", engine.grid());
        }
    }
    println!("High score: {}", high_score);
    Ok(high_score)
}

/// Starts `engine` and plays [`suggest_move`] until the game ends or `max_moves` is reached.
pub fn play_game<G, S>(engine: &mut GameEngine<G, S>, max_moves: u32) -> Result<GameReport>
where
    G: BlockGenerator,
    S: HighScoreStore,
{
    engine.start()?;

    let mut best_combo = 0;
    let mut new_high_score = None;
    while engine.moves() < max_moves {
        let Some(mv) = suggest_move(engine.grid(), engine.supply()) else {
            break;
        };
        let (row, col) = mv.anchor();
        let outcome = engine.try_place(mv.slot, row, col)?;
        log::debug!(
            "Placed {} from slot {} at ({}, {}) for {} points",
            outcome.block.shape().name(),
            mv.slot,
            mv.row,
            mv.col,
            outcome.points
        );

        best_combo = best_combo.max(outcome.combo);
        if outcome.new_high_score.is_some() {
            new_high_score = outcome.new_high_score;
        }
        if outcome.game_over {
            break;
        }
    }

    Ok(GameReport {
        score: engine.score(),
        moves: engine.moves(),
        lines_cleared: engine.lines_cleared(),
        best_combo,
        new_high_score,
        finished: engine.is_over(),
    })
}
