//! Headless driver for the kaboom engine: replays scripted games, simulates random
//! players and prints debug boards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use kaboom_core::{Game, GameConfig, GameEvent, GameState};
use tracing_subscriber::EnvFilter;

use crate::modes::ModeTable;
use crate::script::{Move, apply_moves, parse_moves};

mod modes;
mod script;
mod simulate;

#[derive(Parser, Debug)]
#[command(name = "kaboom", version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// TOML file with extra `[modes.<name>]` tables
    #[arg(long, global = true)]
    modes: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available modes
    Modes,
    /// Print every cell value of a generated board
    Solution {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Apply a comma separated move list, e.g. "o 0 0, f 1 2, c, v"
    Play {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long)]
        moves: String,
    },
    /// Play random games and report how many were won
    Simulate {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long, default_value_t = 100)]
        games: u32,
    },
}

#[derive(clap::Args, Debug)]
struct BoardArgs {
    /// Preset or file mode name, defaults to easy
    #[arg(short, long, conflicts_with = "rows")]
    mode: Option<String>,
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<u8>,
    #[arg(long, requires = "rows")]
    cols: Option<u8>,
    #[arg(long, requires = "rows")]
    mines: Option<u16>,
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl BoardArgs {
    fn config(&self, table: &ModeTable) -> Result<GameConfig> {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => GameConfig::new(rows, cols, mines)
                .with_context(|| format!("invalid board {rows}x{cols} with {mines} mines")),
            _ => table.resolve(self.mode.as_deref().unwrap_or("easy")),
        }
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn init_logging(level: log::LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose.log_level_filter());

    let table = match &cli.modes {
        Some(path) => ModeTable::load(path)?,
        None => ModeTable::default(),
    };

    match cli.command {
        Command::Modes => {
            for (name, config) in table.iter() {
                println!("{name:<10} {config}");
            }
        }
        Command::Solution { board } => {
            let config = board.config(&table)?;
            let seed = board.seed();
            let game = Game::with_seed(config, seed);
            println!("seed {seed}, {config}");
            print!("{}", game.board().solution_view());
        }
        Command::Play { board, moves } => {
            let config = board.config(&table)?;
            let moves = parse_moves(&moves)?;
            play(Game::with_seed(config, board.seed()), &moves);
        }
        Command::Simulate { board, games } => {
            let config = board.config(&table)?;
            let summary = simulate::run(config, games, board.seed());
            println!(
                "{} games on {}: {} won, {} lost, {} notifications",
                summary.games, config, summary.wins, summary.losses, summary.notifications
            );
        }
    }

    Ok(())
}

fn play(mut game: Game, moves: &[Move]) {
    log::info!("Playing seed {:?}", game.seed());
    game.subscribe(|event| match event {
        GameEvent::CellChanged { row, col, cell } => {
            log::info!("({}, {}) is now {:?}", row, col, cell.status)
        }
        GameEvent::GameEnded { has_won } => log::info!("game ended, won: {}", has_won),
    });

    let state = apply_moves(&mut game, moves);

    print!("{}", game.board().player_view());
    let state = match state {
        GameState::InProgress => "in progress",
        GameState::Won => "won",
        GameState::Lost => "lost",
    };
    println!("{state}, {} mines left", game.mines_left());
}
