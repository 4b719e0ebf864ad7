//! WallGo: a two-player wall-building strategy game.
//!
//! ## Usage
//!
//! - `wallgo` - Show a demo
//! - `wallgo play` - Play from the terminal with the text front-end
//! - `wallgo demo` - Run a random self-play game and print the result

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use wallgo::constants::{BOARD_SIZE, STAY_DELAY_MS};
use wallgo::game::{Game, GameConfig};
use wallgo::playout::random_playout;
use wallgo::protocol::TextFrontEnd;

/// WallGo: move, build walls, claim territory
#[derive(Parser)]
#[command(name = "wallgo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively through the text front-end
    Play(GameArgs),
    /// Run a random self-play game
    Demo(GameArgs),
}

#[derive(Args, Clone)]
struct GameArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = BOARD_SIZE)]
    size: usize,
    /// Milliseconds before "stay in place" is allowed
    #[arg(long, default_value_t = STAY_DELAY_MS)]
    stay_delay: u64,
    /// Seed for reproducible random choices
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for GameArgs {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            stay_delay: STAY_DELAY_MS,
            seed: None,
        }
    }
}

impl GameArgs {
    fn build(&self) -> Result<Game> {
        let config = GameConfig {
            size: self.size,
            stay_delay: Duration::from_millis(self.stay_delay),
        };
        config.validate()?;
        Ok(match self.seed {
            Some(seed) => Game::with_seed(config, seed),
            None => Game::new(config),
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => {
            let mut front = TextFrontEnd::new(args.build()?);
            front.run().context("text front-end failed")
        }
        Some(Commands::Demo(args)) => run_demo(&args),
        None => run_demo(&GameArgs::default()),
    }
}

fn run_demo(args: &GameArgs) -> Result<()> {
    println!("WallGo: random self-play\n");

    let mut game = args.build()?;
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let winner = random_playout(&mut game, &mut rng, Instant::now())
        .context("playout made an illegal choice")?;

    println!("{}", game.board());
    println!("{}", game.message());
    if let (Some(winner), Some(areas)) = (winner, game.areas()) {
        println!("Areas: Red {:?}, Blue {:?}", areas.0[0], areas.0[1]);
        println!("Winner: {winner}");
    }
    Ok(())
}
