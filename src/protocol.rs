//! Line-oriented text front-end.
//!
//! Lets the engine be played from a terminal or driven by a script. Each line
//! holds one command with an optional numeric id in front. Replies start with
//! `=` on success or `?` on rejection, followed by the id and the text, and are
//! terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `click <row> <col>` - Click a cell (place, select, or move depending on phase)
//! - `wall <h|v> <row> <col>` - Place a horizontal or vertical wall segment
//! - `random` - Randomize piece placement during setup
//! - `reset` - Start a new game
//! - `show` - Print the board
//! - `status` - Print phase, current player, and status message
//! - `moves` - List valid destinations for the selected piece
//! - `score` - Print the final score once the game is over
//! - `help` - List commands
//! - `quit` - Exit
//!
//! ## Example
//!
//! ```ignore
//! use wallgo::game::{Game, GameConfig};
//! use wallgo::protocol::TextFrontEnd;
//! let mut front = TextFrontEnd::new(Game::new(GameConfig::default()));
//! front.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;

use crate::board::{Cell, WallPos};
use crate::game::Game;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "click", "help", "moves", "quit", "random", "reset", "score", "show", "status", "wall",
];

/// Text front-end state.
pub struct TextFrontEnd {
    game: Game,
}

impl TextFrontEnd {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read commands from stdin and answer on stdout until `quit` or EOF.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.serve(stdin.lock(), &mut stdout)
    }

    /// Command loop over arbitrary reader and writer.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            self.game.update(Instant::now());
            let (success, message) = self.execute(&command, args, Instant::now());

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(out, "{prefix}{id_str} {message}\n")?;
            out.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_cell(args: &[&str]) -> Option<Cell> {
        match args {
            [row, col, ..] => Some((row.parse().ok()?, col.parse().ok()?)),
            _ => None,
        }
    }

    fn parse_wall(args: &[&str]) -> Option<WallPos> {
        let (kind, rest) = args.split_first()?;
        let (row, col) = Self::parse_cell(rest)?;
        match kind.to_lowercase().as_str() {
            "h" | "horizontal" => Some(WallPos::horizontal(row, col)),
            "v" | "vertical" => Some(WallPos::vertical(row, col)),
            _ => None,
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str], now: Instant) -> (bool, String) {
        match command {
            "help" => (true, KNOWN_COMMANDS.join("\n")),

            "quit" => (true, String::new()),

            "reset" => {
                self.game.reset();
                (true, self.game.message().to_string())
            }

            "random" => self.outcome(|g| g.randomize_setup()),

            "click" => match Self::parse_cell(args) {
                Some(cell) => self.outcome(|g| g.click(cell, now)),
                None => (false, "usage: click <row> <col>".to_string()),
            },

            "wall" => match Self::parse_wall(args) {
                Some(pos) => self.outcome(|g| g.place_wall(pos)),
                None => (false, "usage: wall <h|v> <row> <col>".to_string()),
            },

            "show" => (true, format!("\n{}", self.game.board())),

            "status" => (
                true,
                format!(
                    "{} {} {}",
                    self.game.phase().kind().name(),
                    self.game.current_player(),
                    self.game.message()
                ),
            ),

            "moves" => {
                let moves: Vec<String> = self
                    .game
                    .valid_moves()
                    .iter()
                    .map(|(r, c)| format!("{r},{c}"))
                    .collect();
                (true, moves.join(" "))
            }

            "score" => match (self.game.winner(), self.game.scores()) {
                (Some(winner), Some([red, blue])) => {
                    (true, format!("Red {red} Blue {blue} winner {winner}"))
                }
                _ => (false, "game is not over".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn outcome<F>(&mut self, action: F) -> (bool, String)
    where
        F: FnOnce(&mut Game) -> Result<(), crate::game::RuleViolation>,
    {
        let ok = action(&mut self.game).is_ok();
        (ok, self.game.message().to_string())
    }
}
