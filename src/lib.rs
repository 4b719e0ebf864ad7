//! WallGo: a two-player wall-building strategy game engine.
//!
//! Each player owns two pieces on a 7x7 board. On a turn a player moves one
//! piece up to two steps (straight or L-shaped, or stays after a short delay)
//! and then builds a wall segment next to it. Walls are permanent. The game
//! ends once no piece can reach any other piece; each player then scores the
//! area their pieces can still reach.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, timing and snapping defaults
//! - [`board`] - Cells, pieces and wall storage
//! - [`movegen`] - Legal destinations for one turn
//! - [`connectivity`] - Reachability and game-over detection
//! - [`scoring`] - Territory flood fill and winner selection
//! - [`game`] - Turn/phase state machine and snapshot surface
//! - [`input`] - Pixel to cell and wall-segment snapping
//! - [`playout`] - Random self-play
//! - [`protocol`] - Text front-end
//!
//! ## Example
//!
//! ```
//! use std::time::Instant;
//! use wallgo::board::WallPos;
//! use wallgo::game::{Game, GameConfig};
//!
//! let mut game = Game::with_seed(GameConfig::default(), 1);
//! let now = Instant::now();
//! for cell in [(0, 0), (6, 6), (0, 1), (6, 5)] {
//!     game.click(cell, now).unwrap();
//! }
//!
//! let player = game.current_player();
//! let from = game.board().piece(player, 0).unwrap();
//! game.click(from, now).unwrap();
//! let to = *game.valid_moves().iter().next().unwrap();
//! game.click(to, now).unwrap();
//! game.place_wall(WallPos::around(to)[0]).ok();
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod connectivity;
pub mod constants;
pub mod game;
pub mod input;
pub mod movegen;
pub mod playout;
pub mod protocol;
pub mod scoring;
