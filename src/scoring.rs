//! Territory scoring.
//!
//! Each piece claims every cell it can reach under the final walls, ignoring
//! other pieces. A player's score is the sum over both pieces, so a region
//! shared by a player's two pieces counts twice.

use std::fmt;

use crate::board::{Cell, PiecePositions, Player, Walls};
use crate::constants::{PIECES_PER_PLAYER, PLAYERS};

/// Final outcome of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winner {
    Player(Player),
    Tie,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Player(p) => write!(f, "{p}"),
            Winner::Tie => f.write_str("tie"),
        }
    }
}

/// Per-piece territory sizes indexed by `[player][piece]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Areas(pub [[usize; PIECES_PER_PLAYER]; PLAYERS]);

impl Areas {
    pub fn total(&self, player: Player) -> usize {
        self.0[player.index()].iter().sum()
    }

    pub fn totals(&self) -> [usize; PLAYERS] {
        Player::ALL.map(|p| self.total(p))
    }

    /// Strictly greater total wins; equal totals tie.
    pub fn winner(&self) -> Winner {
        let red = self.total(Player::Red);
        let blue = self.total(Player::Blue);
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Winner::Player(Player::Red),
            std::cmp::Ordering::Less => Winner::Player(Player::Blue),
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

/// Count the cells in the wall-bounded region containing `start`.
pub fn area(walls: &Walls, start: Cell) -> usize {
    let size = walls.size();
    debug_assert!(
        start.0 < size && start.1 < size,
        "cell {start:?} is off a {size}x{size} board"
    );
    let mut stack = vec![start];
    let mut visited = vec![false; size * size];
    let mut count = 0;

    while let Some(cell) = stack.pop() {
        let i = cell.0 * size + cell.1;
        if visited[i] {
            continue;
        }
        visited[i] = true;
        count += 1;
        for n in walls.open_neighbors(cell) {
            if !visited[n.0 * size + n.1] {
                stack.push(n);
            }
        }
    }
    count
}

/// Territory of every piece.
pub fn score(walls: &Walls, pieces: &PiecePositions) -> Areas {
    Areas((*pieces).map(|own| own.map(|cell| area(walls, cell))))
}
