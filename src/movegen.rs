//! Move generation.
//!
//! A turn moves the selected piece up to two orthogonal steps: one step, two
//! steps straight, or an L (one step then a quarter turn). After the stay delay
//! the piece may also remain where it is. Every step must stay on the board,
//! land on an empty cell, and not cross a wall.

use std::collections::BTreeSet;

use crate::board::{Board, Cell, Direction};

/// Destination cells for one turn.
pub type MoveSet = BTreeSet<Cell>;

/// Check whether a single step from `from` to `to` is legal.
///
/// `to` must be on the board and either empty or equal to `from`. When the two
/// cells differ in one coordinate, no wall may lie on any grid line between
/// them.
pub fn is_valid_move(board: &Board, from: Cell, to: Cell) -> bool {
    if !board.in_bounds(to) {
        return false;
    }
    if to != from && board.is_occupied(to) {
        return false;
    }
    let walls = board.walls();
    if from.0 == to.0 {
        let (lo, hi) = (from.1.min(to.1), from.1.max(to.1));
        (lo..hi).all(|c| !walls.between((from.0, c), (from.0, c + 1)))
    } else if from.1 == to.1 {
        let (lo, hi) = (from.0.min(to.0), from.0.max(to.0));
        (lo..hi).all(|r| !walls.between((r, from.1), (r + 1, from.1)))
    } else {
        true
    }
}

/// One legal step in direction `dir`, if any.
fn step(board: &Board, from: Cell, dir: Direction) -> Option<Cell> {
    dir.step(from, board.size())
        .filter(|&to| is_valid_move(board, from, to))
}

/// Generate every destination reachable by the piece on `origin` this turn.
///
/// Occupied intermediate cells block their branch entirely.
pub fn generate_moves(board: &Board, origin: Cell, stay_available: bool) -> MoveSet {
    let mut moves = MoveSet::new();
    if stay_available {
        moves.insert(origin);
    }

    let one_step: Vec<(Cell, Direction)> = Direction::ALL
        .into_iter()
        .filter_map(|d| step(board, origin, d).map(|c| (c, d)))
        .collect();

    for &(mid, dir) in &one_step {
        moves.insert(mid);

        // Straight
        if let Some(to) = step(board, mid, dir) {
            moves.insert(to);
        }

        // L-shaped
        for turn in Direction::ALL {
            if turn == dir || turn == dir.reverse() {
                continue;
            }
            if let Some(to) = step(board, mid, turn) {
                moves.insert(to);
            }
        }
    }

    moves
}
