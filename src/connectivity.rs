//! Reachability under the current walls.
//!
//! Pieces never block reachability; only wall topology matters.

use std::collections::VecDeque;

use log::debug;

use crate::board::{Cell, PiecePositions, Walls};

/// Breadth-first search from `start` to `target` across open grid edges.
pub fn reachable(walls: &Walls, start: Cell, target: Cell) -> bool {
    let size = walls.size();
    debug_assert!(
        start.0 < size && start.1 < size && target.0 < size && target.1 < size,
        "cells {start:?} and {target:?} must be on a {size}x{size} board"
    );
    if start == target {
        return true;
    }
    let mut visited = vec![false; size * size];
    let mut queue = VecDeque::from([start]);
    visited[start.0 * size + start.1] = true;

    while let Some(cell) = queue.pop_front() {
        for n in walls.open_neighbors(cell) {
            if n == target {
                return true;
            }
            let i = n.0 * size + n.1;
            if !visited[i] {
                visited[i] = true;
                queue.push_back(n);
            }
        }
    }
    false
}

/// The game ends once every piece is cut off from every other piece: each
/// player's own pair and all four cross pairs.
pub fn is_game_over(walls: &Walls, pieces: &PiecePositions) -> bool {
    let all: Vec<Cell> = pieces.iter().flatten().copied().collect();
    for (i, &a) in all.iter().enumerate() {
        for &b in &all[i + 1..] {
            if reachable(walls, a, b) {
                debug!("{a:?} can still reach {b:?}");
                return false;
            }
        }
    }
    true
}
