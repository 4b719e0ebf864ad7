//! Board and wall storage.
//!
//! The board is an NxN grid of cells addressed as `(row, col)`. Walls live on
//! the grid lines between cells and are kept in two boolean grids:
//!
//! - horizontal: `(N + 1)` rows x `N` columns, `H[r][c]` is the top edge of `(r, c)`
//! - vertical: `N` rows x `(N + 1)` columns, `V[r][c]` is the left edge of `(r, c)`
//!
//! The outer ring of both grids is set on construction and never cleared, so
//! the board is always fully enclosed. Walls are never removed once placed.

use std::fmt;

use thiserror::Error;

use crate::constants::{DELTA, PIECES_PER_PLAYER, PLAYERS};

/// A cell on the board as `(row, col)`, 0-indexed.
pub type Cell = (usize, usize);

/// Piece positions indexed by `[player][piece]`.
pub type PiecePositions = [[Cell; PIECES_PER_PLAYER]; PLAYERS];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub const ALL: [Self; PLAYERS] = [Self::Red, Self::Blue];

    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Blue => 1,
        }
    }

    pub const fn from_index(index: usize) -> Self {
        if index % PLAYERS == 0 {
            Self::Red
        } else {
            Self::Blue
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one of the four pieces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub player: Player,
    pub index: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Same order as [`DELTA`].
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn delta(self) -> (isize, isize) {
        DELTA[self as usize]
    }

    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// The neighbor of `cell` in this direction, or `None` if it falls off a
    /// board of the given size.
    pub fn step(self, cell: Cell, size: usize) -> Option<Cell> {
        let (dr, dc) = self.delta();
        let row = cell.0.checked_add_signed(dr)?;
        let col = cell.1.checked_add_signed(dc)?;
        (row < size && col < size).then_some((row, col))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A single wall segment on the grid lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WallPos {
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
}

impl WallPos {
    pub const fn horizontal(row: usize, col: usize) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            row,
            col,
        }
    }

    pub const fn vertical(row: usize, col: usize) -> Self {
        Self {
            orientation: Orientation::Vertical,
            row,
            col,
        }
    }

    /// The four segments around a cell: top, bottom, left, right.
    pub const fn around(cell: Cell) -> [Self; 4] {
        let (row, col) = cell;
        [
            Self::horizontal(row, col),
            Self::horizontal(row + 1, col),
            Self::vertical(row, col),
            Self::vertical(row, col + 1),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position is off the board")]
    OutOfBounds,
    #[error("cell is already occupied")]
    OccupiedCell,
    #[error("wall already present")]
    WallAlreadyPresent,
}

/// The two wall grids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walls {
    size: usize,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl Walls {
    /// Create an empty wall set with only the permanent border ring.
    pub fn new(size: usize) -> Self {
        let mut walls = Self {
            size,
            horizontal: vec![false; (size + 1) * size],
            vertical: vec![false; size * (size + 1)],
        };
        for i in 0..size {
            walls.horizontal[i] = true;
            walls.horizontal[size * size + i] = true;
            walls.vertical[i * (size + 1)] = true;
            walls.vertical[i * (size + 1) + size] = true;
        }
        walls
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: WallPos) -> Option<usize> {
        let s = self.size;
        match pos.orientation {
            Orientation::Horizontal if pos.row <= s && pos.col < s => Some(pos.row * s + pos.col),
            Orientation::Vertical if pos.row < s && pos.col <= s => {
                Some(pos.row * (s + 1) + pos.col)
            }
            _ => None,
        }
    }

    /// Whether `pos` names a segment on this board.
    pub fn contains(&self, pos: WallPos) -> bool {
        self.index(pos).is_some()
    }

    /// Whether `pos` lies on the outer ring.
    pub fn is_border(&self, pos: WallPos) -> bool {
        self.contains(pos)
            && match pos.orientation {
                Orientation::Horizontal => pos.row == 0 || pos.row == self.size,
                Orientation::Vertical => pos.col == 0 || pos.col == self.size,
            }
    }

    /// Segments off the board read as absent.
    pub fn exists(&self, pos: WallPos) -> bool {
        match (self.index(pos), pos.orientation) {
            (Some(i), Orientation::Horizontal) => self.horizontal[i],
            (Some(i), Orientation::Vertical) => self.vertical[i],
            (None, _) => false,
        }
    }

    pub fn set(&mut self, pos: WallPos) -> Result<(), BoardError> {
        let i = self.index(pos).ok_or(BoardError::OutOfBounds)?;
        let slot = match pos.orientation {
            Orientation::Horizontal => &mut self.horizontal[i],
            Orientation::Vertical => &mut self.vertical[i],
        };
        if *slot {
            return Err(BoardError::WallAlreadyPresent);
        }
        *slot = true;
        Ok(())
    }

    /// Whether the segment between two orthogonally adjacent cells is present.
    ///
    /// The result for non-adjacent cells is meaningless; callers must pass
    /// neighbors.
    pub fn between(&self, a: Cell, b: Cell) -> bool {
        debug_assert!(
            a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1,
            "cells {a:?} and {b:?} are not adjacent"
        );
        if a.0 == b.0 {
            self.exists(WallPos::vertical(a.0, a.1.max(b.1)))
        } else {
            self.exists(WallPos::horizontal(a.0.max(b.0), a.1))
        }
    }

    /// True if all four sides of `cell` are walled.
    pub fn is_enclosed(&self, cell: Cell) -> bool {
        WallPos::around(cell).into_iter().all(|w| self.exists(w))
    }

    /// Neighbors of `cell` not separated from it by a wall.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| d.step(cell, self.size))
            .filter(move |&n| !self.between(cell, n))
    }

    /// A wall grid as nested rows, for read-only consumers.
    pub fn grid(&self, orientation: Orientation) -> Vec<Vec<bool>> {
        let (cells, width) = match orientation {
            Orientation::Horizontal => (&self.horizontal, self.size),
            Orientation::Vertical => (&self.vertical, self.size + 1),
        };
        cells.chunks(width).map(<[bool]>::to_vec).collect()
    }

    /// Number of segments placed inside the border ring.
    pub fn placed(&self) -> usize {
        let total = self.horizontal.iter().chain(&self.vertical).filter(|&&w| w).count();
        total - 4 * self.size
    }
}

/// Grid occupancy plus walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    walls: Walls,
    pieces: [[Option<Cell>; PIECES_PER_PLAYER]; PLAYERS],
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            walls: Walls::new(size),
            pieces: [[None; PIECES_PER_PLAYER]; PLAYERS],
        }
    }

    pub fn size(&self) -> usize {
        self.walls.size
    }

    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 < self.size() && cell.1 < self.size()
    }

    pub fn piece(&self, player: Player, index: usize) -> Option<Cell> {
        self.pieces[player.index()][index]
    }

    pub fn pieces(&self) -> [[Option<Cell>; PIECES_PER_PLAYER]; PLAYERS] {
        self.pieces
    }

    /// All piece positions, or `None` while setup is incomplete.
    pub fn placed_pieces(&self) -> Option<PiecePositions> {
        let [[a, b], [c, d]] = self.pieces;
        Some([[a?, b?], [c?, d?]])
    }

    pub fn piece_at(&self, cell: Cell) -> Option<PieceRef> {
        Player::ALL.into_iter().find_map(|player| {
            self.pieces[player.index()]
                .iter()
                .position(|&p| p == Some(cell))
                .map(|index| PieceRef { player, index })
        })
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.piece_at(cell).is_some()
    }

    /// Put a piece on an empty cell during setup.
    pub fn place_piece(&mut self, player: Player, index: usize, cell: Cell) -> Result<(), BoardError> {
        if !self.in_bounds(cell) {
            return Err(BoardError::OutOfBounds);
        }
        if self.is_occupied(cell) {
            return Err(BoardError::OccupiedCell);
        }
        self.pieces[player.index()][index] = Some(cell);
        Ok(())
    }

    /// Relocate a piece. Moving onto its own cell (staying) is allowed.
    pub fn move_piece(&mut self, player: Player, index: usize, to: Cell) -> Result<(), BoardError> {
        if !self.in_bounds(to) {
            return Err(BoardError::OutOfBounds);
        }
        match self.piece_at(to) {
            Some(p) if p != (PieceRef { player, index }) => Err(BoardError::OccupiedCell),
            _ => {
                self.pieces[player.index()][index] = Some(to);
                Ok(())
            }
        }
    }

    pub fn clear_pieces(&mut self) {
        self.pieces = [[None; PIECES_PER_PLAYER]; PLAYERS];
    }

    pub fn wall_exists(&self, pos: WallPos) -> bool {
        self.walls.exists(pos)
    }

    pub fn set_wall(&mut self, pos: WallPos) -> Result<(), BoardError> {
        self.walls.set(pos)
    }

    pub fn has_wall_between(&self, a: Cell, b: Cell) -> bool {
        self.walls.between(a, b)
    }

    /// True if the piece sits in a fully walled 1x1 cell. Unplaced pieces are
    /// never isolated.
    pub fn is_isolated(&self, player: Player, index: usize) -> bool {
        self.piece(player, index)
            .is_some_and(|cell| self.walls.is_enclosed(cell))
    }

    /// Isolation flags indexed by `[player][piece]`.
    pub fn isolation(&self) -> [[bool; PIECES_PER_PLAYER]; PLAYERS] {
        Player::ALL.map(|p| std::array::from_fn(|i| self.is_isolated(p, i)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in 0..=size {
            for col in 0..size {
                let seg = if self.wall_exists(WallPos::horizontal(row, col)) {
                    "---"
                } else {
                    "   "
                };
                write!(f, "+{seg}")?;
            }
            writeln!(f, "+")?;
            if row == size {
                break;
            }
            for col in 0..=size {
                let bar = if self.wall_exists(WallPos::vertical(row, col)) {
                    '|'
                } else {
                    ' '
                };
                if col == size {
                    writeln!(f, "{bar}")?;
                    break;
                }
                let ch = match self.piece_at((row, col)) {
                    Some(PieceRef {
                        player: Player::Red,
                        ..
                    }) => 'R',
                    Some(PieceRef {
                        player: Player::Blue,
                        ..
                    }) => 'B',
                    None => '.',
                };
                write!(f, "{bar} {ch} ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_ring_is_set() {
        let walls = Walls::new(7);
        for i in 0..7 {
            assert!(walls.exists(WallPos::horizontal(0, i)));
            assert!(walls.exists(WallPos::horizontal(7, i)));
            assert!(walls.exists(WallPos::vertical(i, 0)));
            assert!(walls.exists(WallPos::vertical(i, 7)));
        }
        assert_eq!(walls.placed(), 0);
    }

    #[test]
    fn test_interior_starts_open() {
        let walls = Walls::new(7);
        for r in 1..7 {
            for c in 0..7 {
                assert!(!walls.exists(WallPos::horizontal(r, c)));
                assert!(!walls.exists(WallPos::vertical(c, r)));
            }
        }
    }

    #[test]
    fn test_set_wall_twice_fails() {
        let mut walls = Walls::new(7);
        assert_eq!(walls.set(WallPos::horizontal(3, 3)), Ok(()));
        assert_eq!(
            walls.set(WallPos::horizontal(3, 3)),
            Err(BoardError::WallAlreadyPresent)
        );
        assert_eq!(
            walls.set(WallPos::vertical(2, 0)),
            Err(BoardError::WallAlreadyPresent)
        );
        assert_eq!(walls.placed(), 1);
    }

    #[test]
    fn test_set_wall_off_board() {
        let mut walls = Walls::new(7);
        assert_eq!(
            walls.set(WallPos::horizontal(8, 0)),
            Err(BoardError::OutOfBounds)
        );
        assert_eq!(
            walls.set(WallPos::vertical(0, 8)),
            Err(BoardError::OutOfBounds)
        );
        assert_eq!(
            walls.set(WallPos::horizontal(0, 7)),
            Err(BoardError::OutOfBounds)
        );
    }

    #[test]
    fn test_wall_between_uses_shared_edge() {
        let mut walls = Walls::new(7);
        walls.set(WallPos::vertical(2, 4)).unwrap();
        assert!(walls.between((2, 3), (2, 4)));
        assert!(walls.between((2, 4), (2, 3)));
        assert!(!walls.between((2, 4), (2, 5)));

        walls.set(WallPos::horizontal(5, 1)).unwrap();
        assert!(walls.between((4, 1), (5, 1)));
        assert!(walls.between((5, 1), (4, 1)));
        assert!(!walls.between((5, 1), (6, 1)));
    }

    #[test]
    fn test_enclosed_cell() {
        let mut walls = Walls::new(7);
        assert!(!walls.is_enclosed((3, 3)));
        for w in WallPos::around((3, 3)) {
            walls.set(w).unwrap();
        }
        assert!(walls.is_enclosed((3, 3)));
        assert_eq!(walls.open_neighbors((3, 3)).count(), 0);
        // Corner needs only the two interior sides
        walls.set(WallPos::horizontal(1, 0)).unwrap();
        walls.set(WallPos::vertical(0, 1)).unwrap();
        assert!(walls.is_enclosed((0, 0)));
    }

    #[test]
    fn test_grid_shapes() {
        let walls = Walls::new(7);
        let h = walls.grid(Orientation::Horizontal);
        let v = walls.grid(Orientation::Vertical);
        assert_eq!(h.len(), 8);
        assert!(h.iter().all(|r| r.len() == 7));
        assert_eq!(v.len(), 7);
        assert!(v.iter().all(|r| r.len() == 8));
    }

    #[test]
    fn test_place_piece_occupied() {
        let mut board = Board::new(7);
        board.place_piece(Player::Red, 0, (1, 1)).unwrap();
        assert_eq!(
            board.place_piece(Player::Blue, 0, (1, 1)),
            Err(BoardError::OccupiedCell)
        );
        assert_eq!(
            board.place_piece(Player::Blue, 0, (7, 1)),
            Err(BoardError::OutOfBounds)
        );
        assert_eq!(
            board.piece_at((1, 1)),
            Some(PieceRef {
                player: Player::Red,
                index: 0
            })
        );
        assert!(board.placed_pieces().is_none());
    }

    #[test]
    fn test_move_piece_allows_stay() {
        let mut board = Board::new(7);
        board.place_piece(Player::Red, 0, (1, 1)).unwrap();
        board.place_piece(Player::Blue, 1, (1, 2)).unwrap();
        assert_eq!(board.move_piece(Player::Red, 0, (1, 1)), Ok(()));
        assert_eq!(
            board.move_piece(Player::Red, 0, (1, 2)),
            Err(BoardError::OccupiedCell)
        );
        assert_eq!(board.move_piece(Player::Red, 0, (2, 1)), Ok(()));
        assert!(!board.is_occupied((1, 1)));
    }

    #[test]
    fn test_direction_step_clips_edges() {
        assert_eq!(Direction::Up.step((0, 3), 7), None);
        assert_eq!(Direction::Left.step((3, 0), 7), None);
        assert_eq!(Direction::Down.step((6, 3), 7), None);
        assert_eq!(Direction::Right.step((3, 6), 7), None);
        assert_eq!(Direction::Down.step((3, 3), 7), Some((4, 3)));
        for d in Direction::ALL {
            assert_eq!(d.reverse().reverse(), d);
        }
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2);
        board.place_piece(Player::Red, 0, (0, 0)).unwrap();
        board.place_piece(Player::Blue, 0, (1, 1)).unwrap();
        board.set_wall(WallPos::vertical(0, 1)).unwrap();
        let expected = "\
+---+---+
| R | . |
+   +   +
| .   B |
+---+---+
";
        assert_eq!(board.to_string(), expected);
    }
}
