//! Translation of pointer positions into board coordinates.
//!
//! Rendering is someone else's job, but whoever draws the board also has to
//! turn clicks back into cells and wall segments. Both conversions take the
//! on-screen cell size and the margin around the board, in pixels.

use crate::board::{Cell, WallPos};
use crate::constants::WALL_SNAP_THRESHOLD;

/// Board layout on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geometry {
    pub size: usize,
    pub cell_size: f32,
    pub margin: f32,
}

impl Geometry {
    pub fn new(size: usize, cell_size: f32, margin: f32) -> Self {
        Self {
            size,
            cell_size,
            margin,
        }
    }

    /// Fractional `(row, col)` grid coordinates of a pixel.
    fn grid_coords(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (y - self.margin) / self.cell_size,
            (x - self.margin) / self.cell_size,
        )
    }

    /// The cell under a pixel, or `None` outside the board.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        let (row, col) = self.grid_coords(x, y);
        let limit = self.size as f32;
        if !(0.0..limit).contains(&row) || !(0.0..limit).contains(&col) {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Snap a pixel to the nearest wall segment.
    ///
    /// Whichever grid line family (horizontal or vertical) is closer wins,
    /// vertical on a tie. The click must be within [`WALL_SNAP_THRESHOLD`]
    /// cell units of that line and alongside a segment on the board.
    pub fn wall_at(&self, x: f32, y: f32) -> Option<WallPos> {
        let (row, col) = self.grid_coords(x, y);
        let limit = self.size as f32;
        let dist_h = (row - row.round()).abs();
        let dist_v = (col - col.round()).abs();

        let (line, along, dist) = if dist_h < dist_v {
            (row.round(), col, dist_h)
        } else {
            (col.round(), row, dist_v)
        };
        if dist >= WALL_SNAP_THRESHOLD || !(0.0..=limit).contains(&line) {
            return None;
        }
        if !(0.0..limit).contains(&along) {
            return None;
        }

        let (line, along) = (line as usize, along as usize);
        Some(if dist_h < dist_v {
            WallPos::horizontal(line, along)
        } else {
            WallPos::vertical(along, line)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::new(7, 100.0, 50.0)
    }

    #[test]
    fn test_cell_at() {
        let g = geometry();
        assert_eq!(g.cell_at(50.0, 50.0), Some((0, 0)));
        assert_eq!(g.cell_at(399.0, 260.0), Some((2, 3)));
        assert_eq!(g.cell_at(749.9, 749.9), Some((6, 6)));
        assert_eq!(g.cell_at(750.0, 100.0), None);
        assert_eq!(g.cell_at(49.0, 100.0), None);
    }

    #[test]
    fn test_wall_at_horizontal() {
        let g = geometry();
        // Just below the line between rows 1 and 2, over column 3
        assert_eq!(g.wall_at(420.0, 255.0), Some(WallPos::horizontal(2, 3)));
        // Over the right half of column 3 still picks column 3
        assert_eq!(g.wall_at(430.0, 245.0), Some(WallPos::horizontal(2, 3)));
        // Left half of column 4 picks column 4
        assert_eq!(g.wall_at(480.0, 245.0), Some(WallPos::horizontal(2, 4)));
        // Top border
        assert_eq!(g.wall_at(120.0, 52.0), Some(WallPos::horizontal(0, 0)));
    }

    #[test]
    fn test_wall_at_vertical() {
        let g = geometry();
        assert_eq!(g.wall_at(352.0, 420.0), Some(WallPos::vertical(3, 3)));
        assert_eq!(g.wall_at(748.0, 120.0), Some(WallPos::vertical(0, 7)));
    }

    #[test]
    fn test_wall_at_rejects_far_clicks() {
        let g = geometry();
        // Cell center
        assert_eq!(g.wall_at(400.0, 400.0), None);
        // Past the right edge
        assert_eq!(g.wall_at(790.0, 250.0), None);
    }
}
