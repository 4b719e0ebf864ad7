//! Constants for board dimensions, turn timing, and input snapping.
//!
//! These are the compile-time defaults. The board size and stay delay can be
//! overridden at runtime through [`crate::game::GameConfig`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const BOARD_SIZE: usize = 7;

/// Smallest board the engine accepts. Four pieces need four distinct cells.
pub const MIN_BOARD_SIZE: usize = 2;

/// Number of players.
pub const PLAYERS: usize = 2;

/// Pieces owned by each player.
pub const PIECES_PER_PLAYER: usize = 2;

/// Total number of pieces placed during setup.
pub const TOTAL_PIECES: usize = PLAYERS * PIECES_PER_PLAYER;

// =============================================================================
// Turn Timing
// =============================================================================

/// Milliseconds after selecting a piece before "stay in place" becomes legal.
pub const STAY_DELAY_MS: u64 = 1000;

// =============================================================================
// Input Snapping
// =============================================================================

/// Maximum distance (in cell units) from a grid line for a click to hit a wall.
pub const WALL_SNAP_THRESHOLD: f32 = 0.2;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Row/column offsets to orthogonal neighbors.
/// Order: Up, Right, Down, Left
pub const DELTA: [(isize, isize); 4] = [
    (-1, 0), // Up (previous row)
    (0, 1),  // Right (next column)
    (1, 0),  // Down (next row)
    (0, -1), // Left (previous column)
];
