//! Constants for board geometry, piece encoding, and search parameters.
//!
//! The board is a plain 10x10 grid; pieces live only on the dark squares,
//! i.e. cells whose (row + col) parity is odd. Piece values are signed so
//! that the sign alone identifies the owning side.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (10x10, international draughts).
pub const BOARD_SIZE: usize = 10;

/// Number of observation planes (red men, black men, red kings, black kings).
pub const OBS_PLANES: usize = 4;

// =============================================================================
// Piece Encoding
// =============================================================================

/// Empty cell.
pub const EMPTY: i8 = 0;

/// Red man (moves toward row 0).
pub const RED: i8 = 1;

/// Black man (moves toward row 9).
pub const BLACK: i8 = -1;

/// Red king (moves in all four diagonals).
pub const RED_KING: i8 = 2;

/// Black king (moves in all four diagonals).
pub const BLACK_KING: i8 = -2;

// =============================================================================
// Movement Directions
// =============================================================================

/// Diagonal steps available to a red man.
pub const RED_MAN_DIRS: [(isize, isize); 2] = [(-1, -1), (-1, 1)];

/// Diagonal steps available to a black man.
pub const BLACK_MAN_DIRS: [(isize, isize); 2] = [(1, -1), (1, 1)];

/// Diagonal steps available to a king.
pub const KING_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// =============================================================================
// Game Rules
// =============================================================================

/// Half-moves without a capture before the game is drawn.
pub const NO_CAPTURE_LIMIT: u32 = 80;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of search iterations per move.
pub const N_ITERATIONS: usize = 800;

/// UCT exploration constant (~sqrt(2)).
pub const UCT_C: f64 = 1.414;

/// Depth cap for random rollouts, in half-moves.
pub const ROLLOUT_DEPTH: usize = 80;
