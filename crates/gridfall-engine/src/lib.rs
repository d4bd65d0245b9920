//! Rules engine for a falling-block puzzle game.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - value types: coordinates, cells, colors and the four-block pieces
//! - [`engine`] - the [`Grid`] state machine, piece generation and [`GameSession`]
//!
//! The engine performs no I/O and keeps no global state. A presentation layer
//! owns the render/input loop and calls into the engine once per input event
//! and once per gravity tick.
//!
//! # Example
//!
//! ```
//! use gridfall_engine::{Direction, Grid, PieceKind};
//!
//! let mut grid = Grid::new(18, 10);
//! let mut piece = grid.put_piece(PieceKind::T);
//!
//! assert!(grid.move_piece(&mut piece, Direction::Left, 1));
//! while grid.move_piece(&mut piece, Direction::Down, 1) {}
//!
//! let game_over = grid.update();
//! assert!(!game_over);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "grid must be at least {}x{}, got {rows}x{columns}",
    Grid::MIN_ROWS,
    Grid::MIN_COLUMNS
)]
pub struct GridSizeError {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece kind: {input:?}")]
pub struct ParsePieceKindError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed: expected 32 hex digits, got {input:?}")]
pub struct ParsePieceSeedError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction: {input:?}")]
pub struct ParseDirectionError {
    pub input: String,
}
