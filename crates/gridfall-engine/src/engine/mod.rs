//! Game engine logic and state management.
//!
//! This module provides the state machine that turns the core value types
//! into a playable game:
//!
//! - [`Grid`] - The occupancy matrix: spawning, collision-checked moves with
//!   rollback, row clearing, scoring and game-over detection
//! - [`PieceGenerator`] - Uniform, seedable source of piece kinds
//! - [`GameSession`] - One game with its live piece, statistics and best score
//! - [`render`] - Text rendering of a grid for snapshot tests
//!
//! # Game Flow
//!
//! 1. Create a [`Grid`] and spawn a piece with [`Grid::put_piece`]
//! 2. Move or rotate it with [`Grid::move_piece`] on input and on every gravity tick
//! 3. When a downward move is rejected, call [`Grid::update`]
//! 4. Spawn the next piece unless the game is over
//!
//! [`GameSession`] runs steps 2-4 for callers that do not need the raw protocol.

pub use self::{game_session::*, grid::*, piece_generator::*, render::*};

mod game_session;
mod grid;
mod piece_generator;
mod render;
