use std::{
    ops::{Index, IndexMut},
    str::FromStr,
};

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::ParsePieceKindError;

use super::{
    block::{Block, Direction},
    cell::Color,
};

/// A falling piece: four colored blocks, one of which is the rotation pivot.
///
/// Pieces are plain values. The [`Grid`](crate::Grid) never keeps a reference
/// to the live piece; the caller holds it and passes it back into every
/// [`Grid::move_piece`](crate::Grid::move_piece) call.
///
/// # Coordinate System
///
/// - Row 0 is the top of the grid, rows grow downward
/// - Column 0 is the left edge, columns grow rightward
/// - The block layout at construction comes from a fixed per-kind offset table
///   relative to the pivot (see [`PieceKind::offsets`])
///
/// # Example
///
/// ```
/// use gridfall_engine::{Direction, Piece, PieceKind};
///
/// let mut piece = Piece::new(PieceKind::T, 5, 5);
/// piece.move_by(Direction::ClockRotation, 1);
/// piece.move_by(Direction::AnticlockRotation, 1);
/// assert_eq!(piece, Piece::new(PieceKind::T, 5, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    blocks: [Block; Piece::SIZE],
    pivot_index: usize,
}

impl Piece {
    /// Number of blocks in every piece.
    pub const SIZE: usize = 4;

    /// Builds a piece of `kind` whose pivot block sits at (`pivot_row`, `pivot_column`).
    #[must_use]
    pub fn new(kind: PieceKind, pivot_row: usize, pivot_column: usize) -> Self {
        let color = kind.color();
        let blocks = kind.offsets().map(|(d_row, d_column)| {
            Block::with_color(
                pivot_row.wrapping_add_signed(d_row),
                pivot_column.wrapping_add_signed(d_column),
                color,
            )
        });
        Self {
            kind,
            blocks,
            pivot_index: kind.pivot_index(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub const fn blocks(&self) -> &[Block; Piece::SIZE] {
        &self.blocks
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.blocks[0].color()
    }

    #[must_use]
    pub const fn pivot_index(&self) -> usize {
        self.pivot_index
    }

    #[must_use]
    pub const fn pivot_row(&self) -> usize {
        self.blocks[self.pivot_index].row()
    }

    #[must_use]
    pub const fn pivot_col(&self) -> usize {
        self.blocks[self.pivot_index].column()
    }

    /// Returns the (row, column) positions currently covered by the piece.
    #[must_use]
    pub fn footprint(&self) -> [(usize, usize); Piece::SIZE] {
        self.blocks.map(|block| block.position())
    }

    /// Translates or rotates the piece in place.
    ///
    /// Translations apply `length` unit steps to every block. Rotations apply
    /// `length` quarter turns around the pivot block's current position.
    /// [`Direction::None`] does nothing.
    ///
    /// No bounds are checked here: a block may wrap past row or column 0. Use
    /// [`Grid::move_piece`](crate::Grid::move_piece) to move a live piece.
    pub fn move_by(&mut self, direction: Direction, length: usize) {
        match direction {
            Direction::ClockRotation => {
                for _ in 0..length % 4 {
                    self.rotate_clockwise();
                }
            }
            Direction::AnticlockRotation => {
                for _ in 0..length % 4 {
                    self.rotate_anticlockwise();
                }
            }
            _ => {
                for block in &mut self.blocks {
                    block.move_by(direction, length);
                }
            }
        }
    }

    /// Relative offset `(r, c)` from the pivot becomes `(c, -r)`.
    fn rotate_clockwise(&mut self) {
        let pivot = self.blocks[self.pivot_index];
        for block in &mut self.blocks {
            let (d_row, d_column) = block.offset_from(&pivot);
            block.set_position(
                pivot.row().wrapping_add(d_column),
                pivot.column().wrapping_sub(d_row),
            );
        }
    }

    /// Relative offset `(r, c)` from the pivot becomes `(-c, r)`.
    fn rotate_anticlockwise(&mut self) {
        let pivot = self.blocks[self.pivot_index];
        for block in &mut self.blocks {
            let (d_row, d_column) = block.offset_from(&pivot);
            block.set_position(
                pivot.row().wrapping_sub(d_column),
                pivot.column().wrapping_add(d_row),
            );
        }
    }
}

impl Index<usize> for Piece {
    type Output = Block;

    fn index(&self, index: usize) -> &Self::Output {
        &self.blocks[index]
    }
}

impl IndexMut<usize> for Piece {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.blocks[index]
    }
}

/// Enum representing the shape of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the color bound to this kind.
    #[must_use]
    pub const fn color(self) -> Color {
        PIECE_COLORS[self as usize]
    }

    /// Returns the (Δrow, Δcolumn) offset of every block from the pivot.
    ///
    /// | Kind | Offsets                         |
    /// |------|---------------------------------|
    /// | I    | (0,0), (0,-1), (0,-2), (0,1)    |
    /// | O    | (0,0), (0,-1), (1,0), (1,-1)    |
    /// | T    | (0,0), (0,-1), (0,1), (1,0)     |
    /// | L    | (0,0), (0,-1), (0,1), (1,-1)    |
    /// | J    | (0,0), (0,-1), (0,1), (1,1)     |
    /// | S    | (0,0), (0,1), (1,0), (1,-1)     |
    /// | Z    | (0,0), (0,-1), (1,0), (1,1)     |
    #[must_use]
    pub const fn offsets(self) -> [(isize, isize); Piece::SIZE] {
        PIECE_OFFSETS[self as usize]
    }

    /// Index of the pivot block in [`Self::offsets`].
    #[must_use]
    pub const fn pivot_index(self) -> usize {
        PIECE_PIVOTS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c.to_ascii_uppercase()),
            _ => None,
        };
        kind.ok_or_else(|| ParsePieceKindError {
            input: s.to_owned(),
        })
    }
}

const PIECE_COLORS: [Color; PieceKind::LEN] = [
    Color::Blue,
    Color::Yellow,
    Color::Purple,
    Color::Orange,
    Color::Pink,
    Color::Red,
    Color::Green,
];

const PIECE_PIVOTS: [usize; PieceKind::LEN] = [0; PieceKind::LEN];

const PIECE_OFFSETS: [[(isize, isize); Piece::SIZE]; PieceKind::LEN] = [
    // I-piece
    [(0, 0), (0, -1), (0, -2), (0, 1)],
    // O-piece
    [(0, 0), (0, -1), (1, 0), (1, -1)],
    // T-piece
    [(0, 0), (0, -1), (0, 1), (1, 0)],
    // L-piece
    [(0, 0), (0, -1), (0, 1), (1, -1)],
    // J-piece
    [(0, 0), (0, -1), (0, 1), (1, 1)],
    // S-piece
    [(0, 0), (0, 1), (1, 0), (1, -1)],
    // Z-piece
    [(0, 0), (0, -1), (1, 0), (1, 1)],
];
