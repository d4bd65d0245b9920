use serde::{Deserialize, Serialize};

use super::block::Block;

/// Display color of a block or cell.
///
/// Every [`PieceKind`](super::piece::PieceKind) maps to exactly one color;
/// [`Color::None`] is reserved for empty cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Color {
    #[default]
    None,
    Blue,
    Yellow,
    Purple,
    Orange,
    Pink,
    Red,
    Green,
}

impl Color {
    #[must_use]
    pub fn is_none(self) -> bool {
        self == Color::None
    }
}

/// A single slot of the [`Grid`](crate::Grid).
///
/// A cell is either empty (`is_full == false`, [`Color::None`]) or holds the
/// color of the block that filled it. Bounds are the grid's concern; a cell
/// does no validation of its own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    is_full: bool,
    color: Color,
}

impl Cell {
    pub const EMPTY: Self = Self {
        is_full: false,
        color: Color::None,
    };

    #[must_use]
    pub const fn is_full(self) -> bool {
        self.is_full
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Marks the cell full, taking the color carried by `block`.
    pub fn fill(&mut self, block: &Block) {
        self.is_full = true;
        self.color = block.color();
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}
