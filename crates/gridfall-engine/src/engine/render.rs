use std::fmt;

use crate::core::block::Block;

use super::grid::Grid;

const FULL_CHAR: char = 'O';
const EMPTY_CHAR: char = '.';

/// Renders the grid as text for snapshot tests and debugging.
///
/// One line per row, top to bottom, `'O'` for a full cell and `'.'` for an
/// empty one. The text starts with a newline and every row ends with one.
///
/// # Example
///
/// ```
/// use gridfall_engine::{Grid, PieceKind, render};
///
/// let mut grid = Grid::new(4, 4);
/// grid.put_piece(PieceKind::O);
/// assert_eq!(render(&grid), "\n.OO.\n.OO.\n....\n....\n");
/// ```
#[must_use]
pub fn render(grid: &Grid) -> String {
    format!("\n{grid}")
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let c = if cell.is_full() { FULL_CHAR } else { EMPTY_CHAR };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid {
    /// Creates a `Grid` from ASCII art for tests and fixtures.
    ///
    /// `'#'` or `'O'` marks a full cell, `'.'` an empty one; other characters
    /// and blank lines are ignored. Rows are listed top to bottom and must all
    /// have the same width. Full cells carry no color.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in width or the art is smaller than the
    /// minimum grid size.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<Vec<bool>> = art
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| matches!(*c, '#' | FULL_CHAR | EMPTY_CHAR))
                    .map(|c| c != EMPTY_CHAR)
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        let columns = lines.first().map_or(0, Vec::len);
        let mut grid = Self::new(lines.len(), columns);
        for (row, cells) in lines.iter().enumerate() {
            assert_eq!(
                cells.len(),
                columns,
                "Each row must have exactly {columns} cells, got {} at row {row}",
                cells.len(),
            );
            for (column, &full) in cells.iter().enumerate() {
                if full {
                    grid.fill_block(&Block::new(row, column));
                }
            }
        }
        grid
    }
}
