use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::{
    GridSizeError,
    core::{
        block::{Block, Direction},
        cell::Cell,
        piece::{Piece, PieceKind},
    },
};

/// Number of rows at the top of the grid that end the game when a settled
/// block sits in them.
const GAME_OVER_ROWS: usize = 2;

/// Points awarded for clearing `lines` rows at once on a grid `columns` wide.
///
/// The multiplier grows with the number of simultaneous rows, so multi-row
/// clears are worth more than the same rows cleared one by one:
///
/// | Rows | Points            |
/// |------|-------------------|
/// | 0    | 0                 |
/// | 1    | `1 × columns`     |
/// | 2    | `3 × columns × 2` |
/// | 3    | `5 × columns × 3` |
/// | 4    | `7 × columns × 4` |
///
/// # Example
///
/// ```
/// use gridfall_engine::line_clear_points;
///
/// assert_eq!(line_clear_points(1, 10), 10);
/// assert_eq!(line_clear_points(4, 10), 280);
/// ```
#[must_use]
pub const fn line_clear_points(lines: usize, columns: usize) -> usize {
    if lines == 0 {
        return 0;
    }
    (2 * lines - 1) * columns * lines
}

/// Outcome of settling a landed piece with [`Grid::settle`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settlement {
    /// Indices of the rows that were full, top to bottom, before compaction.
    pub cleared_rows: Vec<usize>,
    /// Points added to the grid's score.
    pub points: usize,
    /// Whether settled blocks reached the top rows.
    pub is_game_over: bool,
}

impl Settlement {
    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// The playing field: a rectangular matrix of [`Cell`]s plus the score.
///
/// Row 0 is the top (spawn side). The grid is the only owner of occupancy;
/// the live [`Piece`] is held by the caller and passed back into
/// [`Self::move_piece`].
///
/// # Turn Flow
///
/// 1. [`Self::put_piece`] spawns a piece at the top and stamps it into the matrix
/// 2. [`Self::move_piece`] translates or rotates it, rolling back rejected moves
/// 3. When a downward move is rejected, [`Self::update`] settles the piece,
///    clears full rows, scores and reports game over
///
/// # Example
///
/// ```
/// use gridfall_engine::{Direction, Grid, PieceKind};
///
/// let mut grid = Grid::new(18, 10);
/// let mut piece = grid.put_piece(PieceKind::O);
///
/// // The left wall stops the piece after four steps.
/// assert!(grid.move_piece(&mut piece, Direction::Left, 4));
/// assert!(!grid.move_piece(&mut piece, Direction::Left, 1));
/// assert_eq!(piece.pivot_col(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    matrix: Vec<Vec<Cell>>,
    score: usize,
}

impl Grid {
    pub const MIN_ROWS: usize = 4;
    pub const MIN_COLUMNS: usize = 4;

    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if the grid is smaller than [`Self::MIN_ROWS`] × [`Self::MIN_COLUMNS`].
    /// Use [`Self::try_new`] to handle that case.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        match Self::try_new(rows, columns) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(rows: usize, columns: usize) -> Result<Self, GridSizeError> {
        if rows < Self::MIN_ROWS || columns < Self::MIN_COLUMNS {
            return Err(GridSizeError { rows, columns });
        }
        Ok(Self {
            matrix: vec![vec![Cell::EMPTY; columns]; rows],
            score: 0,
        })
    }

    #[must_use]
    pub fn row_size(&self) -> usize {
        self.matrix.len()
    }

    #[must_use]
    pub fn column_size(&self) -> usize {
        self.matrix[0].len()
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.row_size() && column < self.column_size()
    }

    /// Returns the cell at (`row`, `column`), or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.matrix.get(row)?.get(column).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.matrix.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn count_full_cells(&self) -> usize {
        self.rows()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_full())
            .count()
    }

    /// Spawns a piece of `kind` on row 0, centered horizontally.
    ///
    /// See [`Self::put_piece_at`].
    pub fn put_piece(&mut self, kind: PieceKind) -> Piece {
        self.put_piece_at(kind, 0)
    }

    /// Spawns a piece of `kind` with its pivot on `row`, column `column_size / 2`.
    ///
    /// The piece's blocks are written into the matrix without checking what
    /// was there before: spawning onto settled blocks is what the game-over
    /// check of [`Self::update`] anticipates. The returned piece must be kept
    /// by the caller and passed to [`Self::move_piece`].
    ///
    /// # Panics
    ///
    /// Panics if any block of the spawned piece lies outside the grid.
    pub fn put_piece_at(&mut self, kind: PieceKind, row: usize) -> Piece {
        let piece = Piece::new(kind, row, self.column_size() / 2);
        self.stamp_piece(&piece);
        piece
    }

    /// Moves the live `piece` by `length` steps (or quarter turns) in `direction`.
    ///
    /// The piece's own cells are cleared, the move is applied, and the new
    /// footprint is validated as a whole: every block must be inside the grid
    /// and on an empty cell. A rejected move is undone with the reverse
    /// direction. Either way the piece is stamped back, so the matrix always
    /// matches the piece's reported position.
    ///
    /// A translation at least as long as the grid on that axis always leaves
    /// the grid and is rejected before anything is touched.
    ///
    /// Returns whether the move was accepted.
    ///
    /// # Panics
    ///
    /// Panics if `piece` is not inside the grid when called.
    pub fn move_piece(&mut self, piece: &mut Piece, direction: Direction, length: usize) -> bool {
        if length >= self.axis_len(direction) {
            return false;
        }

        self.erase_piece(piece);
        piece.move_by(direction, length);

        let accepted = self.can_place(piece);
        if !accepted {
            piece.move_by(direction.reverse(), length);
        }

        self.stamp_piece(piece);
        accepted
    }

    /// Returns the indices of all full rows, top to bottom.
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        self.matrix
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|cell| cell.is_full()))
            .map(|(y, _)| y)
            .collect()
    }

    /// Settles the landed piece: clears full rows, compacts and scores.
    ///
    /// Must be called once per landing, right after a downward
    /// [`Self::move_piece`] was rejected. Each full row is removed by shifting
    /// every row above it down by one and emptying row 0, so N cleared rows
    /// drop everything above them by N.
    ///
    /// The game is over when a settled block occupies one of the top two rows
    /// at landing time, before any row is cleared.
    pub fn settle(&mut self) -> Settlement {
        let is_game_over = self.matrix[..GAME_OVER_ROWS.min(self.row_size())]
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_full()));

        let cleared_rows = self.full_rows();
        for &y in &cleared_rows {
            self.matrix[..=y].rotate_right(1);
            self.matrix[0].fill(Cell::EMPTY);
        }

        let points = line_clear_points(cleared_rows.len(), self.column_size());
        self.score += points;

        Settlement {
            cleared_rows,
            points,
            is_game_over,
        }
    }

    /// Like [`Self::settle`], returning only whether the game is over.
    pub fn update(&mut self) -> bool {
        self.settle().is_game_over
    }

    /// Number of cells along the axis `direction` translates on.
    fn axis_len(&self, direction: Direction) -> usize {
        match direction {
            Direction::Up | Direction::Down => self.row_size(),
            Direction::Left | Direction::Right => self.column_size(),
            Direction::ClockRotation | Direction::AnticlockRotation | Direction::None => usize::MAX,
        }
    }

    fn can_place(&self, piece: &Piece) -> bool {
        piece.blocks().iter().all(|block| {
            self.cell(block.row(), block.column())
                .is_some_and(|cell| !cell.is_full())
        })
    }

    fn erase_piece(&mut self, piece: &Piece) {
        for block in piece.blocks() {
            self[block.position()].clear();
        }
    }

    fn stamp_piece(&mut self, piece: &Piece) {
        for block in piece.blocks() {
            self.fill_block(block);
        }
    }

    /// Fills the cell under `block` with the block's color.
    ///
    /// # Panics
    ///
    /// Panics if `block` lies outside the grid.
    pub fn fill_block(&mut self, block: &Block) {
        self[block.position()].fill(block);
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        &self.matrix[row][column]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        &mut self.matrix[row][column]
    }
}
