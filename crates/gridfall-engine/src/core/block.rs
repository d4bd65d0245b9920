use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseDirectionError;

use super::cell::Color;

/// A requested change of a piece's position or orientation.
///
/// Translations move every block by one unit per step. Rotations turn the
/// piece by a quarter turn around its pivot block and have no effect on a
/// single [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    ClockRotation,
    AnticlockRotation,
    None,
}

impl Direction {
    /// Returns the direction that undoes this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfall_engine::Direction;
    ///
    /// assert_eq!(Direction::Up.reverse(), Direction::Down);
    /// assert_eq!(Direction::ClockRotation.reverse(), Direction::AnticlockRotation);
    /// assert_eq!(Direction::None.reverse(), Direction::None);
    /// ```
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::ClockRotation => Direction::AnticlockRotation,
            Direction::AnticlockRotation => Direction::ClockRotation,
            Direction::None => Direction::None,
        }
    }

    #[must_use]
    pub const fn is_rotation(self) -> bool {
        matches!(
            self,
            Direction::ClockRotation | Direction::AnticlockRotation
        )
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let direction = match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Direction::Up,
            "down" | "d" => Direction::Down,
            "left" | "l" => Direction::Left,
            "right" | "r" => Direction::Right,
            "cw" | "clock" | "clock_rotation" => Direction::ClockRotation,
            "ccw" | "anticlock" | "anticlock_rotation" => Direction::AnticlockRotation,
            "none" => Direction::None,
            _ => {
                return Err(ParseDirectionError {
                    input: s.to_owned(),
                });
            }
        };
        Ok(direction)
    }
}

/// A (row, column) coordinate with a color tag.
///
/// Row 0 is the top of the grid. Coordinates are unsigned and translate with
/// wrapping arithmetic: stepping above row 0 or left of column 0 produces a
/// huge value that every in-bounds check rejects, and stepping back restores
/// the original coordinate exactly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Block {
    row: usize,
    column: usize,
    color: Color,
}

impl Block {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self::with_color(row, column, Color::None)
    }

    #[must_use]
    pub const fn with_color(row: usize, column: usize, color: Color) -> Self {
        Self { row, column, color }
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn row_mut(&mut self) -> &mut usize {
        &mut self.row
    }

    pub fn column_mut(&mut self) -> &mut usize {
        &mut self.column
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Applies `length` unit steps in `direction`.
    ///
    /// Rotations and [`Direction::None`] leave the block unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfall_engine::{Block, Direction};
    ///
    /// let mut block = Block::new(3, 3);
    /// block.move_by(Direction::Down, 2);
    /// block.move_by(Direction::Left, 1);
    /// assert_eq!(block.position(), (5, 2));
    /// ```
    pub fn move_by(&mut self, direction: Direction, length: usize) {
        match direction {
            Direction::Up => self.row = self.row.wrapping_sub(length),
            Direction::Down => self.row = self.row.wrapping_add(length),
            Direction::Left => self.column = self.column.wrapping_sub(length),
            Direction::Right => self.column = self.column.wrapping_add(length),
            Direction::ClockRotation | Direction::AnticlockRotation | Direction::None => {}
        }
    }

    /// Offset of this block from `origin` as wrapping (row, column) differences.
    pub(crate) const fn offset_from(&self, origin: &Block) -> (usize, usize) {
        (
            self.row.wrapping_sub(origin.row),
            self.column.wrapping_sub(origin.column),
        )
    }

    pub(crate) const fn set_position(&mut self, row: usize, column: usize) {
        self.row = row;
        self.column = column;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_steps() {
        let mut block = Block::new(5, 5);
        block.move_by(Direction::Up, 1);
        assert_eq!(block.position(), (4, 5));
        block.move_by(Direction::Right, 3);
        assert_eq!(block.position(), (4, 8));
        block.move_by(Direction::Down, 2);
        assert_eq!(block.position(), (6, 8));
        block.move_by(Direction::Left, 8);
        assert_eq!(block.position(), (6, 0));
    }

    #[test]
    fn test_rotation_and_none_are_noops() {
        let mut block = Block::with_color(2, 7, Color::Red);
        for direction in [
            Direction::ClockRotation,
            Direction::AnticlockRotation,
            Direction::None,
        ] {
            block.move_by(direction, 3);
            assert_eq!(block, Block::with_color(2, 7, Color::Red));
        }
    }

    #[test]
    fn test_underflow_wraps_and_restores() {
        let mut block = Block::new(0, 0);
        block.move_by(Direction::Up, 1);
        block.move_by(Direction::Left, 2);
        assert_eq!(block.row(), usize::MAX);
        assert_eq!(block.column(), usize::MAX - 1);

        block.move_by(Direction::Down, 1);
        block.move_by(Direction::Right, 2);
        assert_eq!(block.position(), (0, 0));
    }

    #[test]
    fn test_reverse_is_involution() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::ClockRotation,
            Direction::AnticlockRotation,
            Direction::None,
        ] {
            assert_eq!(direction.reverse().reverse(), direction);
        }
        assert_eq!(Direction::Left.reverse(), Direction::Right);
        assert_eq!(Direction::Down.reverse(), Direction::Up);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("left".parse(), Ok(Direction::Left));
        assert_eq!("R".parse(), Ok(Direction::Right));
        assert_eq!("cw".parse(), Ok(Direction::ClockRotation));
        assert_eq!("anticlock_rotation".parse(), Ok(Direction::AnticlockRotation));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(ParseDirectionError {
                input: "sideways".to_owned()
            })
        );
    }

    #[test]
    fn test_direction_serialization() {
        let serialized = serde_json::to_string(&Direction::ClockRotation).unwrap();
        assert_eq!(serialized, "\"clock_rotation\"");
        let deserialized: Direction = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, Direction::ClockRotation);
    }
}
