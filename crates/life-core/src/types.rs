//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the grid, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given grid dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }

    /// Whether the position addresses a cell of a `width` x `height` grid without wrapping
    pub fn is_within(&self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight Moore-neighborhood directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// Cell state
///
/// `newly_born` is a presentation marker only: it is true exactly when the
/// cell became alive during the most recent mutation and is never read by
/// the transition rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub alive: bool,
    #[serde(default)]
    pub newly_born: bool,
}

impl Cell {
    pub fn dead() -> Self {
        Self {
            alive: false,
            newly_born: false,
        }
    }

    /// A cell that has just come to life
    pub fn born() -> Self {
        Self {
            alive: true,
            newly_born: true,
        }
    }

    /// A live cell carried over from the previous generation
    pub fn survivor() -> Self {
        Self {
            alive: true,
            newly_born: false,
        }
    }

    /// Flip the cell, returning whether it is now alive
    pub fn toggle(&mut self) -> bool {
        *self = if self.alive { Cell::dead() } else { Cell::born() };
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(5, 5));

        let pos = Position::new(-1, -1);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(9, 9));

        let pos = Position::new(10, 10);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(0, 0));
    }

    #[test]
    fn test_position_wrap_rectangular() {
        assert_eq!(Position::new(-1, 0).wrap(40, 25), Position::new(39, 0));
        assert_eq!(Position::new(0, 25).wrap(40, 25), Position::new(0, 0));
        assert_eq!(Position::new(40, -1).wrap(40, 25), Position::new(0, 24));
    }

    #[test]
    fn test_position_is_within() {
        assert!(Position::new(0, 0).is_within(3, 2));
        assert!(Position::new(2, 1).is_within(3, 2));
        assert!(!Position::new(3, 1).is_within(3, 2));
        assert!(!Position::new(0, 2).is_within(3, 2));
        assert!(!Position::new(-1, 0).is_within(3, 2));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.to_delta(), (0, -1));
        assert_eq!(Direction::South.to_delta(), (0, 1));
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
    }

    #[test]
    fn test_directions_cover_moore_neighborhood() {
        let mut deltas: Vec<_> = Direction::all().iter().map(|d| d.to_delta()).collect();
        deltas.sort();
        deltas.dedup();
        assert_eq!(deltas.len(), 8);
        assert!(!deltas.contains(&(0, 0)));
    }

    #[test]
    fn test_cell_toggle() {
        let mut cell = Cell::dead();
        assert!(cell.toggle());
        assert_eq!(cell, Cell::born());

        assert!(!cell.toggle());
        assert_eq!(cell, Cell::dead());

        let mut survivor = Cell::survivor();
        assert!(!survivor.toggle());
        assert!(!survivor.newly_born);
    }

    #[test]
    fn test_cell_deserialize_without_marker() {
        let cell: Cell = serde_json::from_str(r#"{"alive":true}"#).unwrap();
        assert_eq!(cell, Cell::survivor());
    }
}
