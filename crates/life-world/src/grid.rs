//! 2D toroidal grid of cells.

use crate::rule;
use life_core::{validate_dimensions, Cell, Direction, Error, Position, Result};
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-size toroidal grid, stored row-major
///
/// Always holds exactly `width * height` cells. Out-of-range coordinates are
/// rejected by every public accessor; wrapping only happens internally when
/// looking up neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct GridData {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = Error;

    fn try_from(data: GridData) -> Result<Self> {
        Grid::from_cells(data.width, data.height, data.cells)
    }
}

/// Per-cell alive distribution for [`Grid::randomized`]
pub fn density(probability: f64) -> Result<Bernoulli> {
    Bernoulli::new(probability).map_err(|_| {
        Error::InvalidConfig(format!(
            "probability must be within [0, 1], got {}",
            probability
        ))
    })
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(width: u32, height: u32) -> Result<Self> {
        validate_dimensions(width, height)?;
        let size = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::dead(); size],
        })
    }

    /// Build a grid from row-major cells
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Result<Self> {
        validate_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(Error::InvalidConfig(format!(
                "a {}x{} grid needs {} cells, got {}",
                width,
                height,
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get cell at position
    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        let index = self.checked_index(pos)?;
        Ok(&self.cells[index])
    }

    /// Set cell at position
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        let index = self.checked_index(pos)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Flip the cell at `pos`, returning whether it is now alive
    pub fn toggle(&mut self, pos: Position) -> Result<bool> {
        let index = self.checked_index(pos)?;
        Ok(self.cells[index].toggle())
    }

    /// Count live cells among the eight toroidal neighbors of `pos`
    pub fn neighbor_count(&self, pos: Position) -> Result<u8> {
        self.checked_index(pos)?;
        Ok(self.live_neighbors(pos))
    }

    /// A grid of the same size with each cell alive per `density`
    pub fn randomized<R: Rng + ?Sized>(&self, rng: &mut R, density: &Bernoulli) -> Grid {
        let cells = (0..self.cells.len())
            .map(|_| {
                if density.sample(rng) {
                    Cell::born()
                } else {
                    Cell::dead()
                }
            })
            .collect();

        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// A grid of the same size with every cell dead
    pub fn cleared(&self) -> Grid {
        Grid {
            width: self.width,
            height: self.height,
            cells: vec![Cell::dead(); self.cells.len()],
        }
    }

    /// Compute the next generation from this grid
    ///
    /// Every cell of the result is derived from `self` alone, so no
    /// partially updated state is ever read.
    pub fn next_generation(&self) -> Grid {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let neighbors = self.live_neighbors(self.index_to_pos(i));
                rule::transition(*cell, neighbors)
            })
            .collect();

        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    pub fn newborn_count(&self) -> usize {
        self.cells.iter().filter(|c| c.newly_born).count()
    }

    /// True when no cell is alive
    pub fn is_lifeless(&self) -> bool {
        !self.cells.iter().any(|c| c.alive)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index % self.width as usize) as i32;
        let y = (index / self.width as usize) as i32;
        Position::new(x, y)
    }

    /// Iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell))
    }

    /// Iterator over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    fn live_neighbors(&self, pos: Position) -> u8 {
        Direction::all()
            .iter()
            .map(|d| {
                let (dx, dy) = d.to_delta();
                self.cell_wrapped(pos.add(dx, dy))
            })
            .filter(|c| c.alive)
            .count() as u8
    }

    fn cell_wrapped(&self, pos: Position) -> &Cell {
        let (width, height) = self.signed_dims();
        &self.cells[self.linear_index(pos.wrap(width, height))]
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        let (width, height) = self.signed_dims();
        if !pos.is_within(width, height) {
            return Err(Error::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.linear_index(pos))
    }

    // Callers guarantee `pos` is in range, so both coordinates are non-negative.
    fn linear_index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    // Dimensions are validated to fit in i32 at construction.
    fn signed_dims(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let glyph = match (cell.alive, cell.newly_born) {
                    (true, true) => 'o',
                    (true, false) => '#',
                    (false, _) => '.',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
