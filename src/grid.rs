// grid.rs - Immutable cell storage for one generation of the board

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};

/// Moore neighborhood, clockwise from the top-left cell.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, 1),
    (1, 1),   (1, 0),  (1, -1), (0, -1),
];

/// How neighbor lookups treat positions past the edge of the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Off-grid neighbors are permanently dead.
    #[default]
    Bounded,
    /// Edges wrap around to the opposite side.
    Toroidal,
}

/// A `rows x cols` snapshot of alive/dead cells.
///
/// There is no public way to change a cell once the grid exists; the next
/// generation is always a new `Grid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>, // row-major
}

impl Grid {
    /// Build a grid where only the given `(row, col)` cells are alive.
    pub fn new<I>(rows: usize, cols: usize, live_cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::dead(rows, cols)?;
        for (row, col) in live_cells {
            let index = grid.index(row, col)?;
            grid.cells[index] = true;
        }
        Ok(grid)
    }

    /// An all-dead grid. Fails if either dimension is zero or the cell count
    /// does not fit in memory.
    pub fn dead(rows: usize, cols: usize) -> Result<Self> {
        let invalid = LifeError::InvalidDimensions { rows, cols };
        if rows == 0 || cols == 0 {
            return Err(invalid);
        }
        let len = rows.checked_mul(cols).ok_or_else(|| invalid.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, false);
        Ok(Self { rows, cols, cells })
    }

    /// Assemble a grid from a complete row-major cell vector produced by the engine.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.cells[self.index(row, col)?])
    }

    /// Live cells among the eight Moore neighbors, with off-grid positions dead.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> Result<u8> {
        self.count_live_neighbors_on(row, col, Boundary::Bounded)
    }

    pub fn count_live_neighbors_on(&self, row: usize, col: usize, boundary: Boundary) -> Result<u8> {
        self.index(row, col)?;
        Ok(self.live_neighbors(row, col, boundary))
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.contains(&true)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| (index / cols, index % cols))
    }

    /// Dimension-prefixed, bit-packed form of the grid.
    ///
    /// Layout: `rows` and `cols` as little-endian u64, then the cells row-major,
    /// eight per byte, least significant bit first. Two grids are equal iff
    /// their encodings are byte-identical.
    pub fn canonical_encoding(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.cells.len().div_ceil(8));
        bytes.extend_from_slice(&(self.rows as u64).to_le_bytes());
        bytes.extend_from_slice(&(self.cols as u64).to_le_bytes());
        bytes.extend(self.cells.chunks(8).map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (bit, &alive)| byte | ((alive as u8) << bit))
        }));
        bytes
    }

    /// Neighbor count for a coordinate already known to be in bounds.
    pub(crate) fn live_neighbors(&self, row: usize, col: usize, boundary: Boundary) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| self.neighbor_index(row, col, dr, dc, boundary))
            .filter(|&index| self.cells[index])
            .count() as u8
    }

    /// Unchecked read for coordinates the caller has already validated.
    pub(crate) fn alive_at(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    fn neighbor_index(&self, row: usize, col: usize, dr: isize, dc: isize, boundary: Boundary) -> Option<usize> {
        let (r, c) = match boundary {
            Boundary::Bounded => {
                let r = row.checked_add_signed(dr).filter(|&r| r < self.rows)?;
                let c = col.checked_add_signed(dc).filter(|&c| c < self.cols)?;
                (r, c)
            }
            Boundary::Toroidal => (
                (row as isize + dr).rem_euclid(self.rows as isize) as usize,
                (col as isize + dc).rem_euclid(self.cols as isize) as usize,
            ),
        };
        Some(r * self.cols + c)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(row * self.cols + col)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().map(|&alive| if alive { '*' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
