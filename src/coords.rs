// coords.rs - Pixel-space coordinates and grid-space matrix locations
//
// The automaton indexes cells directly by (row, col). These types exist for the
// edges of the system: configuration files and renderers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i64,
    pub y: i64,
}

/// A cell location in grid space. Ordered row-major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatrixLocation {
    pub row: i64,
    pub col: i64,
}

impl Coordinates {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Step one unit back along both axes.
    pub const fn pred(self) -> Self {
        Self { x: self.x - 1, y: self.y - 1 }
    }
}

impl MatrixLocation {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub const fn pred(self) -> Self {
        Self { row: self.row - 1, col: self.col - 1 }
    }

    /// Validate against a `rows x cols` grid and convert to unsigned indices.
    pub fn to_cell(self, rows: usize, cols: usize) -> Result<(usize, usize)> {
        let row = usize::try_from(self.row).ok().filter(|&r| r < rows);
        let col = usize::try_from(self.col).ok().filter(|&c| c < cols);
        match (row, col) {
            (Some(row), Some(col)) => Ok((row, col)),
            _ => Err(LifeError::InvalidConfiguration(format!(
                "location {self} is outside the {rows}x{cols} grid"
            ))),
        }
    }
}

// row <-> y, col <-> x
impl From<MatrixLocation> for Coordinates {
    fn from(loc: MatrixLocation) -> Self {
        Self { x: loc.col, y: loc.row }
    }
}

impl From<Coordinates> for MatrixLocation {
    fn from(point: Coordinates) -> Self {
        Self { row: point.y, col: point.x }
    }
}

impl From<(usize, usize)> for MatrixLocation {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row: row as i64, col: col as i64 }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={}, y={})", self.x, self.y)
    }
}

impl fmt::Display for MatrixLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row={}, col={})", self.row, self.col)
    }
}
