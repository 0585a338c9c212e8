// error.rs - Error and advisory types shared by the whole crate

use std::fmt;

use thiserror::Error;

/// Errors reported by grid construction, rule parsing and configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A cell coordinate lies outside the grid.
    #[error("cell (row={row}, col={col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A grid was requested with zero rows or columns, or more cells than fit in memory.
    #[error("grid dimensions {rows}x{cols} must be non-zero and fit in memory")]
    InvalidDimensions { rows: usize, cols: usize },
    /// The configuration source supplied inconsistent data.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A rule string was not in `B<digits>/S<digits>` form.
    #[error("invalid rule {0:?}")]
    InvalidRule(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;

/// Non-fatal notes returned alongside a simulation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// History tracking hit its cap; cycles longer than `cap` generations can no longer be detected.
    HistoryCapExceeded { cap: usize, generation: u64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::HistoryCapExceeded { cap, generation } => write!(
                f,
                "history cap of {cap} generations reached at generation {generation}; \
                 only the most recent {cap} states are compared from here on"
            ),
        }
    }
}
