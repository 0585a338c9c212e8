// engine.rs - Produces the next generation from the current one

use std::sync::Arc;

use crate::grid::{Boundary, Grid};
use crate::rule::Rule;

/// Applies a [`Rule`] to whole grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleEngine {
    pub rule: Rule,
    pub boundary: Boundary,
}

impl RuleEngine {
    pub fn new(rule: Rule, boundary: Boundary) -> Self {
        Self { rule, boundary }
    }

    /// Compute the next generation. Every cell is decided from `grid` alone,
    /// so the result never depends on evaluation order.
    pub fn step(&self, grid: &Grid) -> Grid {
        let cells = (0..grid.rows()).flat_map(|row| self.next_row(grid, row)).collect();
        Grid::from_cells(grid.rows(), grid.cols(), cells)
    }

    /// Same result as [`RuleEngine::step`], with each row computed by its own tokio task.
    ///
    /// Rows are collected and the new grid is built only after every task has
    /// finished, so no partially updated generation ever escapes.
    ///
    /// Must be polled inside a tokio runtime; `tokio::spawn` panics otherwise.
    pub async fn step_concurrent(&self, grid: Arc<Grid>) -> Grid {
        let engine = *self;
        let handles: Vec<_> = (0..grid.rows())
            .map(|row| {
                let grid = Arc::clone(&grid);
                tokio::spawn(async move {
                    let cells = engine.next_row(&grid, row);
                    tokio::task::yield_now().await; // let sibling rows make progress
                    cells
                })
            })
            .collect();

        let mut cells = Vec::with_capacity(grid.rows() * grid.cols());
        for handle in handles {
            match handle.await {
                Ok(row_cells) => cells.extend(row_cells),
                Err(err) => std::panic::resume_unwind(err.into_panic()),
            }
        }
        Grid::from_cells(grid.rows(), grid.cols(), cells)
    }

    fn next_row(&self, grid: &Grid, row: usize) -> Vec<bool> {
        (0..grid.cols())
            .map(|col| {
                let neighbors = grid.live_neighbors(row, col, self.boundary);
                self.rule.next_state(grid.alive_at(row, col), neighbors)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Grid {
        Grid::new(5, 5, [(1, 0), (1, 1), (1, 2)]).unwrap()
    }

    #[test]
    fn blinker_has_period_two() {
        let engine = RuleEngine::default();
        let once = engine.step(&blinker());
        assert_ne!(once, blinker());
        assert_eq!(once, Grid::new(5, 5, [(0, 1), (1, 1), (2, 1)]).unwrap());
        assert_eq!(engine.step(&once), blinker());
    }

    #[test]
    fn block_is_still_life() {
        let engine = RuleEngine::default();
        let block = Grid::new(4, 4, [(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();
        assert_eq!(engine.step(&block), block);
    }

    #[test]
    fn dead_grid_is_fixed_point() {
        let dead = Grid::dead(6, 3).unwrap();
        let next = RuleEngine::default().step(&dead);
        assert_eq!(next, dead);
        assert!(next.is_extinct());
    }

    #[test]
    fn lone_cell_dies() {
        let lone = Grid::new(5, 5, [(2, 2)]).unwrap();
        assert!(RuleEngine::default().step(&lone).is_extinct());
    }

    #[test]
    fn corner_block_survives_bounded_edges() {
        // A block in the corner only sees in-grid neighbors.
        let block = Grid::new(3, 3, [(0, 0), (0, 1), (1, 0), (1, 1)]).unwrap();
        assert_eq!(RuleEngine::default().step(&block), block);
    }

    #[test]
    fn toroidal_blinker_wraps_across_edge() {
        let engine = RuleEngine::new(Rule::CONWAY, Boundary::Toroidal);
        // Horizontal blinker split over the left/right edge.
        let split = Grid::new(5, 5, [(2, 4), (2, 0), (2, 1)]).unwrap();
        let vertical = engine.step(&split);
        assert_eq!(vertical, Grid::new(5, 5, [(1, 0), (2, 0), (3, 0)]).unwrap());
        assert_eq!(engine.step(&vertical), split);

        // Bounded, none of the pieces has enough neighbors.
        let bounded = RuleEngine::default().step(&split);
        assert!(bounded.is_extinct());
    }

    #[test]
    fn step_is_deterministic() {
        let engine = RuleEngine::new(Rule::HIGHLIFE, Boundary::Bounded);
        let soup = crate::patterns::random_grid(16, 16, 7).unwrap();
        assert_eq!(engine.step(&soup), engine.step(&soup));
    }

    #[test]
    #[should_panic]
    fn concurrent_step_outside_runtime_panics() {
        use std::task::{Context, Waker};

        let engine = RuleEngine::default();
        let mut step = std::pin::pin!(engine.step_concurrent(Arc::new(blinker())));
        let mut cx = Context::from_waker(Waker::noop());
        let _ = step.as_mut().poll(&mut cx);
    }

    #[tokio::test]
    async fn concurrent_step_matches_serial() {
        let engine = RuleEngine::default();
        let soup = Arc::new(crate::patterns::random_grid(24, 31, 42).unwrap());
        let serial = engine.step(&soup);
        let concurrent = engine.step_concurrent(Arc::clone(&soup)).await;
        assert_eq!(concurrent, serial);
    }
}
