//! Conway's Game of Life on a finite grid, with cycle detection across the
//! whole history of a run.
//!
//! A [`Simulation`] starts from an initial [`Grid`], applies a [`RuleEngine`]
//! one generation at a time and stops when the generation bound is reached,
//! the population dies out, or a configuration repeats one seen earlier.
//! Colors, coordinates and configuration exist for the code that sits around
//! the automaton (renderers and drivers); the automaton itself performs no I/O.

pub mod color;
pub mod config;
pub mod coords;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod rule;
pub mod simulation;

pub use color::{Color, Palette};
pub use config::{ConfigSource, LifeConfig, RenderSettings, RunSetup};
pub use coords::{Coordinates, MatrixLocation};
pub use engine::RuleEngine;
pub use error::{Advisory, LifeError, Result};
pub use grid::{Boundary, Grid};
pub use history::{HistoryTracker, Outcome};
pub use patterns::{PATTERNS, Pattern};
pub use rule::Rule;
pub use simulation::{GenerationEvent, Simulation, SimulationResult, SimulationSettings, Termination};
