// simulation.rs - Drives generations until a bound, extinction or a cycle

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::RuleEngine;
use crate::error::Advisory;
use crate::grid::Grid;
use crate::history::{HistoryTracker, Outcome};

pub const DEFAULT_MAX_GEN: u64 = 1000;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    MaxGenReached,
    Extinct,
    /// The latest generation repeats one seen `period` generations earlier.
    /// A period of 1 is a still life.
    CycleDetected { period: u64 },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::MaxGenReached => write!(f, "maximum generation reached"),
            Termination::Extinct => write!(f, "extinct"),
            Termination::CycleDetected { period: 1 } => write!(f, "stable (period 1)"),
            Termination::CycleDetected { period } => write!(f, "cycle detected (period {period})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSettings {
    /// Highest generation index the run may reach.
    pub max_gen: u64,
    pub engine: RuleEngine,
    /// Limit on remembered generations; `None` remembers the whole run.
    pub history_cap: Option<NonZeroUsize>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_gen: DEFAULT_MAX_GEN,
            engine: RuleEngine::default(),
            history_cap: None,
        }
    }
}

/// One generation handed to observers such as renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationEvent {
    pub index: u64,
    pub grid: Arc<Grid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    pub final_generation: u64,
    pub termination: Termination,
    pub grid: Arc<Grid>,
    pub advisories: Vec<Advisory>,
}

/// A single run of the automaton.
///
/// Iterating yields generation 0 first, then every generation produced until
/// the run terminates. Stop iterating at any point to abandon the run; no work
/// is done between events.
#[derive(Debug)]
pub struct Simulation {
    settings: SimulationSettings,
    history: HistoryTracker,
    generation: u64,
    current: Arc<Grid>,
    started: bool,
    result: Option<SimulationResult>,
}

impl Simulation {
    pub fn new(initial: Grid, settings: SimulationSettings) -> Self {
        let mut history = match settings.history_cap {
            Some(cap) => HistoryTracker::with_cap(cap),
            None => HistoryTracker::new(),
        };
        // Generation 0 against an empty history is always novel.
        history.record_and_check(&initial);
        Self {
            settings,
            history,
            generation: 0,
            current: Arc::new(initial),
            started: false,
            result: None,
        }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> &Arc<Grid> {
        &self.current
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Set once the run has terminated.
    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<SimulationResult> {
        self.result
    }

    /// Run to termination, discarding intermediate generations.
    pub fn run(mut self) -> SimulationResult {
        loop {
            if let Some(result) = self.result.take() {
                return result;
            }
            self.next();
        }
    }

    /// Run while `observer` returns `Continue`.
    ///
    /// Returns the result whenever the run has terminated, including when the
    /// observer breaks on the event that closes a cycle. Breaking before the
    /// run terminates yields `None`.
    pub fn run_with<F>(mut self, mut observer: F) -> Option<SimulationResult>
    where
        F: FnMut(&GenerationEvent) -> ControlFlow<()>,
    {
        while let Some(event) = self.next() {
            if observer(&event).is_break() {
                break;
            }
        }
        self.result
    }

    /// Like [`Iterator::next`], but computes the step with
    /// [`RuleEngine::step_concurrent`]. Must be polled inside a tokio runtime.
    pub async fn next_concurrent(&mut self) -> Option<GenerationEvent> {
        if !self.started {
            return Some(self.start());
        }
        if !self.ready_to_step() {
            return None;
        }
        let next = self.settings.engine.step_concurrent(Arc::clone(&self.current)).await;
        Some(self.adopt(next))
    }

    fn start(&mut self) -> GenerationEvent {
        self.started = true;
        GenerationEvent { index: 0, grid: Arc::clone(&self.current) }
    }

    /// Checks the terminal conditions that come before computing a step.
    fn ready_to_step(&mut self) -> bool {
        if self.result.is_some() {
            return false;
        }
        if self.generation == self.settings.max_gen {
            self.finish(Termination::MaxGenReached);
            return false;
        }
        if self.current.is_extinct() {
            self.finish(Termination::Extinct);
            return false;
        }
        true
    }

    fn adopt(&mut self, next: Grid) -> GenerationEvent {
        let outcome = self.history.record_and_check(&next);
        self.generation += 1;
        self.current = Arc::new(next);
        debug!(
            generation = self.generation,
            population = self.current.population(),
            "generation computed"
        );

        if let Outcome::Repeat(first) = outcome {
            self.finish(Termination::CycleDetected { period: self.generation - first });
        }
        GenerationEvent { index: self.generation, grid: Arc::clone(&self.current) }
    }

    fn finish(&mut self, termination: Termination) {
        info!(generation = self.generation, %termination, "simulation finished");
        self.result = Some(SimulationResult {
            final_generation: self.generation,
            termination,
            grid: Arc::clone(&self.current),
            advisories: self.history.cap_exceeded().into_iter().collect(),
        });
    }
}

impl Iterator for Simulation {
    type Item = GenerationEvent;

    fn next(&mut self) -> Option<GenerationEvent> {
        if !self.started {
            return Some(self.start());
        }
        if !self.ready_to_step() {
            return None;
        }
        let next = self.settings.engine.step(&self.current);
        Some(self.adopt(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Boundary;
    use crate::rule::Rule;

    fn settings(max_gen: u64) -> SimulationSettings {
        SimulationSettings { max_gen, ..SimulationSettings::default() }
    }

    #[test]
    fn max_gen_zero_stops_immediately() {
        let blinker = Grid::new(5, 5, [(1, 0), (1, 1), (1, 2)]).unwrap();
        let result = Simulation::new(blinker.clone(), settings(0)).run();
        assert_eq!(result.termination, Termination::MaxGenReached);
        assert_eq!(result.final_generation, 0);
        assert_eq!(*result.grid, blinker);

        // Even an extinct board reports the bound first.
        let dead = Simulation::new(Grid::dead(3, 3).unwrap(), settings(0)).run();
        assert_eq!(dead.termination, Termination::MaxGenReached);
    }

    #[test]
    fn lone_cell_goes_extinct_at_generation_one() {
        let lone = Grid::new(5, 5, [(2, 2)]).unwrap();
        let result = Simulation::new(lone, settings(10)).run();
        assert_eq!(result.termination, Termination::Extinct);
        assert_eq!(result.final_generation, 1);
        assert!(result.grid.is_extinct());
    }

    #[test]
    fn dead_start_is_extinct_at_zero() {
        let result = Simulation::new(Grid::dead(4, 4).unwrap(), settings(10)).run();
        assert_eq!(result.termination, Termination::Extinct);
        assert_eq!(result.final_generation, 0);
    }

    #[test]
    fn blinker_cycles_with_period_two() {
        let blinker = Grid::new(5, 5, [(1, 0), (1, 1), (1, 2)]).unwrap();
        let mut sim = Simulation::new(blinker.clone(), settings(100));
        let events: Vec<_> = sim.by_ref().collect();
        assert_eq!(events.iter().map(|e| e.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(*events[2].grid, blinker);

        let result = sim.into_result().unwrap();
        assert_eq!(result.termination, Termination::CycleDetected { period: 2 });
        assert_eq!(result.final_generation, 2);
        assert!(result.advisories.is_empty());
    }

    #[test]
    fn block_is_detected_as_period_one() {
        let block = Grid::new(4, 4, [(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();
        let result = Simulation::new(block, settings(100)).run();
        assert_eq!(result.termination, Termination::CycleDetected { period: 1 });
        assert_eq!(result.final_generation, 1);
    }

    #[test]
    fn max_gen_wins_before_cycle_closes() {
        let blinker = Grid::new(5, 5, [(1, 0), (1, 1), (1, 2)]).unwrap();
        let result = Simulation::new(blinker, settings(1)).run();
        assert_eq!(result.termination, Termination::MaxGenReached);
        assert_eq!(result.final_generation, 1);
    }

    #[test]
    fn observer_can_stop_early() {
        let glider = crate::patterns::Pattern::find("Glider").unwrap().place(20, 20, (0, 0)).unwrap();
        let mut seen = Vec::new();
        let result = Simulation::new(glider, settings(100)).run_with(|event| {
            seen.push(event.index);
            if event.index == 3 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        });
        assert_eq!(result, None);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn observer_breaking_on_closing_event_still_gets_result() {
        let blinker = Grid::new(5, 5, [(1, 0), (1, 1), (1, 2)]).unwrap();
        let result = Simulation::new(blinker, settings(100)).run_with(|event| {
            if event.index == 2 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        });
        let result = result.unwrap();
        assert_eq!(result.termination, Termination::CycleDetected { period: 2 });
        assert_eq!(result.final_generation, 2);
    }

    #[test]
    fn history_cap_is_reported_with_result() {
        // A glider on a wrapping board never repeats within a two-state window.
        let glider = crate::patterns::Pattern::find("Glider").unwrap().place(12, 12, (0, 0)).unwrap();
        let settings = SimulationSettings {
            max_gen: 20,
            engine: RuleEngine::new(Rule::CONWAY, Boundary::Toroidal),
            history_cap: NonZeroUsize::new(2),
        };
        let result = Simulation::new(glider, settings).run();
        assert_eq!(result.termination, Termination::MaxGenReached);
        assert_eq!(result.advisories, vec![Advisory::HistoryCapExceeded { cap: 2, generation: 2 }]);
    }

    #[tokio::test]
    async fn concurrent_run_matches_serial() {
        let soup = crate::patterns::random_grid(18, 18, 3).unwrap();
        let serial: Vec<_> = Simulation::new(soup.clone(), settings(40)).collect();

        let mut sim = Simulation::new(soup, settings(40));
        let mut concurrent = Vec::new();
        while let Some(event) = sim.next_concurrent().await {
            concurrent.push(event);
        }
        assert_eq!(concurrent, serial);
        assert!(sim.is_finished());
    }
}
