// history.rs - Remembers every generation seen so far to detect cycles

use std::collections::hash_map::{Entry, HashMap};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::warn;

use crate::error::Advisory;
use crate::grid::Grid;

/// Result of recording one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// First time this configuration has been seen.
    Novel,
    /// Seen before, first at the given generation index.
    Repeat(u64),
}

/// Maps the canonical encoding of each generation to the index it first appeared at.
///
/// Without a cap the whole run is remembered. With a cap only the most recent
/// `cap` states are kept, so longer cycles go unnoticed; the first eviction is
/// reported through [`HistoryTracker::cap_exceeded`].
#[derive(Debug, Default)]
pub struct HistoryTracker {
    seen: HashMap<Arc<[u8]>, u64>,
    window: VecDeque<Arc<[u8]>>, // insertion order, only kept when capped
    recorded: u64,
    cap: Option<NonZeroUsize>,
    cap_exceeded: Option<Advisory>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(cap: NonZeroUsize) -> Self {
        Self { cap: Some(cap), ..Self::default() }
    }

    /// Record `grid` as the next generation, or report where it was first seen.
    ///
    /// Every call is one generation, repeat or not. Lookup and insertion go
    /// through a single map entry, so a generation can never match itself.
    pub fn record_and_check(&mut self, grid: &Grid) -> Outcome {
        let index = self.recorded;
        self.recorded += 1;
        let encoding: Arc<[u8]> = grid.canonical_encoding().into();
        match self.seen.entry(encoding) {
            Entry::Occupied(first) => Outcome::Repeat(*first.get()),
            Entry::Vacant(slot) => {
                if self.cap.is_some() {
                    self.window.push_back(Arc::clone(slot.key()));
                }
                slot.insert(index);
                self.evict_past_cap(index);
                Outcome::Novel
            }
        }
    }

    /// Number of generations passed to [`HistoryTracker::record_and_check`],
    /// repeats included.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// Number of states currently available for comparison.
    pub fn tracked(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    pub fn cap(&self) -> Option<NonZeroUsize> {
        self.cap
    }

    pub fn cap_exceeded(&self) -> Option<Advisory> {
        self.cap_exceeded
    }

    fn evict_past_cap(&mut self, generation: u64) {
        let Some(cap) = self.cap.map(NonZeroUsize::get) else {
            return;
        };
        while self.window.len() > cap {
            if let Some(oldest) = self.window.pop_front() {
                self.seen.remove(&oldest);
            }
            if self.cap_exceeded.is_none() {
                let advisory = Advisory::HistoryCapExceeded { cap, generation };
                warn!(cap, generation, "{advisory}");
                self.cap_exceeded = Some(advisory);
            }
        }
    }
}
