//! Hooks for presenting a cascade as it resolves.

use super::CascadeStep;
use crate::board::Grid;
use std::time::Duration;

/// Receives progress while a swap and its cascade resolve.
///
/// Every method has a no-op default; `()` is the headless observer. Pauses are
/// presentation hints and never change the resolved state.
pub trait CascadeObserver {
    /// A swap has been applied and is about to be validated.
    fn on_swap(&mut self, _grid: &Grid) {}

    /// A resolving step finished; `grid` still has the cleared holes in it.
    fn on_step(&mut self, _step: &CascadeStep, _grid: &Grid) {}

    fn pause(&mut self, _delay: Duration) {}
}

impl CascadeObserver for () {}

/// Observer that keeps a running score, for incremental score display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTicker {
    pub running_total: u32,
    pub ticks: Vec<u32>,
}

impl CascadeObserver for ScoreTicker {
    fn on_step(&mut self, step: &CascadeStep, _grid: &Grid) {
        self.running_total = self.running_total.saturating_add(step.points);
        self.ticks.push(self.running_total);
    }
}
