//! The cascade state machine.
//!
//! `Scanning -> Resolving -> Collapsing -> Refilling -> Scanning ...` until a scan
//! comes back empty, then `Done`. The resolver owns the grid for the whole cascade
//! and hands it back through [`CascadeResolver::finish`].

use super::gravity::{collapse, refill};
use super::observer::CascadeObserver;
use super::plan::ResolutionPlan;
use crate::board::{special_tile, Grid, Position, TileColor};
use crate::engine::{EngineConfig, INITIAL_COMBO_MULTIPLIER};
use crate::matching::{find_matches, MatchReport, SpawnRequest};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CascadePhase {
    Scanning,
    Resolving,
    Collapsing,
    Refilling,
    Done,
}

/// Record of one resolving pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeStep {
    /// Zero-based pass number within the cascade.
    pub index: usize,
    pub combo_multiplier: u32,
    pub removed: Vec<Position>,
    pub shielded: Vec<Position>,
    pub triggered: Vec<Position>,
    /// Special tiles actually placed, one per cell.
    pub spawned: Vec<SpawnRequest>,
    pub points: u32,
}

/// Final state of a cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeOutcome {
    /// Stable grid with no runs.
    pub grid: Grid,
    pub total_score: u32,
    pub steps: Vec<CascadeStep>,
    /// Tiles removed per color across all passes.
    pub cleared_by_color: BTreeMap<TileColor, u32>,
}

impl CascadeOutcome {
    /// Number of resolving passes.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Highest combo multiplier any pass scored with, 0 if nothing resolved.
    pub fn max_combo(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| s.combo_multiplier)
            .max()
            .unwrap_or(0)
    }

    pub fn tiles_removed(&self) -> usize {
        self.steps.iter().map(|s| s.removed.len()).sum()
    }
}

/// Step-at-a-time driver for one cascade.
#[derive(Debug, Clone)]
pub struct CascadeResolver {
    grid: Grid,
    phase: CascadePhase,
    combo_multiplier: u32,
    base_points: u32,
    step_delay: Duration,
    pending: Option<MatchReport>,
    vacated: Vec<usize>,
    total_score: u32,
    steps: Vec<CascadeStep>,
    cleared_by_color: BTreeMap<TileColor, u32>,
}

impl CascadeResolver {
    pub fn new(grid: Grid, config: &EngineConfig) -> Self {
        Self {
            grid,
            phase: CascadePhase::Scanning,
            combo_multiplier: INITIAL_COMBO_MULTIPLIER,
            base_points: config.base_tile_points,
            step_delay: config.pacing.step_delay(),
            pending: None,
            vacated: Vec::new(),
            total_score: 0,
            steps: Vec::new(),
            cleared_by_color: BTreeMap::new(),
        }
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Run the current phase and move to the next one. Returns the new phase.
    pub fn advance<R: Rng, O: CascadeObserver>(
        &mut self,
        rng: &mut R,
        observer: &mut O,
    ) -> CascadePhase {
        self.phase = match self.phase {
            CascadePhase::Scanning => {
                let report = find_matches(&self.grid);
                if report.is_empty() {
                    CascadePhase::Done
                } else {
                    trace!(matched = report.len(), "scan found runs");
                    self.pending = Some(report);
                    CascadePhase::Resolving
                }
            }
            CascadePhase::Resolving => {
                if let Some(report) = self.pending.take() {
                    let step = self.resolve(&report, rng);
                    observer.on_step(&step, &self.grid);
                    self.steps.push(step);
                }
                CascadePhase::Collapsing
            }
            CascadePhase::Collapsing => {
                self.vacated = collapse(&mut self.grid);
                CascadePhase::Refilling
            }
            CascadePhase::Refilling => {
                refill(&mut self.grid, &self.vacated, rng);
                self.vacated.clear();
                self.combo_multiplier += 1;
                observer.pause(self.step_delay);
                CascadePhase::Scanning
            }
            CascadePhase::Done => CascadePhase::Done,
        };
        self.phase
    }

    /// Apply one resolving pass: shields, removals, scoring and special spawns.
    fn resolve<R: Rng>(&mut self, report: &MatchReport, rng: &mut R) -> CascadeStep {
        let plan = ResolutionPlan::derive(&self.grid, &report.matched);

        for &pos in &plan.shielded {
            if let Some(tile) = self.grid.get_mut(pos) {
                tile.absorb_hit();
            }
        }
        for &pos in &plan.removed {
            if let Some(tile) = self.grid.take(pos) {
                *self.cleared_by_color.entry(tile.color).or_insert(0) += 1;
            }
        }

        let points = (plan.removed.len() as u32)
            .saturating_mul(self.base_points)
            .saturating_mul(self.combo_multiplier);
        self.total_score = self.total_score.saturating_add(points);

        let mut spawned = Vec::new();
        for request in report.resolved_spawns() {
            let pos = request.position;
            if self.grid.is_empty_at(pos) || plan.removed.contains(&pos) {
                let tile = special_tile(pos, request.color, request.special, rng);
                self.grid.place(pos, tile);
                spawned.push(request);
            }
        }

        let step = CascadeStep {
            index: self.steps.len(),
            combo_multiplier: self.combo_multiplier,
            removed: plan.removed.into_iter().collect(),
            shielded: plan.shielded.into_iter().collect(),
            triggered: plan.triggered.into_iter().collect(),
            spawned,
            points,
        };
        debug!(
            step = step.index,
            combo = step.combo_multiplier,
            removed = step.removed.len(),
            shielded = step.shielded.len(),
            spawned = step.spawned.len(),
            points,
            "cascade step resolved"
        );
        step
    }

    pub fn finish(self) -> CascadeOutcome {
        CascadeOutcome {
            grid: self.grid,
            total_score: self.total_score,
            steps: self.steps,
            cleared_by_color: self.cleared_by_color,
        }
    }
}

/// Resolve every run in `grid` until it is stable.
#[instrument(skip_all, fields(size = grid.size()))]
pub fn resolve_cascade<R: Rng, O: CascadeObserver>(
    grid: Grid,
    config: &EngineConfig,
    rng: &mut R,
    observer: &mut O,
) -> CascadeOutcome {
    let mut resolver = CascadeResolver::new(grid, config);
    while resolver.advance(rng, observer) != CascadePhase::Done {}
    let outcome = resolver.finish();
    debug!(
        depth = outcome.depth(),
        total_score = outcome.total_score,
        "cascade settled"
    );
    outcome
}
