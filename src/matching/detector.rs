//! Run detection over a grid snapshot.
//!
//! Rows are scanned first, then columns. Both passes read the same snapshot, so a
//! cell can belong to a horizontal and a vertical run at once. Spawn requests are
//! recorded in scan order; when two land on the same cell the later one wins, which
//! means a column-pass special takes precedence over a row-pass special.

use crate::board::{Grid, Position, SpecialEffect, TileColor};
use crate::engine::{LINE_CLEAR_RUN_LENGTH, MIN_RUN_LENGTH, SUPER_RUN_LENGTH};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A maximal line of three or more same-colored tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    pub axis: Axis,
    pub start: Position,
    pub length: usize,
    pub color: TileColor,
}

/// Request to place a special tile once the matched cells are cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpawnRequest {
    pub position: Position,
    pub color: TileColor,
    pub special: SpecialEffect,
}

/// Everything the detector found in one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Cells belonging to at least one run.
    pub matched: BTreeSet<Position>,
    /// Spawn requests in scan order (row pass, then column pass).
    pub spawns: Vec<SpawnRequest>,
    pub runs: Vec<Run>,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    /// One request per cell, the last one recorded winning.
    pub fn resolved_spawns(&self) -> Vec<SpawnRequest> {
        let mut by_cell: BTreeMap<Position, SpawnRequest> = BTreeMap::new();
        for request in &self.spawns {
            by_cell.insert(request.position, *request);
        }
        by_cell.into_values().collect()
    }

    fn record_run(&mut self, axis: Axis, cells: &[Position], color: TileColor) {
        let length = cells.len();
        self.matched.extend(cells.iter().copied());
        if let Some(special) = special_for_run(axis, length) {
            // Midpoint rounds toward the end of the run: end - ceil(length / 2).
            let position = cells[length - (length + 1) / 2];
            self.spawns.push(SpawnRequest {
                position,
                color,
                special,
            });
        }
        self.runs.push(Run {
            axis,
            start: cells[0],
            length,
            color,
        });
    }
}

/// The special a run of `length` earns, if any.
///
/// Four in a row clears the crossing line (a horizontal run yields a column clear and
/// vice versa); five or more yields a super tile.
pub fn special_for_run(axis: Axis, length: usize) -> Option<SpecialEffect> {
    if length >= SUPER_RUN_LENGTH {
        Some(SpecialEffect::Super)
    } else if length == LINE_CLEAR_RUN_LENGTH {
        Some(match axis {
            Axis::Horizontal => SpecialEffect::ColumnClear,
            Axis::Vertical => SpecialEffect::RowClear,
        })
    } else {
        None
    }
}

/// Find every run of three or more in the grid. Read-only.
pub fn find_matches(grid: &Grid) -> MatchReport {
    let size = grid.size();
    let mut report = MatchReport::default();

    for row in 0..size {
        let line: Vec<Position> = (0..size).map(|col| Position::new(row, col)).collect();
        scan_line(grid, Axis::Horizontal, &line, &mut report);
    }
    for col in 0..size {
        let line: Vec<Position> = (0..size).map(|row| Position::new(row, col)).collect();
        scan_line(grid, Axis::Vertical, &line, &mut report);
    }

    report
}

/// Walk one row or column, recording each run as it ends. Empty cells break runs.
fn scan_line(grid: &Grid, axis: Axis, line: &[Position], report: &mut MatchReport) {
    let mut start = 0;
    while start < line.len() {
        let Some(color) = grid.color_at(line[start]) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < line.len() && grid.color_at(line[end]) == Some(color) {
            end += 1;
        }

        if end - start >= MIN_RUN_LENGTH {
            report.record_run(axis, &line[start..end], color);
        }
        start = end;
    }
}
