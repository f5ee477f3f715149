//! Splitting a raw match set into shielded and removed cells.

use crate::board::{Grid, Position, SpecialEffect};
use std::collections::BTreeSet;

/// What one resolving pass does to the grid, derived without mutating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPlan {
    /// Unshielded matched cells whose special effect fires this pass.
    pub triggered: BTreeSet<Position>,
    /// Occupied cells that lose one ice layer and stay put.
    pub shielded: BTreeSet<Position>,
    /// Occupied cells that are scored and cleared.
    pub removed: BTreeSet<Position>,
}

impl ResolutionPlan {
    /// Derive the plan for `matched` against the pre-resolution grid.
    ///
    /// Specials fire only from the raw matched set; cells pulled in by an effect are
    /// shielded or removed like any other, but their own specials do not fire until a
    /// later pass.
    pub fn derive(grid: &Grid, matched: &BTreeSet<Position>) -> Self {
        let triggered: BTreeSet<Position> = matched
            .iter()
            .copied()
            .filter(|&pos| {
                grid.get(pos)
                    .is_some_and(|tile| !tile.is_shielded() && has_area_effect(tile.special))
            })
            .collect();

        let mut affected = matched.clone();
        for &pos in &triggered {
            if let Some(tile) = grid.get(pos) {
                affected.extend(effect_area(tile.special, pos, grid.size()));
            }
        }

        let (shielded, removed): (BTreeSet<Position>, BTreeSet<Position>) = affected
            .into_iter()
            .filter(|&pos| !grid.is_empty_at(pos))
            .partition(|&pos| grid.get(pos).is_some_and(|tile| tile.is_shielded()));

        Self {
            triggered,
            shielded,
            removed,
        }
    }
}

fn has_area_effect(special: SpecialEffect) -> bool {
    matches!(
        special,
        SpecialEffect::RowClear | SpecialEffect::ColumnClear | SpecialEffect::AreaBomb
    )
}

/// Cells cleared by a special effect fired at `origin`.
pub fn effect_area(special: SpecialEffect, origin: Position, size: usize) -> Vec<Position> {
    match special {
        SpecialEffect::RowClear => (0..size).map(|col| Position::new(origin.row, col)).collect(),
        SpecialEffect::ColumnClear => {
            (0..size).map(|row| Position::new(row, origin.col)).collect()
        }
        SpecialEffect::AreaBomb => {
            let rows = origin.row.saturating_sub(1)..=(origin.row + 1).min(size - 1);
            rows.flat_map(|row| {
                let cols = origin.col.saturating_sub(1)..=(origin.col + 1).min(size - 1);
                cols.map(move |col| Position::new(row, col))
            })
            .collect()
        }
        SpecialEffect::None | SpecialEffect::Super => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::find_matches;

    const BASE: [&str; 8] = [
        "BPTKABPT", "TKABPTKA", "ABPTKABP", "PTKAAAAK", "KABPTKAB", "BPTKABPT", "TKABPTKA",
        "ABPTKABP",
    ];

    fn run_grid() -> Grid {
        // Row 3 has Amber at cols 3..=6.
        Grid::from_pattern(&BASE).unwrap()
    }

    #[test]
    fn test_plain_run_removes_everything() {
        let grid = run_grid();
        let report = find_matches(&grid);
        let plan = ResolutionPlan::derive(&grid, &report.matched);
        assert_eq!(plan.removed, report.matched);
        assert!(plan.shielded.is_empty());
        assert!(plan.triggered.is_empty());
    }

    #[test]
    fn test_frozen_tile_is_shielded_not_removed() {
        let mut grid = run_grid();
        grid.get_mut(Position::new(3, 4)).unwrap().frozen_layers = 2;
        let report = find_matches(&grid);
        let plan = ResolutionPlan::derive(&grid, &report.matched);

        assert_eq!(plan.shielded, BTreeSet::from([Position::new(3, 4)]));
        assert_eq!(plan.removed.len(), 3);
        assert!(!plan.removed.contains(&Position::new(3, 4)));
    }

    #[test]
    fn test_row_clear_expands_whole_row() {
        let mut grid = run_grid();
        grid.get_mut(Position::new(3, 5)).unwrap().special = SpecialEffect::RowClear;
        let report = find_matches(&grid);
        let plan = ResolutionPlan::derive(&grid, &report.matched);

        assert_eq!(plan.triggered, BTreeSet::from([Position::new(3, 5)]));
        assert_eq!(plan.removed.len(), 8);
        assert!((0..8).all(|c| plan.removed.contains(&Position::new(3, c))));
    }

    #[test]
    fn test_column_clear_expands_whole_column() {
        let mut grid = run_grid();
        grid.get_mut(Position::new(3, 3)).unwrap().special = SpecialEffect::ColumnClear;
        let report = find_matches(&grid);
        let plan = ResolutionPlan::derive(&grid, &report.matched);

        // Four run cells plus seven other cells of column 3.
        assert_eq!(plan.removed.len(), 11);
        assert!((0..8).all(|r| plan.removed.contains(&Position::new(r, 3))));
    }

    #[test]
    fn test_area_bomb_clamped_at_edge() {
        assert_eq!(
            effect_area(SpecialEffect::AreaBomb, Position::new(0, 0), 8).len(),
            4
        );
        assert_eq!(
            effect_area(SpecialEffect::AreaBomb, Position::new(7, 3), 8).len(),
            6
        );
        assert_eq!(
            effect_area(SpecialEffect::AreaBomb, Position::new(4, 4), 8).len(),
            9
        );
        assert!(effect_area(SpecialEffect::Super, Position::new(4, 4), 8).is_empty());
    }

    #[test]
    fn test_expansion_shields_frozen_tiles_in_blast() {
        let mut grid = run_grid();
        grid.get_mut(Position::new(3, 6)).unwrap().special = SpecialEffect::AreaBomb;
        grid.get_mut(Position::new(2, 7)).unwrap().frozen_layers = 1;
        let report = find_matches(&grid);
        let plan = ResolutionPlan::derive(&grid, &report.matched);

        assert!(plan.shielded.contains(&Position::new(2, 7)));
        assert!(!plan.removed.contains(&Position::new(2, 7)));
        assert!(plan.removed.contains(&Position::new(4, 7)));
    }

    #[test]
    fn test_expansion_is_single_level() {
        let mut grid = run_grid();
        // Row clear in the run; a column clear elsewhere in that row only gets swept.
        grid.get_mut(Position::new(3, 3)).unwrap().special = SpecialEffect::RowClear;
        grid.get_mut(Position::new(3, 0)).unwrap().special = SpecialEffect::ColumnClear;
        let report = find_matches(&grid);
        let plan = ResolutionPlan::derive(&grid, &report.matched);

        assert_eq!(plan.triggered, BTreeSet::from([Position::new(3, 3)]));
        assert!(plan.removed.contains(&Position::new(3, 0)));
        assert!(!plan.removed.contains(&Position::new(0, 0)));
        assert_eq!(plan.removed.len(), 8);
    }

    #[test]
    fn test_shielded_special_does_not_fire() {
        let mut grid = run_grid();
        let tile = grid.get_mut(Position::new(3, 4)).unwrap();
        tile.special = SpecialEffect::RowClear;
        tile.frozen_layers = 1;
        let report = find_matches(&grid);
        let plan = ResolutionPlan::derive(&grid, &report.matched);

        assert!(plan.triggered.is_empty());
        assert_eq!(plan.removed.len(), 3);
    }
}
