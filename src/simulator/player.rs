//! Greedy auto-player.

use crate::board::{Grid, Position};
use crate::matching::find_matches;

/// The legal swap with the largest immediate match set.
///
/// Candidates are each cell paired with its right and lower neighbor, in row-major
/// order; the first of equally good swaps wins. `None` means no swap matches.
pub fn best_swap(grid: &Grid) -> Option<(Position, Position)> {
    let size = grid.size();
    let mut best: Option<((Position, Position), usize)> = None;

    for a in grid.positions() {
        let candidates = [
            Position::new(a.row, a.col + 1),
            Position::new(a.row + 1, a.col),
        ];
        for b in candidates {
            if b.row >= size || b.col >= size {
                continue;
            }
            let mut trial = grid.clone();
            trial.swap(a, b);
            let matched = find_matches(&trial).len();
            if matched > 0 && best.map_or(true, |(_, score)| matched > score) {
                best = Some(((a, b), matched));
            }
        }
    }

    best.map(|(swap, _)| swap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_swap_forms_a_run() {
        let grid = Grid::from_pattern(&[
            "BPTKABPT", "TKABPTKA", "ABPTKABP", "PTAAKATK", "KABPTKAB", "BPTKABPT", "TKABPTKA",
            "ABPTKABP",
        ])
        .unwrap();
        let (a, b) = best_swap(&grid).unwrap();
        assert!(a.is_adjacent(&b));
        let mut trial = grid.clone();
        trial.swap(a, b);
        assert!(!find_matches(&trial).is_empty());
    }

    #[test]
    fn test_prefers_larger_match() {
        // (2,1)/(2,2) makes a 3-run in column 1; (2,2)/(3,2) makes a 5-run in row 3.
        let grid = Grid::from_pattern(&[
            "BPTKABPT", "TKABPTKA", "ABKTKABP", "KKAKKPTK", "KABPTKAB", "BPTKABPT", "TKABPTKA",
            "ABPTKABP",
        ])
        .unwrap();
        assert!(find_matches(&grid).is_empty());
        assert_eq!(
            best_swap(&grid),
            Some((Position::new(2, 2), Position::new(3, 2)))
        );
    }

    #[test]
    fn test_stable_stuck_grid_has_no_swap() {
        let grid = Grid::from_pattern(&["BPT", "KAB", "PTK"]).unwrap();
        assert_eq!(best_swap(&grid), None);
    }
}
