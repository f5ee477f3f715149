//! Post-cascade infection spread.

use crate::board::{Grid, Position};
use rand::Rng;
use tracing::{debug, instrument};

/// Spread infection one generation outward.
///
/// Sources are collected before anything spreads, so a tile infected by this call
/// never infects its own neighbors until the next call. Each clean neighbor of each
/// source is rolled independently with probability `chance`.
#[instrument(skip(grid, rng), fields(size = grid.size()))]
pub fn spread_infection<R: Rng>(grid: &Grid, chance: f64, rng: &mut R) -> Grid {
    let mut next = grid.clone();
    let sources: Vec<Position> = grid
        .tiles()
        .filter(|tile| tile.infected)
        .map(|tile| tile.position)
        .collect();

    let mut newly_infected = 0usize;
    for source in &sources {
        for neighbor in source.orthogonal_neighbors(grid.size()) {
            if let Some(tile) = next.get_mut(neighbor) {
                if !tile.infected && rng.gen_bool(chance) {
                    tile.infected = true;
                    newly_infected += 1;
                }
            }
        }
    }

    debug!(sources = sources.len(), newly_infected, "infection spread");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid_with_infected(cells: &[Position]) -> Grid {
        let mut grid =
            Grid::from_pattern(&["BPTKA", "TKABP", "ABPTK", "PTKAB", "KABPT"]).unwrap();
        for &pos in cells {
            grid.get_mut(pos).unwrap().infected = true;
        }
        grid
    }

    #[test]
    fn test_certain_spread_reaches_only_direct_neighbors() {
        let grid = grid_with_infected(&[Position::new(2, 2)]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let next = spread_infection(&grid, 1.0, &mut rng);

        assert_eq!(next.infected_count(), 5);
        for pos in [
            Position::new(2, 3),
            Position::new(2, 1),
            Position::new(3, 2),
            Position::new(1, 2),
        ] {
            assert!(next.get(pos).unwrap().infected);
        }
        // Two steps away stays clean even with chance 1.0.
        assert!(!next.get(Position::new(2, 4)).unwrap().infected);
        assert!(!next.get(Position::new(3, 3)).unwrap().infected);
    }

    #[test]
    fn test_corner_source() {
        let grid = grid_with_infected(&[Position::new(0, 0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let next = spread_infection(&grid, 1.0, &mut rng);
        assert_eq!(next.infected_count(), 3);
    }

    #[test]
    fn test_zero_chance_changes_nothing() {
        let grid = grid_with_infected(&[Position::new(1, 1), Position::new(3, 3)]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let next = spread_infection(&grid, 0.0, &mut rng);
        assert_eq!(next, grid);
    }

    #[test]
    fn test_input_grid_untouched() {
        let grid = grid_with_infected(&[Position::new(2, 2)]);
        let before = grid.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let _ = spread_infection(&grid, 1.0, &mut rng);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_skips_empty_cells() {
        let mut grid = grid_with_infected(&[Position::new(2, 2)]);
        grid.take(Position::new(2, 3));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let next = spread_infection(&grid, 1.0, &mut rng);
        assert!(next.is_empty_at(Position::new(2, 3)));
        assert_eq!(next.infected_count(), 4);
    }

    #[test]
    fn test_partial_chance_stays_within_neighbors() {
        let grid = grid_with_infected(&[Position::new(2, 2)]);
        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let next = spread_infection(&grid, 0.2, &mut rng);
            assert!(next.infected_count() <= 5);
            assert!(next.get(Position::new(2, 2)).unwrap().infected);
        }
    }
}
