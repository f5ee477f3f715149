//! Column collapse and refill.

use crate::board::{random_tile, Grid, Position};
use rand::Rng;

/// Drop every tile as far down its column as it goes, preserving order.
///
/// Returns the number of vacated cells at the top of each column.
pub fn collapse(grid: &mut Grid) -> Vec<usize> {
    let size = grid.size();
    (0..size)
        .map(|col| {
            let mut write = size;
            for row in (0..size).rev() {
                if let Some(tile) = grid.take(Position::new(row, col)) {
                    write -= 1;
                    grid.place(Position::new(write, col), tile);
                }
            }
            write
        })
        .collect()
}

/// Fill the vacated top cells of each column with fresh tiles, top to bottom.
pub fn refill<R: Rng>(grid: &mut Grid, vacated: &[usize], rng: &mut R) {
    for (col, &count) in vacated.iter().enumerate() {
        for row in 0..count {
            let pos = Position::new(row, col);
            grid.place(pos, random_tile(pos, rng));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_collapse_preserves_order() {
        let mut grid = Grid::from_pattern(&["B..", "P.T", ".KA"]).unwrap();
        let top_id = grid.get(Position::new(0, 0)).unwrap().id;

        let vacated = collapse(&mut grid);

        assert_eq!(vacated, vec![1, 2, 1]);
        assert_eq!(grid.to_string(), "...\nB.T\nPKA\n");
        assert_eq!(grid.find_tile(top_id), Some(Position::new(1, 0)));
        assert!(grid.positions_consistent());
    }

    #[test]
    fn test_collapse_full_grid_is_noop() {
        let mut grid = Grid::from_pattern(&["BPT", "KAB", "TTB"]).unwrap();
        let before = grid.clone();
        assert_eq!(collapse(&mut grid), vec![0, 0, 0]);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_refill_fills_exactly_the_gap() {
        let mut grid = Grid::from_pattern(&["B..", "P.T", ".KA"]).unwrap();
        let vacated = collapse(&mut grid);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        refill(&mut grid, &vacated, &mut rng);

        assert!(grid.is_full());
        assert!(grid.positions_consistent());
        // Surviving tiles keep their slots.
        assert_eq!(grid.to_string().lines().nth(2), Some("PKA"));
    }
}
