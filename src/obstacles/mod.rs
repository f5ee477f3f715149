//! Obstacle modifiers: frozen shields and infection.
//!
//! The shield rule itself lives on [`crate::board::Tile::absorb_hit`] and is applied by
//! the cascade resolver; this module owns placement and spread.

pub mod infection;
pub mod placement;

pub use infection::spread_infection;
pub use placement::place_obstacles;
