//! Tile creation.

use super::{Position, SpecialEffect, Tile, TileColor, TileId};
use rand::Rng;

/// Draw a color uniformly from the palette.
pub fn random_color<R: Rng>(rng: &mut R) -> TileColor {
    TileColor::ALL[rng.gen_range(0..TileColor::ALL.len())]
}

pub fn new_tile_id<R: Rng>(rng: &mut R) -> TileId {
    TileId::from_random_bytes(rng.gen())
}

/// A fresh tile with a random color and no modifiers.
pub fn random_tile<R: Rng>(position: Position, rng: &mut R) -> Tile {
    let id = new_tile_id(rng);
    Tile::new(id, random_color(rng), position)
}

/// A fresh tile with a forced color and special effect.
pub fn special_tile<R: Rng>(
    position: Position,
    color: TileColor,
    special: SpecialEffect,
    rng: &mut R,
) -> Tile {
    let mut tile = Tile::new(new_tile_id(rng), color, position);
    tile.special = special;
    tile
}
