//! Grid and tile data structures.
//!
//! The grid is a square matrix of optional tiles addressed as `cells[row][col]`,
//! with row 0 at the top. Empty cells only exist while a cascade is collapsing.

use crate::engine::MIN_GRID_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::{Builder, Uuid};

/// The fixed tile palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Blue,
    Purple,
    Teal,
    Pink,
    Amber,
}

impl TileColor {
    pub const ALL: [TileColor; 5] = [
        TileColor::Blue,
        TileColor::Purple,
        TileColor::Teal,
        TileColor::Pink,
        TileColor::Amber,
    ];

    /// Single-letter code used by grid patterns and `Display`.
    pub fn letter(&self) -> char {
        match self {
            Self::Blue => 'B',
            Self::Purple => 'P',
            Self::Teal => 'T',
            Self::Pink => 'K',
            Self::Amber => 'A',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.letter() == letter)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Teal => "Teal",
            Self::Pink => "Pink",
            Self::Amber => "Amber",
        }
    }
}

/// Bonus clear effect carried by a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum SpecialEffect {
    #[default]
    None,
    /// Clears the whole row when removed.
    RowClear,
    /// Clears the whole column when removed.
    ColumnClear,
    /// Clears the 3x3 neighborhood when removed.
    AreaBomb,
    /// Spawned from runs of five or more; scores like a plain tile.
    Super,
}

impl SpecialEffect {
    pub fn is_special(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A grid coordinate. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two positions share an edge.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Edge neighbors inside a `size` x `size` grid, ordered right, left, down, up.
    pub fn orthogonal_neighbors(&self, size: usize) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        if self.col + 1 < size {
            neighbors.push(Position::new(self.row, self.col + 1));
        }
        if self.col > 0 {
            neighbors.push(Position::new(self.row, self.col - 1));
        }
        if self.row + 1 < size {
            neighbors.push(Position::new(self.row + 1, self.col));
        }
        if self.row > 0 {
            neighbors.push(Position::new(self.row - 1, self.col));
        }
        neighbors
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Opaque tile identity, stable until the tile is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(Uuid);

impl TileId {
    /// Build an id from caller-supplied randomness so seeded games stay reproducible.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Deterministic id for hand-built grids.
    pub fn from_index(index: u128) -> Self {
        Self(Uuid::from_u128(index))
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single tile on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub color: TileColor,
    pub special: SpecialEffect,
    /// Remaining ice layers; a positive value shields the tile from removal.
    pub frozen_layers: u8,
    pub infected: bool,
    /// Always equal to the slot the tile occupies.
    pub position: Position,
}

impl Tile {
    pub fn new(id: TileId, color: TileColor, position: Position) -> Self {
        Self {
            id,
            color,
            special: SpecialEffect::None,
            frozen_layers: 0,
            infected: false,
            position,
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.frozen_layers > 0
    }

    /// Consume one ice layer. Returns true if the hit was absorbed.
    pub fn absorb_hit(&mut self) -> bool {
        if self.frozen_layers == 0 {
            return false;
        }
        self.frozen_layers -= 1;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid size {0} is too small, need at least 3")]
    InvalidSize(usize),

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("unknown tile letter '{letter}' at ({row}, {col})")]
    UnknownLetter { letter: char, row: usize, col: usize },
}

/// Square matrix of optional tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Option<Tile>>>,
}

impl Grid {
    /// An all-empty grid of the given side length.
    pub fn empty(size: usize) -> Result<Self, GridError> {
        if size < MIN_GRID_SIZE {
            return Err(GridError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![vec![None; size]; size],
        })
    }

    /// Build a grid from rows of color letters (`B P T K A`, `.` for empty).
    ///
    /// Tiles get sequential ids in row-major order and carry no modifiers.
    pub fn from_pattern(rows: &[&str]) -> Result<Self, GridError> {
        let mut grid = Self::empty(rows.len())?;
        for (row, line) in rows.iter().enumerate() {
            let letters: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if letters.len() != grid.size {
                return Err(GridError::RaggedRow {
                    row,
                    len: letters.len(),
                    expected: grid.size,
                });
            }
            for (col, letter) in letters.into_iter().enumerate() {
                if letter == '.' {
                    continue;
                }
                let color = TileColor::from_letter(letter)
                    .ok_or(GridError::UnknownLetter { letter, row, col })?;
                let position = Position::new(row, col);
                let id = TileId::from_index((row * grid.size + col + 1) as u128);
                grid.place(position, Tile::new(id, color, position));
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.cells.get(pos.row)?.get(pos.col)?.as_ref()
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.cells.get_mut(pos.row)?.get_mut(pos.col)?.as_mut()
    }

    pub fn color_at(&self, pos: Position) -> Option<TileColor> {
        self.get(pos).map(|tile| tile.color)
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Put a tile into a slot, rewriting its position. Panics outside the grid.
    pub fn place(&mut self, pos: Position, mut tile: Tile) {
        tile.position = pos;
        self.cells[pos.row][pos.col] = Some(tile);
    }

    /// Remove and return the tile in a slot, leaving it empty.
    pub fn take(&mut self, pos: Position) -> Option<Tile> {
        self.cells.get_mut(pos.row)?.get_mut(pos.col)?.take()
    }

    /// Exchange the contents of two slots, keeping positions in sync.
    pub fn swap(&mut self, a: Position, b: Position) {
        let first = self.take(a);
        let second = self.take(b);
        if let Some(tile) = second {
            self.place(a, tile);
        }
        if let Some(tile) = first {
            self.place(b, tile);
        }
    }

    /// All coordinates in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn is_full(&self) -> bool {
        self.tile_count() == self.size * self.size
    }

    pub fn infected_count(&self) -> usize {
        self.tiles().filter(|t| t.infected).count()
    }

    pub fn frozen_count(&self) -> usize {
        self.tiles().filter(|t| t.is_shielded()).count()
    }

    pub fn find_tile(&self, id: TileId) -> Option<Position> {
        self.tiles().find(|t| t.id == id).map(|t| t.position)
    }

    /// True when every tile's `position` matches its slot.
    pub fn positions_consistent(&self) -> bool {
        self.positions()
            .all(|pos| self.get(pos).map_or(true, |tile| tile.position == pos))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.as_ref().map_or('.', |tile| tile.color.letter()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
