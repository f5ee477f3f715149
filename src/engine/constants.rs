// Board
pub const GRID_SIZE: usize = 8;
pub const MIN_GRID_SIZE: usize = 3;
pub const MIN_RUN_LENGTH: usize = 3;
pub const LINE_CLEAR_RUN_LENGTH: usize = 4;
pub const SUPER_RUN_LENGTH: usize = 5;

// Scoring
pub const BASE_TILE_POINTS: u32 = 10;
pub const INITIAL_COMBO_MULTIPLIER: u32 = 1;

// Obstacles
pub const FROZEN_LAYERS: u8 = 2;
pub const INFECTION_SPREAD_CHANCE: f64 = 0.2;

// Presentation pacing (hints only, never affects the resolved state)
pub const SWAP_DELAY_MS: u64 = 150;
pub const CASCADE_STEP_DELAY_MS: u64 = 200;
