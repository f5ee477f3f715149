//! Grid model, tile factory and starting-grid generation.

pub mod factory;
pub mod init;
pub mod types;

pub use factory::{random_color, random_tile, special_tile};
pub use init::initialize_grid;
pub use types::*;
