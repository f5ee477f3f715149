//! Match detection.

pub mod detector;

pub use detector::{find_matches, special_for_run, Axis, MatchReport, Run, SpawnRequest};
