//! Cascade resolution: scan, resolve, collapse, refill until stable.

pub mod gravity;
pub mod observer;
pub mod plan;
pub mod resolver;

pub use gravity::{collapse, refill};
pub use observer::{CascadeObserver, ScoreTicker};
pub use plan::{effect_area, ResolutionPlan};
pub use resolver::{resolve_cascade, CascadeOutcome, CascadePhase, CascadeResolver, CascadeStep};
