//! Player swap requests.

pub mod validator;

pub use validator::{validate_and_apply_swap, SwapOutcome, SwapRejection};
