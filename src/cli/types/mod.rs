//! Type-safe wrappers and enums shared across the pipeline.

pub mod league;
pub mod time;

pub use league::League;
pub use time::{Season, Week};
