//! Winsight: which team statistics correlate with winning?
//!
//! A batch analysis pipeline over public NFL and NBA data. One run loads
//! per-game team statistics and schedules for a set of seasons, derives
//! win/loss/tie outcomes from each game's signed result, joins and cleans
//! the table, ranks statistics by correlation with winning, fits a
//! descriptive linear model and a held-out logistic model, and renders a
//! clustered correlation heatmap plus a signed correlation bar chart.
//!
//! Data flows strictly forward through the stages; every stage returns a
//! fresh table and a report record, so intermediate states are testable.
//!
//! ## Quick start
//!
//! ```bash
//! winsight analyze --league nfl -s 2022 -s 2023
//! winsight fetch --league nba -s 2023 --refresh
//! winsight correlate --league nba -s 2023 --top-k 20
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod table;

// Re-export commonly used types
pub use cli::types::{League, Season, Week};
pub use config::ExclusionList;
pub use error::{Result, WinsightError};
pub use table::{Column, ColumnData, ColumnRole, Frame};
