//! Reporting: console summaries and chart files.

pub mod console;
pub mod plots;
pub mod results;

pub use plots::{cluster_order, render_correlation_bars, render_heatmap};
pub use results::write_test_results;
