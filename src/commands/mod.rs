//! Command implementations for the winsight CLI.

pub mod analyze;
pub mod common;
pub mod correlate;
pub mod fetch;

pub use analyze::handle_analyze;
pub use correlate::handle_correlate;
pub use fetch::handle_fetch;
