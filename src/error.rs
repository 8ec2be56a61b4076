//! Error types for the winsight CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WinsightError>;

#[derive(Error, Debug)]
pub enum WinsightError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse number: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Remote source returned no rows for season {season}")]
    NoData { season: u16 },

    #[error("Unknown league: {name} (expected nfl or nba)")]
    UnknownLeague { name: String },

    #[error("Column not found: {name}")]
    MissingColumn { name: String },

    #[error("Table is empty after {stage}")]
    EmptyTable { stage: String },

    #[error("Model fit failed: {message}")]
    ModelFit { message: String },

    #[error("Chart rendering failed: {message}")]
    Render { message: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

#[cfg(test)]
mod tests;
