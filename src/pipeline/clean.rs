//! Deterministic table cleaning.
//!
//! Five ordered pruning rules; the order is part of the contract because the
//! removal counts in the report depend on it:
//!
//! 1. drop rows with a missing outcome;
//! 2. drop columns more than half missing;
//! 3. drop numeric columns whose non-missing values are all zero;
//! 4. warn about numeric columns that are >95% zeros (kept);
//! 5. drop rows with any remaining missing value.

use crate::error::{Result, WinsightError};
use crate::table::{ColumnRole, Frame};

pub const NA_THRESHOLD: f64 = 0.5;
pub const ZERO_WARN_THRESHOLD: f64 = 0.95;

/// What each cleaning step removed, for the console report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    pub initial_rows: usize,
    pub initial_cols: usize,
    pub rows_missing_outcome: usize,
    pub high_na_columns: Vec<String>,
    pub all_zero_columns: Vec<String>,
    /// Kept, but flagged for the operator.
    pub mostly_zero_columns: Vec<String>,
    pub rows_with_missing_values: usize,
    pub final_rows: usize,
    pub final_cols: usize,
}

/// Run the cleaning sequence against the joined table.
///
/// On success the returned frame has no column more than half missing, no
/// all-zero numeric column, and no row with a missing value.
pub fn clean(frame: &Frame, outcome_col: &str) -> Result<(Frame, CleanReport)> {
    let mut report = CleanReport {
        initial_rows: frame.nrows(),
        initial_cols: frame.ncols(),
        ..CleanReport::default()
    };

    // 1. rows with a missing outcome
    let outcome = frame.numeric(outcome_col)?;
    let mask: Vec<bool> = outcome.iter().map(|v| v.is_some()).collect();
    report.rows_missing_outcome = mask.iter().filter(|m| !**m).count();
    let mut table = frame.retain_rows(&mask);

    if table.nrows() == 0 {
        return Err(WinsightError::EmptyTable {
            stage: "outcome filtering".to_string(),
        });
    }

    // 2. columns more than half missing
    report.high_na_columns = table
        .columns()
        .iter()
        .filter(|c| c.na_fraction() > NA_THRESHOLD)
        .map(|c| c.name.clone())
        .collect();
    table = table.drop_columns(&report.high_na_columns);

    // 3. all-zero numeric columns carry no signal
    report.all_zero_columns = table
        .columns()
        .iter()
        .filter(|c| c.role == ColumnRole::Numeric && c.is_all_zero())
        .map(|c| c.name.clone())
        .collect();
    table = table.drop_columns(&report.all_zero_columns);

    // 4. mostly-zero numeric columns: warn only
    report.mostly_zero_columns = table
        .columns()
        .iter()
        .filter(|c| c.role == ColumnRole::Numeric && c.zero_fraction() > ZERO_WARN_THRESHOLD)
        .map(|c| c.name.clone())
        .collect();

    // 5. rows with any remaining missing value
    let complete: Vec<bool> = (0..table.nrows())
        .map(|row| table.columns().iter().all(|c| !c.data.is_missing(row)))
        .collect();
    report.rows_with_missing_values = complete.iter().filter(|m| !**m).count();
    table = table.retain_rows(&complete);

    if table.nrows() == 0 {
        return Err(WinsightError::EmptyTable {
            stage: "row completion filtering".to_string(),
        });
    }

    report.final_rows = table.nrows();
    report.final_cols = table.ncols();
    Ok((table, report))
}
