//! Column-oriented analysis table with explicit schema metadata.
//!
//! Every column carries a [`ColumnRole`] assigned once at load time, so
//! downstream stages select columns by declared role instead of sniffing
//! value types at runtime. Text columns are encoded as categoricals (level
//! table + integer codes) before any numeric operation touches the table.

use crate::error::{Result, WinsightError};

/// Semantic role of a column, fixed when the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Join/bookkeeping key (season, week, game id, team). Never a predictor.
    Identifier,
    /// Encoded text column. Never a predictor.
    Categorical,
    /// Numeric statistic, candidate predictor.
    Numeric,
    /// The derived win/loss/tie indicators.
    Outcome,
}

/// Column storage. Missing values are explicit.
#[derive(Debug, Clone)]
pub enum ColumnData {
    Number(Vec<Option<f64>>),
    Category {
        levels: Vec<String>,
        codes: Vec<Option<u32>>,
    },
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Number(v) => v.len(),
            ColumnData::Category { codes, .. } => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            ColumnData::Number(v) => v[row].is_none(),
            ColumnData::Category { codes, .. } => codes[row].is_none(),
        }
    }

    /// Encode strings as a categorical, levels in first-occurrence order.
    pub fn from_strings(values: Vec<Option<String>>) -> Self {
        let mut levels: Vec<String> = Vec::new();
        let codes = values
            .into_iter()
            .map(|v| {
                v.map(|s| match levels.iter().position(|l| *l == s) {
                    Some(code) => code as u32,
                    None => {
                        levels.push(s);
                        (levels.len() - 1) as u32
                    }
                })
            })
            .collect();
        ColumnData::Category { levels, codes }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub role: ColumnRole,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, role: ColumnRole, values: Vec<Option<f64>>) -> Self {
        Column {
            name: name.into(),
            role,
            data: ColumnData::Number(values),
        }
    }

    pub fn category(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Column {
            name: name.into(),
            role: ColumnRole::Categorical,
            data: ColumnData::from_strings(values),
        }
    }

    /// Numeric view, `None` for categorical columns.
    pub fn as_number(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Number(v) => Some(v),
            ColumnData::Category { .. } => None,
        }
    }

    /// Decoded string at `row` for categorical columns.
    pub fn level_at(&self, row: usize) -> Option<&str> {
        match &self.data {
            ColumnData::Category { levels, codes } => {
                codes[row].map(|c| levels[c as usize].as_str())
            }
            ColumnData::Number(_) => None,
        }
    }

    /// Fraction of missing values, 0.0 for an empty column.
    pub fn na_fraction(&self) -> f64 {
        let n = self.data.len();
        if n == 0 {
            return 0.0;
        }
        let missing = (0..n).filter(|&i| self.data.is_missing(i)).count();
        missing as f64 / n as f64
    }

    /// Fraction of non-missing values equal to zero (numeric columns only).
    pub fn zero_fraction(&self) -> f64 {
        let Some(values) = self.as_number() else {
            return 0.0;
        };
        let present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
        if present.is_empty() {
            return 0.0;
        }
        let zeros = present.iter().filter(|v| **v == 0.0).count();
        zeros as f64 / present.len() as f64
    }

    /// True when every non-missing value is zero and at least one is present.
    pub fn is_all_zero(&self) -> bool {
        let Some(values) = self.as_number() else {
            return false;
        };
        let mut any = false;
        for v in values.iter().flatten() {
            if *v != 0.0 {
                return false;
            }
            any = true;
        }
        any
    }
}

/// An immutable table; every stage consumes one Frame and produces a new one.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    columns: Vec<Column>,
    nrows: usize,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Append a column; the first column fixes the row count.
    pub fn push(&mut self, column: Column) -> Result<()> {
        if self.columns.is_empty() {
            self.nrows = column.data.len();
        } else if column.data.len() != self.nrows {
            return Err(WinsightError::Config {
                message: format!(
                    "column '{}' has {} rows, table has {}",
                    column.name,
                    column.data.len(),
                    self.nrows
                ),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| WinsightError::MissingColumn {
            name: name.to_string(),
        })
    }

    /// Numeric values of a named column.
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        self.require(name)?
            .as_number()
            .ok_or_else(|| WinsightError::MissingColumn {
                name: format!("{name} (not numeric)"),
            })
    }

    /// Names of columns with the given role, in table order.
    pub fn names_with_role(&self, role: ColumnRole) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.role == role)
            .map(|c| c.name.clone())
            .collect()
    }

    /// New frame without the named columns.
    pub fn drop_columns(&self, names: &[String]) -> Frame {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .filter(|c| !names.contains(&c.name))
            .cloned()
            .collect();
        Frame {
            nrows: if columns.is_empty() { 0 } else { self.nrows },
            columns,
        }
    }

    /// New frame keeping only rows where `mask` is true.
    pub fn retain_rows(&self, mask: &[bool]) -> Frame {
        debug_assert_eq!(mask.len(), self.nrows);
        let kept = mask.iter().filter(|m| **m).count();
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let data = match &c.data {
                    ColumnData::Number(v) => ColumnData::Number(
                        v.iter()
                            .zip(mask)
                            .filter(|(_, m)| **m)
                            .map(|(v, _)| *v)
                            .collect(),
                    ),
                    ColumnData::Category { levels, codes } => ColumnData::Category {
                        levels: levels.clone(),
                        codes: codes
                            .iter()
                            .zip(mask)
                            .filter(|(_, m)| **m)
                            .map(|(c, _)| *c)
                            .collect(),
                    },
                };
                Column {
                    name: c.name.clone(),
                    role: c.role,
                    data,
                }
            })
            .collect();
        Frame {
            columns,
            nrows: kept,
        }
    }
}

#[cfg(test)]
mod tests;
