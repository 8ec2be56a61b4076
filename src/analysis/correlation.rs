//! Pearson correlation analysis: pairwise matrix, outcome ranking, top-K
//! selection.

use rayon::prelude::*;

use crate::config::ExclusionList;
use crate::error::{Result, WinsightError};
use crate::table::{ColumnRole, Frame};

/// Pearson correlation over pairwise-complete observations.
///
/// `None` when fewer than two complete pairs exist or either side has zero
/// variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

/// Full pairwise correlation matrix over the named numeric columns.
///
/// Symmetric with a unit diagonal; undefined entries come out 0.0 (no
/// measurable linear signal). Pairs are computed in parallel — the only
/// parallel step in the pipeline, and a read-only one.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    /// Row-major, `names.len()` squared.
    pub values: Vec<Vec<f64>>,
}

pub fn correlation_matrix(frame: &Frame, names: &[String]) -> Result<CorrelationMatrix> {
    let columns: Vec<&[Option<f64>]> = names
        .iter()
        .map(|n| frame.numeric(n))
        .collect::<Result<_>>()?;
    let k = names.len();

    let pairs: Vec<(usize, usize)> = (0..k)
        .flat_map(|i| (i + 1..k).map(move |j| (i, j)))
        .collect();
    let computed: Vec<((usize, usize), f64)> = pairs
        .par_iter()
        .map(|&(i, j)| ((i, j), pearson(columns[i], columns[j]).unwrap_or(0.0)))
        .collect();

    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        values[i][i] = 1.0;
    }
    for ((i, j), r) in computed {
        values[i][j] = r;
        values[j][i] = r;
    }
    Ok(CorrelationMatrix {
        names: names.to_vec(),
        values,
    })
}

/// Predictors ordered by descending absolute correlation with the outcome.
#[derive(Debug, Clone, Default)]
pub struct CorrelationRanking {
    /// (predictor, signed r), strongest first. Excluded names never appear.
    pub entries: Vec<(String, f64)>,
}

impl CorrelationRanking {
    /// The top-K explanatory set; fewer than `k` when the ranking is short.
    pub fn top_k(&self, k: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(k)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Correlate every numeric column with the outcome, then filter the
/// exclusion list and rank by |r| descending.
///
/// The sort is stable, so equal magnitudes keep their table order.
pub fn rank_against_outcome(
    frame: &Frame,
    outcome_col: &str,
    exclusions: &ExclusionList,
) -> Result<CorrelationRanking> {
    let outcome = frame.numeric(outcome_col)?;

    let mut entries: Vec<(String, f64)> = Vec::new();
    for name in frame.names_with_role(ColumnRole::Numeric) {
        let Some(r) = pearson(frame.numeric(&name)?, outcome) else {
            continue;
        };
        entries.push((name, r));
    }
    entries.retain(|(name, _)| name != outcome_col && !exclusions.contains(name));
    entries.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if entries.is_empty() {
        return Err(WinsightError::EmptyTable {
            stage: "correlation ranking".to_string(),
        });
    }
    Ok(CorrelationRanking { entries })
}
