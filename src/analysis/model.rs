//! Regression models: descriptive OLS and held-out logistic regression.
//!
//! The linear fit solves through an SVD pseudo-inverse, so a rank-deficient
//! design matrix (perfectly collinear predictors) still produces the
//! minimum-norm solution and reports the deficiency instead of aborting.
//! The logistic fit is IRLS (Newton-Raphson) with a small L2 ridge on the
//! Hessian for numerical stability.

use nalgebra::{DMatrix, DVector};

use super::split::{train_test_split, Split};
use crate::error::{Result, WinsightError};
use crate::table::Frame;

const IRLS_MAX_ITERATIONS: usize = 100;
const IRLS_TOLERANCE: f64 = 1e-8;
const IRLS_RIDGE: f64 = 1e-6;

/// Rows where the outcome and every named predictor are present.
///
/// The cleaner guarantees completeness for raw statistics, but pre-game
/// feature columns are missing for each team's first games.
pub fn complete_rows(frame: &Frame, columns: &[String]) -> Result<Vec<usize>> {
    let views: Vec<&[Option<f64>]> = columns
        .iter()
        .map(|c| frame.numeric(c))
        .collect::<Result<_>>()?;
    Ok((0..frame.nrows())
        .filter(|&row| views.iter().all(|v| v[row].is_some()))
        .collect())
}

/// Design matrix with a leading intercept column, over the given rows.
fn design_matrix(frame: &Frame, predictors: &[String], rows: &[usize]) -> Result<DMatrix<f64>> {
    let views: Vec<&[Option<f64>]> = predictors
        .iter()
        .map(|p| frame.numeric(p))
        .collect::<Result<_>>()?;
    let mut x = DMatrix::zeros(rows.len(), predictors.len() + 1);
    for (i, &row) in rows.iter().enumerate() {
        x[(i, 0)] = 1.0;
        for (j, view) in views.iter().enumerate() {
            x[(i, j + 1)] = view[row].unwrap_or(f64::NAN);
        }
    }
    Ok(x)
}

fn outcome_vector(frame: &Frame, outcome: &str, rows: &[usize]) -> Result<DVector<f64>> {
    let view = frame.numeric(outcome)?;
    Ok(DVector::from_iterator(
        rows.len(),
        rows.iter().map(|&r| view[r].unwrap_or(f64::NAN)),
    ))
}

/// Ordinary least squares of the outcome on all given predictors.
#[derive(Debug, Clone)]
pub struct LinearFit {
    /// "(intercept)" followed by the predictor names.
    pub terms: Vec<String>,
    pub coefficients: Vec<f64>,
    pub r_squared: f64,
    /// Numerical rank of the design matrix; `rank < n_params` means
    /// collinear terms were suppressed by the minimum-norm solve.
    pub rank: usize,
    pub n_params: usize,
    pub n_obs: usize,
}

impl LinearFit {
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.n_params
    }
}

/// Fit the descriptive full-population linear model.
pub fn fit_linear(frame: &Frame, outcome: &str, predictors: &[String]) -> Result<LinearFit> {
    let mut columns = vec![outcome.to_string()];
    columns.extend_from_slice(predictors);
    let rows = complete_rows(frame, &columns)?;
    if rows.len() <= predictors.len() {
        return Err(WinsightError::ModelFit {
            message: format!(
                "{} complete rows cannot support {} predictors",
                rows.len(),
                predictors.len()
            ),
        });
    }

    let x = design_matrix(frame, predictors, &rows)?;
    let y = outcome_vector(frame, outcome, &rows)?;
    let n_obs = rows.len();
    let n_params = predictors.len() + 1;

    let svd = x.svd(true, true);
    let max_sv = svd.singular_values.max();
    let eps = max_sv * f64::EPSILON * n_obs.max(n_params) as f64;
    let rank = svd.rank(eps);
    let beta = svd
        .solve(&y, eps)
        .map_err(|e| WinsightError::ModelFit {
            message: e.to_string(),
        })?;

    let x = design_matrix(frame, predictors, &rows)?;
    let fitted = &x * &beta;
    let residual: f64 = (&y - &fitted).norm_squared();
    let mean_y = y.mean();
    let total: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let r_squared = if total == 0.0 {
        0.0
    } else {
        1.0 - residual / total
    };

    let mut terms = vec!["(intercept)".to_string()];
    terms.extend_from_slice(predictors);
    Ok(LinearFit {
        terms,
        coefficients: beta.iter().copied().collect(),
        r_squared,
        rank,
        n_params,
        n_obs,
    })
}

fn sigmoid(eta: f64) -> f64 {
    1.0 / (1.0 + (-eta).exp())
}

/// Binomial (logistic) regression fit.
#[derive(Debug, Clone)]
pub struct LogisticFit {
    /// "(intercept)" followed by the predictor names.
    pub terms: Vec<String>,
    pub coefficients: Vec<f64>,
    pub converged: bool,
    pub iterations: usize,
    /// McFadden pseudo-R² on the training data.
    pub pseudo_r_squared: f64,
    /// (predictor, |coefficient| × predictor std dev), strongest first.
    pub importance: Vec<(String, f64)>,
}

impl LogisticFit {
    /// Predicted win probability for one feature vector (without intercept).
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        let mut eta = self.coefficients[0];
        for (b, v) in self.coefficients[1..].iter().zip(features) {
            eta += b * v;
        }
        sigmoid(eta)
    }
}

fn log_likelihood(y: &DVector<f64>, mu: &DVector<f64>) -> f64 {
    y.iter()
        .zip(mu.iter())
        .map(|(yi, mi)| {
            let m = mi.clamp(1e-12, 1.0 - 1e-12);
            yi * m.ln() + (1.0 - yi) * (1.0 - m).ln()
        })
        .sum()
}

/// IRLS fit of `y ~ x` (x already carries the intercept column).
fn irls(x: &DMatrix<f64>, y: &DVector<f64>, terms: Vec<String>) -> Result<LogisticFit> {
    let (n, p) = x.shape();
    let mut beta = DVector::zeros(p);
    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..IRLS_MAX_ITERATIONS {
        iterations = iter + 1;
        let eta = x * &beta;
        let mu = eta.map(sigmoid);
        let gradient = x.transpose() * (y - &mu) - IRLS_RIDGE * &beta;

        if gradient.norm() < IRLS_TOLERANCE {
            converged = true;
            break;
        }

        // X' W X with W = diag(mu (1 - mu)), ridge keeps it invertible
        let weights = mu.map(|m| (m * (1.0 - m)).max(1e-10));
        let mut xtwx = DMatrix::zeros(p, p);
        for i in 0..n {
            let row = x.row(i);
            let w = weights[i];
            for a in 0..p {
                for b in a..p {
                    let v = w * row[a] * row[b];
                    xtwx[(a, b)] += v;
                    if a != b {
                        xtwx[(b, a)] += v;
                    }
                }
            }
        }
        for d in 0..p {
            xtwx[(d, d)] += IRLS_RIDGE;
        }

        let step = match xtwx.clone().cholesky() {
            Some(ch) => Some(ch.solve(&gradient)),
            None => xtwx.lu().solve(&gradient),
        }
        .ok_or_else(|| WinsightError::ModelFit {
            message: "singular IRLS system".to_string(),
        })?;
        beta += step;
    }

    let mu = (x * &beta).map(sigmoid);
    let ll = log_likelihood(y, &mu);
    let p_bar = y.mean().clamp(1e-12, 1.0 - 1e-12);
    let ll_null = (n as f64) * (p_bar * p_bar.ln() + (1.0 - p_bar) * (1.0 - p_bar).ln());
    let pseudo_r_squared = if ll_null == 0.0 { 0.0 } else { 1.0 - ll / ll_null };

    // importance: coefficient magnitude scaled by the predictor's spread
    let mut importance: Vec<(String, f64)> = terms
        .iter()
        .enumerate()
        .skip(1)
        .map(|(j, term)| {
            let col = x.column(j);
            let mean = col.mean();
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
            (term.clone(), beta[j].abs() * var.sqrt())
        })
        .collect();
    importance.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(LogisticFit {
        terms,
        coefficients: beta.iter().copied().collect(),
        converged,
        iterations,
        pseudo_r_squared,
        importance,
    })
}

/// Actual × predicted counts on the held-out split, both binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }

    pub fn correct(&self) -> usize {
        self.true_positive + self.true_negative
    }

    /// Correct predictions over total, clipped to [0, 1]; 0 for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        (self.correct() as f64 / self.total() as f64).clamp(0.0, 1.0)
    }
}

/// One held-out game's prediction, keyed by its row in the analysis table
/// so reporting can recover team, date, and game id.
#[derive(Debug, Clone, PartialEq)]
pub struct TestPrediction {
    pub row: usize,
    pub actual_win: bool,
    pub predicted_win: bool,
    pub win_probability: f64,
}

impl TestPrediction {
    pub fn is_correct(&self) -> bool {
        self.actual_win == self.predicted_win
    }
}

/// Held-out logistic model with its test-set evaluation.
#[derive(Debug, Clone)]
pub struct HeldOutModel {
    pub fit: LogisticFit,
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    /// One entry per test row, in test-set order.
    pub predictions: Vec<TestPrediction>,
}

/// Classification threshold on the predicted probability.
pub const CLASS_THRESHOLD: f64 = 0.5;

/// Fit a logistic model on a seeded ≈`train_fraction` split of the complete
/// rows and evaluate it on the remainder.
pub fn fit_held_out_logistic(
    frame: &Frame,
    outcome: &str,
    predictors: &[String],
    train_fraction: f64,
    seed: u64,
) -> Result<HeldOutModel> {
    let mut columns = vec![outcome.to_string()];
    columns.extend_from_slice(predictors);
    let rows = complete_rows(frame, &columns)?;

    let Split { train, test } = train_test_split(rows.len(), train_fraction, seed);
    let train_rows: Vec<usize> = train.iter().map(|&i| rows[i]).collect();
    let test_rows: Vec<usize> = test.iter().map(|&i| rows[i]).collect();
    if train_rows.len() <= predictors.len() {
        return Err(WinsightError::ModelFit {
            message: format!(
                "training split of {} rows cannot support {} predictors",
                train_rows.len(),
                predictors.len()
            ),
        });
    }

    let x_train = design_matrix(frame, predictors, &train_rows)?;
    let y_train = outcome_vector(frame, outcome, &train_rows)?;
    let mut terms = vec!["(intercept)".to_string()];
    terms.extend_from_slice(predictors);
    let fit = irls(&x_train, &y_train, terms)?;

    let x_test = design_matrix(frame, predictors, &test_rows)?;
    let y_test = outcome_vector(frame, outcome, &test_rows)?;
    let mut confusion = ConfusionMatrix::default();
    let mut predictions = Vec::with_capacity(test_rows.len());
    for i in 0..test_rows.len() {
        let features: Vec<f64> = (1..=predictors.len()).map(|j| x_test[(i, j)]).collect();
        let win_probability = fit.predict_proba(&features);
        let predicted = win_probability >= CLASS_THRESHOLD;
        let actual = y_test[i] >= 0.5;
        match (actual, predicted) {
            (true, true) => confusion.true_positive += 1,
            (false, false) => confusion.true_negative += 1,
            (false, true) => confusion.false_positive += 1,
            (true, false) => confusion.false_negative += 1,
        }
        predictions.push(TestPrediction {
            row: test_rows[i],
            actual_win: actual,
            predicted_win: predicted,
            win_probability,
        });
    }

    Ok(HeldOutModel {
        accuracy: confusion.accuracy(),
        confusion,
        fit,
        train_rows: train_rows.len(),
        test_rows: test_rows.len(),
        predictions,
    })
}

#[cfg(test)]
mod tests;
