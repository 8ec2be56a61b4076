//! Operator-facing text report for each pipeline stage.

use crate::analysis::correlation::CorrelationRanking;
use crate::analysis::model::{HeldOutModel, LinearFit};
use crate::cli::types::Season;
use crate::pipeline::clean::CleanReport;
use crate::provider::CacheStatus;

fn preview(names: &[String], limit: usize) -> String {
    let shown: Vec<&str> = names.iter().take(limit).map(String::as_str).collect();
    let mut line = shown.join(", ");
    if names.len() > limit {
        line.push_str(&format!(" ... and {} more", names.len() - limit));
    }
    line
}

pub fn print_cache_status(statuses: &[(Season, CacheStatus)]) {
    for (season, status) in statuses {
        if !status.fetched {
            println!("Season {season}: {} games from cache", status.cached_games);
        } else if status.appended_games > 0 {
            println!(
                "Season {season}: {} games cached, appended {} new",
                status.cached_games, status.appended_games
            );
        } else {
            println!("Season {season}: fetched {} games", status.cached_games);
        }
    }
}

pub fn print_injury_status(statuses: &[(Season, CacheStatus)]) {
    for (season, status) in statuses {
        if status.appended_games > 0 {
            println!(
                "Season {season} injuries: {} games cached, fetched {} new",
                status.cached_games, status.appended_games
            );
        } else {
            println!(
                "Season {season} injuries: all {} games from cache",
                status.cached_games
            );
        }
    }
}

pub fn print_clean_report(report: &CleanReport) {
    println!("\n---------- Data Cleaning Report ----------");
    println!(
        "Initial dimensions: {} rows, {} columns",
        report.initial_rows, report.initial_cols
    );
    if report.rows_missing_outcome > 0 {
        println!(
            "Removed {} rows with missing outcome",
            report.rows_missing_outcome
        );
    }
    if !report.high_na_columns.is_empty() {
        println!(
            "Removed {} high-NA columns (>50% missing): {}",
            report.high_na_columns.len(),
            preview(&report.high_na_columns, 10)
        );
    }
    if !report.all_zero_columns.is_empty() {
        println!(
            "Removed {} all-zero columns: {}",
            report.all_zero_columns.len(),
            preview(&report.all_zero_columns, 10)
        );
    }
    if !report.mostly_zero_columns.is_empty() {
        println!(
            "Warning: {} columns are >95% zeros (kept, may add noise): {}",
            report.mostly_zero_columns.len(),
            preview(&report.mostly_zero_columns, 5)
        );
    }
    if report.rows_with_missing_values > 0 {
        println!(
            "Removed {} rows with missing predictor values",
            report.rows_with_missing_values
        );
    }
    println!(
        "Final dimensions: {} rows, {} columns",
        report.final_rows, report.final_cols
    );
    println!("---------- End Cleaning Report ----------\n");
}

pub fn print_ranking(ranking: &CorrelationRanking, top_k: usize, outcome_col: &str) {
    println!("Top {} statistics most correlated with {outcome_col}:", top_k.min(ranking.entries.len()));
    for (i, (name, r)) in ranking.entries.iter().take(top_k).enumerate() {
        println!("  {:>2}. {name:<28} {r:+.4}", i + 1);
    }
    println!();
}

pub fn print_linear_fit(fit: &LinearFit) {
    println!("Linear model: {} observations, {} terms", fit.n_obs, fit.n_params);
    if fit.is_rank_deficient() {
        println!(
            "  note: design matrix rank {} < {} terms; collinear terms suppressed",
            fit.rank, fit.n_params
        );
    }
    println!("  R-squared: {:.4}", fit.r_squared);

    let mut ranked: Vec<(&String, &f64)> = fit
        .terms
        .iter()
        .zip(fit.coefficients.iter())
        .skip(1) // intercept last
        .collect();
    ranked.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    println!("  Largest coefficients:");
    for (term, coef) in ranked.iter().take(10) {
        println!("    {term:<28} {coef:+.5}");
    }
    println!("    (intercept)                  {:+.5}\n", fit.coefficients[0]);
}

pub fn print_held_out_model(model: &HeldOutModel) {
    println!(
        "Held-out logistic model: {} train rows, {} test rows",
        model.train_rows, model.test_rows
    );
    if !model.fit.converged {
        println!(
            "  note: IRLS stopped after {} iterations without full convergence",
            model.fit.iterations
        );
    }
    println!("  McFadden pseudo R-squared: {:.4}", model.fit.pseudo_r_squared);

    let cm = &model.confusion;
    println!("  Confusion matrix (rows = actual, cols = predicted):");
    println!("                 pred loss   pred win");
    println!(
        "    actual loss  {:>9}  {:>9}",
        cm.true_negative, cm.false_positive
    );
    println!(
        "    actual win   {:>9}  {:>9}",
        cm.false_negative, cm.true_positive
    );
    println!(
        "  Accuracy: {:.1}% ({}/{} correct)",
        model.accuracy * 100.0,
        cm.correct(),
        cm.total()
    );

    println!("  Predictor importance (|coef| x std dev):");
    for (name, value) in model.fit.importance.iter().take(10) {
        println!("    {name:<28} {value:.4}");
    }
    println!();
}
