//! Analyze command: the full pipeline through both regression models.

use super::common::{load_and_clean, render_charts, resolve_exclusions};
use crate::analysis::{fit_held_out_logistic, fit_linear, rank_against_outcome};
use crate::cli::CommonArgs;
use crate::config::{load_feature_config, ExclusionList};
use crate::error::Result;
use crate::pipeline::apply_pregame_features;
use crate::report::{console, write_test_results};
use crate::table::{ColumnRole, Frame};

pub struct AnalyzeParams {
    pub common: CommonArgs,
    pub top_k: usize,
    pub out_dir: std::path::PathBuf,
    pub seed: u64,
    pub train_fraction: f64,
    pub features_config: Option<std::path::PathBuf>,
}

/// Predictors for the full-population linear model: every retained numeric
/// column minus the exclusion list, not the top-K selection.
fn linear_predictors(frame: &Frame, exclusions: &ExclusionList, outcome_col: &str) -> Vec<String> {
    frame
        .names_with_role(ColumnRole::Numeric)
        .into_iter()
        .filter(|n| n != outcome_col && !exclusions.contains(n))
        .collect()
}

pub async fn handle_analyze(params: AnalyzeParams) -> Result<()> {
    let AnalyzeParams {
        common,
        top_k,
        out_dir,
        seed,
        train_fraction,
        features_config,
    } = params;

    let exclusions = resolve_exclusions(&common)?;
    println!(
        "Using exclusion list v{} ({} names)",
        exclusions.version,
        exclusions.names.len()
    );
    let outcome_col = common.league.outcome_column();
    let (cleaned, _, _) = load_and_clean(&common).await?;

    // Correlation analysis and charts run on the cleaned post-game table.
    let ranking = rank_against_outcome(&cleaned, outcome_col, &exclusions)?;
    console::print_ranking(&ranking, top_k, outcome_col);
    render_charts(&cleaned, &ranking, top_k, outcome_col, &out_dir)?;

    // Optional pre-game feature stage: models then see only leakage-free
    // rolling features instead of the game's own statistics.
    let (model_frame, model_pool) = match &features_config {
        Some(path) => {
            let config = load_feature_config(path)?;
            let (widened, feature_names) = apply_pregame_features(&cleaned, &config)?;
            println!(
                "Computed {} pre-game feature columns (window of {})",
                feature_names.len(),
                config.rolling_window
            );
            (widened, Some(feature_names))
        }
        None => (cleaned, None),
    };

    let all_predictors = match &model_pool {
        Some(features) => features.clone(),
        None => linear_predictors(&model_frame, &exclusions, outcome_col),
    };

    let linear = fit_linear(&model_frame, outcome_col, &all_predictors)?;
    console::print_linear_fit(&linear);

    // Held-out logistic on the top-K explanatory set.
    let model_ranking = rank_against_outcome(&model_frame, outcome_col, &exclusions)?;
    let selected: Vec<String> = match &model_pool {
        Some(features) => model_ranking
            .entries
            .iter()
            .filter(|(name, _)| features.contains(name))
            .take(top_k)
            .map(|(name, _)| name.clone())
            .collect(),
        None => model_ranking.top_k(top_k),
    };
    println!(
        "Fitting held-out logistic model on {} predictors (seed {seed})",
        selected.len()
    );
    let held_out = fit_held_out_logistic(
        &model_frame,
        outcome_col,
        &selected,
        train_fraction,
        seed,
    )?;
    console::print_held_out_model(&held_out);

    let results_path = write_test_results(&model_frame, &held_out, &selected, &out_dir)?;
    println!(
        "Wrote {} test-set predictions to {}",
        held_out.predictions.len(),
        results_path.display()
    );

    Ok(())
}
