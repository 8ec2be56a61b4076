//! Shared orchestration steps used by more than one command.

use std::path::Path;

use reqwest::Client;

use crate::analysis::{correlation_matrix, CorrelationRanking};
use crate::cli::CommonArgs;
use crate::config::ExclusionList;
use crate::error::Result;
use crate::pipeline::{clean, derive_outcomes, join_key_for, join_stats_with_outcomes, CleanReport};
use crate::provider::{self, LoadedData};
use crate::report::{console, render_correlation_bars, render_heatmap};
use crate::table::Frame;

/// Exclusion list from `--exclusions` or the league default.
pub fn resolve_exclusions(args: &CommonArgs) -> Result<ExclusionList> {
    match &args.exclusions {
        Some(path) => ExclusionList::from_file(path),
        None => Ok(ExclusionList::default_for(args.league)),
    }
}

/// Seasons requested on the command line, deduplicated in order.
pub fn resolve_seasons(args: &CommonArgs) -> Vec<crate::cli::types::Season> {
    let mut seasons = Vec::new();
    for &s in &args.season {
        if !seasons.contains(&s) {
            seasons.push(s);
        }
    }
    seasons
}

/// Run Loader → Deriver → Joiner → Cleaner and report each step.
pub async fn load_and_clean(args: &CommonArgs) -> Result<(Frame, CleanReport, LoadedData)> {
    let seasons = resolve_seasons(args);
    println!(
        "Loading {} data for seasons: {}",
        args.league,
        seasons
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let client = Client::new();
    let data = provider::load(&client, args.league, &seasons, args.refresh, args.injuries).await?;
    console::print_cache_status(&data.cache_status);
    console::print_injury_status(&data.injury_status);
    println!(
        "Loaded {} stat rows and {} game records",
        data.stats.rows.len(),
        data.games.len()
    );

    let outcomes = derive_outcomes(&data.games);
    println!("Derived {} team-game outcomes", outcomes.len());

    let joined = join_stats_with_outcomes(&data.stats, &outcomes, join_key_for(args.league))?;
    let (cleaned, report) = clean(&joined, args.league.outcome_column())?;
    console::print_clean_report(&report);

    Ok((cleaned, report, data))
}

/// Render the correlation heatmap and bar chart for the top-K predictors
/// into `out_dir`, reporting each written file.
pub fn render_charts(
    frame: &Frame,
    ranking: &CorrelationRanking,
    top_k: usize,
    outcome_col: &str,
    out_dir: &Path,
) -> Result<()> {
    let selected = ranking.top_k(top_k);
    let matrix = correlation_matrix(frame, &selected)?;

    std::fs::create_dir_all(out_dir)?;
    let heatmap_path = out_dir.join("correlation_heatmap.png");
    render_heatmap(&matrix, &heatmap_path)?;
    println!("Heatmap written to {}", heatmap_path.display());

    let bars_path = out_dir.join(format!("correlations_with_{outcome_col}.png"));
    render_correlation_bars(ranking, top_k, outcome_col, &bars_path)?;
    println!("Correlation chart written to {}", bars_path.display());
    Ok(())
}
