//! Correlate command: ranking and charts, no model fitting.

use std::path::Path;

use super::common::{load_and_clean, render_charts, resolve_exclusions};
use crate::analysis::rank_against_outcome;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::report::console;

pub async fn handle_correlate(common: CommonArgs, top_k: usize, out_dir: &Path) -> Result<()> {
    let exclusions = resolve_exclusions(&common)?;
    let outcome_col = common.league.outcome_column();
    let (cleaned, _, _) = load_and_clean(&common).await?;

    let ranking = rank_against_outcome(&cleaned, outcome_col, &exclusions)?;
    console::print_ranking(&ranking, top_k, outcome_col);
    render_charts(&cleaned, &ranking, top_k, outcome_col, out_dir)?;

    Ok(())
}
