//! Fetch command: populate or update the per-season NBA cache.

use reqwest::Client;

use super::common::resolve_seasons;
use crate::cli::CommonArgs;
use crate::error::{Result, WinsightError};
use crate::provider::{
    injuries_cache_path, load_or_fetch_injuries, load_or_fetch_season, season_cache_path,
};
use crate::report::console;

pub async fn handle_fetch(common: CommonArgs) -> Result<()> {
    if !common.league.caches_seasons() {
        return Err(WinsightError::Config {
            message: "only the NBA variant caches seasons; the NFL source is fetched per run"
                .to_string(),
        });
    }

    let client = Client::new();
    let mut statuses = Vec::new();
    let mut injury_statuses = Vec::new();
    for season in resolve_seasons(&common) {
        let (log, status) = load_or_fetch_season(&client, season, common.refresh).await?;
        println!("  cache file: {}", season_cache_path(season).display());
        statuses.push((season, status));

        if common.injuries {
            let game_ids = log.game_ids()?;
            let (_, injury_status) =
                load_or_fetch_injuries(&client, season, &game_ids).await?;
            println!("  injury cache: {}", injuries_cache_path(season).display());
            injury_statuses.push((season, injury_status));
        }
    }
    console::print_cache_status(&statuses);
    console::print_injury_status(&injury_statuses);
    Ok(())
}
