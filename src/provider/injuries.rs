//! Per-game inactive-player data for the NBA variant.
//!
//! The box-score summary endpoint lists each game's inactive players, one
//! request per game, so a season costs over a thousand requests. The cache
//! therefore records every processed game id, including games with no
//! inactive players, and persists after each fetch so an aborted run never
//! refetches what it already has. Counts reach the analysis table as the
//! `INJURED_PLAYERS` statistic; the pre-game feature configuration can pass
//! it through `additional_features`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::cache::{try_read_to_string, write_string, CacheStatus};
use super::http::{nba_header_map, NBA_STATS_BASE_URL};
use super::types::{value_as_string, NbaEnvelope, NbaResultSet, TeamGames};
use crate::cli::types::Season;
use crate::error::{Result, WinsightError};

/// Statistic column carrying each team-game's inactive-player count.
pub const INJURED_PLAYERS_COLUMN: &str = "INJURED_PLAYERS";

/// One inactive player listed for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactivePlayer {
    pub game_id: String,
    /// Team abbreviation, matching the game log's TEAM_ABBREVIATION.
    pub team: String,
}

/// On-disk shape of the per-season injury cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryCache {
    /// Every game id already fetched. A game with no inactive players still
    /// appears here, otherwise it would be refetched on every run.
    pub processed_games: Vec<String>,
    pub players: Vec<InactivePlayer>,
}

impl InjuryCache {
    pub fn is_processed(&self, game_id: &str) -> bool {
        self.processed_games.iter().any(|g| g == game_id)
    }

    pub fn record_game(&mut self, game_id: &str, players: Vec<InactivePlayer>) {
        if !self.is_processed(game_id) {
            self.processed_games.push(game_id.to_string());
        }
        self.players.extend(players);
    }

    /// Inactive-player count per (game id, team).
    pub fn counts(&self) -> HashMap<(String, String), usize> {
        let mut counts = HashMap::new();
        for p in &self.players {
            *counts
                .entry((p.game_id.clone(), p.team.clone()))
                .or_insert(0) += 1;
        }
        counts
    }
}

/// Path: ~/.cache/winsight/nba-injuries_{season}.json
pub fn injuries_cache_path(season: Season) -> PathBuf {
    super::cache::season_cache_path(season)
        .with_file_name(format!("nba-injuries_{}.json", season.as_u16()))
}

/// Inactive players of one box-score summary response.
pub fn inactive_players_from_set(game_id: &str, set: &NbaResultSet) -> Result<Vec<InactivePlayer>> {
    let team_idx = set.column_index("TEAM_ABBREVIATION")?;
    Ok(set
        .row_set
        .iter()
        .filter_map(|row| row.get(team_idx).and_then(value_as_string))
        .map(|team| InactivePlayer {
            game_id: game_id.to_string(),
            team,
        })
        .collect())
}

/// Fetch one game's inactive-player list.
pub async fn fetch_game_inactive_players(
    client: &Client,
    game_id: &str,
) -> Result<Vec<InactivePlayer>> {
    let url = format!("{NBA_STATS_BASE_URL}/boxscoresummaryv2");
    let envelope = client
        .get(&url)
        .headers(nba_header_map())
        .query(&[("GameID", game_id)])
        .send()
        .await?
        .error_for_status()?
        .json::<NbaEnvelope>()
        .await?;

    let set = envelope
        .result_sets
        .into_iter()
        .find(|rs| rs.name == "InactivePlayers")
        .ok_or_else(|| WinsightError::Cache {
            message: format!("game {game_id}: response has no InactivePlayers set"),
        })?;
    inactive_players_from_set(game_id, &set)
}

/// Load one season's injury data, fetching only unprocessed games.
///
/// The cache file is rewritten after every fetched game; a partial run
/// resumes where it stopped.
pub async fn load_or_fetch_injuries(
    client: &Client,
    season: Season,
    game_ids: &[String],
) -> Result<(InjuryCache, CacheStatus)> {
    let path = injuries_cache_path(season);
    let mut cache: InjuryCache = try_read_to_string(&path)
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default();
    let cached_games = cache.processed_games.len();

    let mut appended_games = 0;
    for game_id in game_ids {
        if cache.is_processed(game_id) {
            continue;
        }
        let players = fetch_game_inactive_players(client, game_id).await?;
        cache.record_game(game_id, players);
        appended_games += 1;
        persist(&path, &cache)?;
    }

    Ok((
        cache,
        CacheStatus {
            cached_games,
            appended_games,
            fetched: appended_games > 0,
        },
    ))
}

/// Append the INJURED_PLAYERS statistic to a season table.
///
/// Team-games with no recorded inactive players count zero, so the column
/// is always complete.
pub fn append_injury_column(table: &mut TeamGames, cache: &InjuryCache) {
    let counts = cache.counts();
    table.stat_names.push(INJURED_PLAYERS_COLUMN.to_string());
    for row in &mut table.rows {
        let count = row
            .game_id
            .as_ref()
            .and_then(|id| counts.get(&(id.clone(), row.team.clone())))
            .copied()
            .unwrap_or(0);
        row.values.push(Some(count as f64));
    }
}

fn persist(path: &Path, cache: &InjuryCache) -> Result<()> {
    let json = serde_json::to_string(cache)?;
    write_string(path, &json).map_err(|e| WinsightError::Cache {
        message: format!("failed to write {}: {e}", path.display()),
    })
}
