//! Per-season cache for fetched NBA game logs.
//!
//! One JSON file per season under the user cache directory holds that
//! season's raw fetched rows. A season already on disk is not re-fetched
//! unless the operator asks for a refresh, and a refresh only appends games
//! that were not cached yet; rows already on disk are never rewritten.
//!
//! Concurrent invocations against the same cache directory are unsupported.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use reqwest::Client;

use super::http::fetch_nba_game_log;
use super::types::NbaResultSet;
use crate::cli::types::Season;
use crate::error::{Result, WinsightError};

/// Path: ~/.cache/winsight/nba-gamelog_{season}.json
pub fn season_cache_path(season: Season) -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("winsight")
        .join(format!("nba-gamelog_{}.json", season.as_u16()))
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories as needed
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// What the cache did for one season, for the console report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatus {
    /// Games already on disk before this run.
    pub cached_games: usize,
    /// Newly available games appended this run.
    pub appended_games: usize,
    /// Whether the remote source was contacted at all.
    pub fetched: bool,
}

/// Append rows of `fresh` whose game id is not in `cached`.
///
/// Returns the merged log and the number of games appended. Cached rows keep
/// their position and content.
pub fn merge_new_games(cached: NbaResultSet, fresh: &NbaResultSet) -> Result<(NbaResultSet, usize)> {
    let known = cached.game_ids()?;
    let fresh_game_idx = fresh.column_index("GAME_ID")?;

    let mut merged = cached;
    let mut appended_ids: Vec<String> = Vec::new();
    for row in &fresh.row_set {
        let Some(id) = row.get(fresh_game_idx).and_then(super::types::value_as_string) else {
            continue;
        };
        if known.contains(&id) {
            continue;
        }
        merged.row_set.push(row.clone());
        if !appended_ids.contains(&id) {
            appended_ids.push(id);
        }
    }
    Ok((merged, appended_ids.len()))
}

/// Load one season's game log, consulting the cache first.
///
/// - cache hit, no refresh: return cached rows, no network traffic;
/// - cache hit, refresh: fetch, append new games, rewrite the file;
/// - cache miss: fetch and write the season file.
pub async fn load_or_fetch_season(
    client: &Client,
    season: Season,
    refresh: bool,
) -> Result<(NbaResultSet, CacheStatus)> {
    let path = season_cache_path(season);

    let cached: Option<NbaResultSet> = try_read_to_string(&path)
        .and_then(|s| serde_json::from_str(&s).ok());

    match (cached, refresh) {
        (Some(log), false) => {
            let cached_games = log.game_ids()?.len();
            Ok((
                log,
                CacheStatus {
                    cached_games,
                    appended_games: 0,
                    fetched: false,
                },
            ))
        }
        (Some(log), true) => {
            let cached_games = log.game_ids()?.len();
            let fresh = fetch_nba_game_log(client, season).await?;
            let (merged, appended_games) = merge_new_games(log, &fresh)?;
            persist(&path, &merged)?;
            Ok((
                merged,
                CacheStatus {
                    cached_games,
                    appended_games,
                    fetched: true,
                },
            ))
        }
        (None, _) => {
            let fresh = fetch_nba_game_log(client, season).await?;
            persist(&path, &fresh)?;
            let cached_games = fresh.game_ids()?.len();
            Ok((
                fresh,
                CacheStatus {
                    cached_games,
                    appended_games: 0,
                    fetched: true,
                },
            ))
        }
    }
}

fn persist(path: &Path, log: &NbaResultSet) -> Result<()> {
    let json = serde_json::to_string(log)?;
    write_string(path, &json).map_err(|e| WinsightError::Cache {
        message: format!("failed to write {}: {e}", path.display()),
    })
}
