//! Remote data loading: HTTP fetchers, payload types, and the NBA
//! per-season caches.

pub mod cache;
pub mod http;
pub mod injuries;
pub mod types;

pub use cache::{load_or_fetch_season, season_cache_path, CacheStatus};
pub use injuries::{injuries_cache_path, load_or_fetch_injuries, INJURED_PLAYERS_COLUMN};
pub use types::{GameRecord, NbaResultSet, TeamGameRow, TeamGames};

use reqwest::Client;

use crate::cli::types::{League, Season};
use crate::error::{Result, WinsightError};

/// Everything the pipeline needs for the requested seasons.
#[derive(Debug, Default)]
pub struct LoadedData {
    pub stats: TeamGames,
    pub games: Vec<GameRecord>,
    /// Per-season game-log cache outcomes (NBA only), in season order.
    pub cache_status: Vec<(Season, CacheStatus)>,
    /// Per-season injury cache outcomes, when injuries were requested.
    pub injury_status: Vec<(Season, CacheStatus)>,
}

/// Load statistics and game results for a list of seasons.
///
/// Seasons are fetched sequentially; the first failure aborts the load.
/// With `with_injuries` the NBA path also loads each game's inactive-player
/// count and appends the [`INJURED_PLAYERS_COLUMN`] statistic.
pub async fn load(
    client: &Client,
    league: League,
    seasons: &[Season],
    refresh: bool,
    with_injuries: bool,
) -> Result<LoadedData> {
    if with_injuries && league != League::Nba {
        return Err(WinsightError::Config {
            message: "inactive-player data is only available for the nba league".to_string(),
        });
    }

    let mut data = LoadedData::default();

    match league {
        League::Nfl => {
            for &season in seasons {
                let table = http::fetch_nfl_team_weeks(client, season).await?;
                data.stats.merge(table);
            }
            data.games = http::fetch_nfl_games(client, seasons).await?;
        }
        League::Nba => {
            for &season in seasons {
                let (log, status) = load_or_fetch_season(client, season, refresh).await?;
                let (mut table, games) = types::nba_game_log_to_tables(season, &log)?;
                if with_injuries {
                    let game_ids = log.game_ids()?;
                    let (injury_cache, injury_status) =
                        load_or_fetch_injuries(client, season, &game_ids).await?;
                    injuries::append_injury_column(&mut table, &injury_cache);
                    data.injury_status.push((season, injury_status));
                }
                data.stats.merge(table);
                data.games.extend(games);
                data.cache_status.push((season, status));
            }
        }
    }

    Ok(data)
}
