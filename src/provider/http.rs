//! HTTP fetchers for the public statistics sources.
//!
//! A remote failure is surfaced immediately through `error_for_status` and
//! aborts the run; there is no retry and no offline fallback for the NFL
//! variant.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use reqwest::Client;

use super::types::{GameRecord, NbaEnvelope, NbaResultSet, TeamGameRow, TeamGames};
use crate::cli::types::{Season, Week};
use crate::error::{Result, WinsightError};

/// nflverse team-week statistics release asset, one CSV per season.
pub const NFLVERSE_TEAM_STATS_URL: &str =
    "https://github.com/nflverse/nflverse-data/releases/download/stats_team";

/// nflverse schedule/results file; `result` is home score minus away score.
pub const NFLVERSE_GAMES_URL: &str =
    "https://github.com/nflverse/nfldata/raw/master/data/games.csv";

/// Base path for the NBA stats API.
pub const NBA_STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// Headers `stats.nba.com` requires before it will answer at all.
pub(super) fn nba_header_map() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0",
        ),
    );
    h.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    h
}

/// Fetch the league-wide team game log for one NBA season.
pub async fn fetch_nba_game_log(client: &Client, season: Season) -> Result<NbaResultSet> {
    let url = format!("{NBA_STATS_BASE_URL}/leaguegamelog");
    let params = [
        ("Counter", "0".to_string()),
        ("Direction", "ASC".to_string()),
        ("LeagueID", "00".to_string()),
        ("PlayerOrTeam", "T".to_string()),
        ("Season", season.nba_label()),
        ("SeasonType", "Regular Season".to_string()),
        ("Sorter", "DATE".to_string()),
    ];

    let envelope = client
        .get(&url)
        .headers(nba_header_map())
        .query(&params)
        .send()
        .await?
        .error_for_status()?
        .json::<NbaEnvelope>()
        .await?;

    let log = envelope
        .result_sets
        .into_iter()
        .find(|rs| rs.name == "LeagueGameLog")
        .ok_or(WinsightError::NoData {
            season: season.as_u16(),
        })?;
    if log.row_set.is_empty() {
        return Err(WinsightError::NoData {
            season: season.as_u16(),
        });
    }
    Ok(log)
}

/// Fetch per-week team statistics for one NFL season.
pub async fn fetch_nfl_team_weeks(client: &Client, season: Season) -> Result<TeamGames> {
    let url = format!("{NFLVERSE_TEAM_STATS_URL}/stats_team_week_{season}.csv");
    let body = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let table = parse_nfl_team_stats(season, &body)?;
    if table.rows.is_empty() {
        return Err(WinsightError::NoData {
            season: season.as_u16(),
        });
    }
    Ok(table)
}

/// Fetch the schedule/results file and keep the requested seasons.
pub async fn fetch_nfl_games(client: &Client, seasons: &[Season]) -> Result<Vec<GameRecord>> {
    let body = client
        .get(NFLVERSE_GAMES_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_nfl_games(&body, seasons)
}

/// NFL stat columns that are keys, not statistics.
const NFL_ID_COLUMNS: &[&str] = &["season", "week", "team", "opponent_team"];

/// Parse one season's team-week CSV, classifying each column exactly once:
/// known keys are identifiers, columns whose every non-empty value parses as
/// a number are statistics, everything else is text.
pub fn parse_nfl_team_stats(season: Season, csv_text: &str) -> Result<TeamGames> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let records: Vec<csv::StringRecord> =
        reader.records().collect::<std::result::Result<_, _>>()?;

    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| WinsightError::MissingColumn {
                name: name.to_string(),
            })
    };
    let week_idx = col("week")?;
    let team_idx = col("team")?;

    let mut stat_indices = Vec::new();
    let mut text_indices = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        if NFL_ID_COLUMNS.contains(&header.as_str()) {
            continue;
        }
        let numeric = records.iter().all(|r| {
            let v = r.get(i).unwrap_or("");
            v.is_empty() || v == "NA" || v.parse::<f64>().is_ok()
        });
        if numeric {
            stat_indices.push(i);
        } else {
            text_indices.push(i);
        }
    }

    let mut table = TeamGames {
        stat_names: stat_indices.iter().map(|&i| headers[i].clone()).collect(),
        text_names: text_indices.iter().map(|&i| headers[i].clone()).collect(),
        rows: Vec::with_capacity(records.len()),
    };

    for record in &records {
        let week: u16 = record
            .get(week_idx)
            .unwrap_or_default()
            .parse()
            .unwrap_or(0);
        let team = record.get(team_idx).unwrap_or_default().to_string();
        table.rows.push(TeamGameRow {
            season,
            week: Week::new(week),
            game_id: None,
            team,
            date: None,
            values: stat_indices
                .iter()
                .map(|&i| parse_csv_number(record.get(i).unwrap_or_default()))
                .collect(),
            texts: text_indices
                .iter()
                .map(|&i| {
                    let v = record.get(i).unwrap_or_default();
                    if v.is_empty() {
                        None
                    } else {
                        Some(v.to_string())
                    }
                })
                .collect(),
        });
    }

    Ok(table)
}

/// Parse the schedule CSV into game records for the requested seasons.
pub fn parse_nfl_games(csv_text: &str, seasons: &[Season]) -> Result<Vec<GameRecord>> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| WinsightError::MissingColumn {
                name: name.to_string(),
            })
    };
    let game_id_idx = col("game_id")?;
    let season_idx = col("season")?;
    let week_idx = col("week")?;
    let home_idx = col("home_team")?;
    let away_idx = col("away_team")?;
    let result_idx = col("result")?;

    let mut games = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(season) = record
            .get(season_idx)
            .and_then(|s| s.parse::<u16>().ok())
            .map(Season::new)
        else {
            continue;
        };
        if !seasons.contains(&season) {
            continue;
        }
        games.push(GameRecord {
            season,
            week: Week::new(
                record
                    .get(week_idx)
                    .unwrap_or_default()
                    .parse()
                    .unwrap_or(0),
            ),
            game_id: record.get(game_id_idx).unwrap_or_default().to_string(),
            home_team: record.get(home_idx).unwrap_or_default().to_string(),
            away_team: record.get(away_idx).unwrap_or_default().to_string(),
            result: parse_csv_number(record.get(result_idx).unwrap_or_default()),
        });
    }
    Ok(games)
}

/// nflverse writes missing values as empty fields or literal "NA".
fn parse_csv_number(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw == "NA" {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests;
