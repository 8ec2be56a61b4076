//! Payload types for the remote statistics sources.
//!
//! NFL data comes from the nflverse public CSV releases; NBA data from the
//! `stats.nba.com` `leaguegamelog` endpoint, which answers with a
//! `resultSets` envelope (parallel `headers` / `rowSet` arrays).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::types::{Season, Week};
use crate::error::{Result, WinsightError};

/// One scheduled game with its signed result.
///
/// `result` is home score minus away score; `None` means the game has not
/// been played (or the source has no score yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub season: Season,
    pub week: Week,
    pub game_id: String,
    pub home_team: String,
    pub away_team: String,
    pub result: Option<f64>,
}

/// One team's statistics for one game (or one week for the NFL source).
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGameRow {
    pub season: Season,
    pub week: Week,
    /// NFL weekly stat rows carry no game id; the join falls back to
    /// (season, week, team) for them.
    pub game_id: Option<String>,
    pub team: String,
    /// Game date (YYYY-MM-DD) where the source provides one; used only to
    /// order games chronologically for pre-game feature windows.
    pub date: Option<String>,
    /// Numeric statistics, parallel to [`TeamGames::stat_names`].
    pub values: Vec<Option<f64>>,
    /// Text fields, parallel to [`TeamGames::text_names`]. Encoded as
    /// categoricals when the analysis table is built.
    pub texts: Vec<Option<String>>,
}

/// Per-team per-game statistics with a fixed column order.
#[derive(Debug, Clone, Default)]
pub struct TeamGames {
    pub stat_names: Vec<String>,
    pub text_names: Vec<String>,
    pub rows: Vec<TeamGameRow>,
}

impl TeamGames {
    /// Append another season's rows, aligning columns by name.
    ///
    /// Column sets can drift between season files; names new to `self` are
    /// added and existing rows read them as missing, names absent from
    /// `other` come through as missing in its rows.
    pub fn merge(&mut self, other: TeamGames) {
        if self.rows.is_empty() {
            *self = other;
            return;
        }

        for name in &other.stat_names {
            if !self.stat_names.contains(name) {
                self.stat_names.push(name.clone());
            }
        }
        for name in &other.text_names {
            if !self.text_names.contains(name) {
                self.text_names.push(name.clone());
            }
        }
        for row in &mut self.rows {
            row.values.resize(self.stat_names.len(), None);
            row.texts.resize(self.text_names.len(), None);
        }

        let stat_map: Vec<Option<usize>> = self
            .stat_names
            .iter()
            .map(|n| other.stat_names.iter().position(|o| o == n))
            .collect();
        let text_map: Vec<Option<usize>> = self
            .text_names
            .iter()
            .map(|n| other.text_names.iter().position(|o| o == n))
            .collect();

        for row in other.rows {
            self.rows.push(TeamGameRow {
                values: stat_map
                    .iter()
                    .map(|m| m.and_then(|i| row.values.get(i).copied().flatten()))
                    .collect(),
                texts: text_map
                    .iter()
                    .map(|m| m.and_then(|i| row.texts.get(i).cloned().flatten()))
                    .collect(),
                ..row
            });
        }
    }
}

/// `stats.nba.com` response envelope.
#[derive(Debug, Deserialize)]
pub struct NbaEnvelope {
    #[serde(rename = "resultSets")]
    pub result_sets: Vec<NbaResultSet>,
}

/// One `resultSets` entry: column headers plus untyped rows.
///
/// This is also the on-disk shape of the per-season cache file, so the cache
/// holds exactly the raw fetched rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NbaResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl NbaResultSet {
    pub fn column_index(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| WinsightError::MissingColumn {
                name: header.to_string(),
            })
    }

    /// Game ids present in the row set, in row order without duplicates.
    pub fn game_ids(&self) -> Result<Vec<String>> {
        let idx = self.column_index("GAME_ID")?;
        let mut ids: Vec<String> = Vec::new();
        for row in &self.row_set {
            if let Some(id) = row.get(idx).and_then(value_as_string) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}

/// Accept both `"0022300001"` and bare numbers for id-ish fields.
pub fn value_as_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// NBA game-log headers handled as identifiers, not statistics.
pub const NBA_ID_HEADERS: &[&str] = &[
    "SEASON_ID",
    "TEAM_ID",
    "TEAM_ABBREVIATION",
    "GAME_ID",
    "GAME_DATE",
];

/// NBA text headers that become categorical columns. WL is the raw outcome
/// string; it rides along as a categorical and never enters the predictors.
pub const NBA_TEXT_HEADERS: &[&str] = &["TEAM_NAME", "MATCHUP", "WL"];

/// Headers skipped entirely (bookkeeping flags with no analytic content).
pub const NBA_SKIP_HEADERS: &[&str] = &["VIDEO_AVAILABLE"];

fn nba_header_is_stat(header: &str) -> bool {
    !NBA_ID_HEADERS.contains(&header)
        && !NBA_TEXT_HEADERS.contains(&header)
        && !NBA_SKIP_HEADERS.contains(&header)
}

/// Convert an NBA game log into stat rows plus reconstructed game records.
///
/// Every game id appears twice in the log (one row per team); the home side
/// is the row whose MATCHUP reads "XXX vs. YYY" rather than "XXX @ YYY".
/// The signed result is home points minus away points. Games with only one
/// row or missing points produce no game record.
pub fn nba_game_log_to_tables(
    season: Season,
    log: &NbaResultSet,
) -> Result<(TeamGames, Vec<GameRecord>)> {
    let game_id_idx = log.column_index("GAME_ID")?;
    let team_idx = log.column_index("TEAM_ABBREVIATION")?;
    let matchup_idx = log.column_index("MATCHUP")?;
    let date_idx = log.column_index("GAME_DATE")?;
    let pts_idx = log.column_index("PTS")?;

    let stat_indices: Vec<usize> = log
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| nba_header_is_stat(h))
        .map(|(i, _)| i)
        .collect();
    let text_indices: Vec<usize> = log
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| NBA_TEXT_HEADERS.contains(&h.as_str()))
        .map(|(i, _)| i)
        .collect();

    let mut team_games = TeamGames {
        stat_names: stat_indices
            .iter()
            .map(|&i| log.headers[i].clone())
            .collect(),
        text_names: text_indices
            .iter()
            .map(|&i| log.headers[i].clone())
            .collect(),
        rows: Vec::with_capacity(log.row_set.len()),
    };

    // game id -> (home side, away side), each (team, points)
    let mut sides: HashMap<String, (Option<(String, f64)>, Option<(String, f64)>)> =
        HashMap::new();
    let mut game_order: Vec<String> = Vec::new();

    for row in &log.row_set {
        let game_id =
            row.get(game_id_idx)
                .and_then(value_as_string)
                .ok_or_else(|| WinsightError::Cache {
                    message: "game log row without GAME_ID".to_string(),
                })?;
        let team =
            row.get(team_idx)
                .and_then(value_as_string)
                .ok_or_else(|| WinsightError::Cache {
                    message: format!("game {game_id}: row without TEAM_ABBREVIATION"),
                })?;
        let matchup = row.get(matchup_idx).and_then(value_as_string);
        let date = row.get(date_idx).and_then(value_as_string);
        let points = row.get(pts_idx).and_then(value_as_f64);

        team_games.rows.push(TeamGameRow {
            season,
            week: Week::new(0),
            game_id: Some(game_id.clone()),
            team: team.clone(),
            date,
            values: stat_indices
                .iter()
                .map(|&i| row.get(i).and_then(value_as_f64))
                .collect(),
            texts: text_indices
                .iter()
                .map(|&i| row.get(i).and_then(value_as_string))
                .collect(),
        });

        let is_home = matchup.as_deref().is_some_and(|m| m.contains(" vs. "));
        if !sides.contains_key(&game_id) {
            game_order.push(game_id.clone());
        }
        let entry = sides.entry(game_id).or_insert((None, None));
        let side = points.map(|p| (team, p));
        if is_home {
            entry.0 = side;
        } else {
            entry.1 = side;
        }
    }

    let mut games = Vec::with_capacity(game_order.len());
    for game_id in game_order {
        let (home, away) = &sides[&game_id];
        if let (Some((home_team, home_pts)), Some((away_team, away_pts))) = (home, away) {
            games.push(GameRecord {
                season,
                week: Week::new(0),
                game_id,
                home_team: home_team.clone(),
                away_team: away_team.clone(),
                result: Some(home_pts - away_pts),
            });
        }
    }

    Ok((team_games, games))
}
