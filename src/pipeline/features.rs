//! Pre-game feature engineering.
//!
//! Post-game statistics predict the game they describe trivially, so the
//! modeling path can instead derive leakage-free features: each team's
//! rolling average of a statistic over its previous games (the game being
//! predicted never contributes to its own features), plus the opponent's
//! mirrored values matched through the game id.
//!
//! Which statistics and rules apply is an externally editable JSON
//! configuration, not code.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, WinsightError};
use crate::table::{Column, ColumnRole, Frame};

/// `features_config.json` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureConfig {
    /// How many prior games a rolling window covers.
    pub rolling_window: usize,
    /// Statistics the rules apply to; names not present in the table are
    /// skipped silently so one config can serve several seasons.
    pub stat_columns: Vec<String>,
    pub feature_types: Vec<FeatureRule>,
    /// Direct columns (e.g. injury counts) mirrored to the opponent as-is.
    #[serde(default)]
    pub additional_features: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureRule {
    /// Computation rule name; `rolling_avg` is the only supported rule.
    pub name: String,
    pub enabled: bool,
    /// Suffix appended to the source stat name, e.g. `_ROLL_AVG`.
    pub suffix: String,
}

impl FeatureConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FeatureConfig = serde_json::from_str(json)?;
        for rule in &config.feature_types {
            if rule.enabled && rule.name != "rolling_avg" {
                return Err(WinsightError::Config {
                    message: format!("unsupported feature rule: {}", rule.name),
                });
            }
        }
        if config.rolling_window == 0 {
            return Err(WinsightError::Config {
                message: "rolling_window must be at least 1".to_string(),
            });
        }
        Ok(config)
    }
}

/// Append pre-game feature columns to the cleaned table.
///
/// Returns the widened frame and the names of the feature columns, in the
/// order they were created; models restrict themselves to these names.
pub fn apply_pregame_features(
    frame: &Frame,
    config: &FeatureConfig,
) -> Result<(Frame, Vec<String>)> {
    let team_col = frame.require("team")?;
    let n = frame.nrows();

    // Chronological row order per team: (date, game id) sorts within a team.
    let mut per_team: HashMap<String, Vec<usize>> = HashMap::new();
    for row in 0..n {
        let team = team_col.level_at(row).unwrap_or("").to_string();
        per_team.entry(team).or_default().push(row);
    }
    let date_col = frame.column("game_date");
    let game_id_col = frame.column("game_id");
    let sort_key = |row: usize| -> (String, String) {
        (
            date_col
                .and_then(|c| c.level_at(row))
                .unwrap_or("")
                .to_string(),
            game_id_col
                .and_then(|c| c.level_at(row))
                .unwrap_or("")
                .to_string(),
        )
    };
    for rows in per_team.values_mut() {
        rows.sort_by_key(|&r| sort_key(r));
    }

    let mut result = frame.clone();
    let mut feature_names = Vec::new();

    for rule in config.feature_types.iter().filter(|r| r.enabled) {
        for stat in &config.stat_columns {
            let Some(values) = frame.column(stat).and_then(|c| c.as_number()) else {
                continue;
            };
            let mut feature = vec![None; n];
            for rows in per_team.values() {
                // values of this team's games already played, oldest first
                let mut history: Vec<f64> = Vec::new();
                for &row in rows {
                    if !history.is_empty() {
                        let window = &history[history.len().saturating_sub(config.rolling_window)..];
                        feature[row] = Some(window.iter().sum::<f64>() / window.len() as f64);
                    }
                    if let Some(v) = values[row] {
                        history.push(v);
                    }
                }
            }
            let name = format!("{stat}{}", rule.suffix);
            result.push(Column::numeric(name.clone(), ColumnRole::Numeric, feature))?;
            feature_names.push(name);
        }
    }

    for extra in &config.additional_features {
        if frame.column(extra).is_some() && !feature_names.contains(extra) {
            feature_names.push(extra.clone());
        }
    }

    // Opponent mirroring: the other row of the same game id.
    let mut opponent_row: Vec<Option<usize>> = vec![None; n];
    if let Some(game_ids) = game_id_col {
        let mut by_game: HashMap<&str, Vec<usize>> = HashMap::new();
        for row in 0..n {
            if let Some(id) = game_ids.level_at(row) {
                by_game.entry(id).or_default().push(row);
            }
        }
        for rows in by_game.values() {
            if let [a, b] = rows[..] {
                opponent_row[a] = Some(b);
                opponent_row[b] = Some(a);
            }
        }
    }

    let mut opponent_names = Vec::new();
    for name in &feature_names {
        let Some(values) = result.column(name).and_then(|c| c.as_number()) else {
            continue;
        };
        let mirrored: Vec<Option<f64>> = (0..n)
            .map(|row| opponent_row[row].and_then(|opp| values[opp]))
            .collect();
        opponent_names.push((format!("OPP_{name}"), mirrored));
    }
    for (name, values) in opponent_names {
        result.push(Column::numeric(name.clone(), ColumnRole::Numeric, values))?;
        feature_names.push(name);
    }

    Ok((result, feature_names))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(window: usize) -> FeatureConfig {
        FeatureConfig::from_json(&format!(
            r#"{{
                "rolling_window": {window},
                "stat_columns": ["PTS"],
                "feature_types": [
                    {{"name": "rolling_avg", "enabled": true, "suffix": "_ROLL_AVG"}}
                ]
            }}"#
        ))
        .unwrap()
    }

    fn two_team_frame() -> Frame {
        let mut frame = Frame::new();
        let id = |name: &str, values: Vec<Option<String>>| {
            let mut c = Column::category(name, values);
            c.role = ColumnRole::Identifier;
            c
        };
        let s = |v: &str| Some(v.to_string());
        // LAL and BOS play each other three times, in date order
        frame
            .push(id(
                "team",
                vec![s("LAL"), s("BOS"), s("LAL"), s("BOS"), s("LAL"), s("BOS")],
            ))
            .unwrap();
        frame
            .push(id(
                "game_id",
                vec![s("g1"), s("g1"), s("g2"), s("g2"), s("g3"), s("g3")],
            ))
            .unwrap();
        frame
            .push(id(
                "game_date",
                vec![
                    s("2024-01-01"),
                    s("2024-01-01"),
                    s("2024-01-05"),
                    s("2024-01-05"),
                    s("2024-01-09"),
                    s("2024-01-09"),
                ],
            ))
            .unwrap();
        frame
            .push(Column::numeric(
                "PTS",
                ColumnRole::Numeric,
                vec![
                    Some(100.0),
                    Some(90.0),
                    Some(110.0),
                    Some(96.0),
                    Some(120.0),
                    Some(102.0),
                ],
            ))
            .unwrap();
        frame
    }

    #[test]
    fn test_rolling_average_is_shifted_one_game() {
        let (frame, names) = apply_pregame_features(&two_team_frame(), &config(10)).unwrap();
        assert!(names.contains(&"PTS_ROLL_AVG".to_string()));

        let roll = frame.numeric("PTS_ROLL_AVG").unwrap();
        // first game of each team has no history
        assert_eq!(roll[0], None);
        assert_eq!(roll[1], None);
        // second game sees only the first
        assert_eq!(roll[2], Some(100.0));
        assert_eq!(roll[3], Some(90.0));
        // third game averages the first two
        assert_eq!(roll[4], Some(105.0));
        assert_eq!(roll[5], Some(93.0));
    }

    #[test]
    fn test_window_limits_history() {
        let (frame, _) = apply_pregame_features(&two_team_frame(), &config(1)).unwrap();
        let roll = frame.numeric("PTS_ROLL_AVG").unwrap();
        // window of one: only the immediately previous game counts
        assert_eq!(roll[4], Some(110.0));
    }

    #[test]
    fn test_opponent_features_mirror_game_rows() {
        let (frame, names) = apply_pregame_features(&two_team_frame(), &config(10)).unwrap();
        assert!(names.contains(&"OPP_PTS_ROLL_AVG".to_string()));
        let own = frame.numeric("PTS_ROLL_AVG").unwrap();
        let opp = frame.numeric("OPP_PTS_ROLL_AVG").unwrap();
        // LAL's opponent value in g2 is BOS's own value for g2
        assert_eq!(opp[2], own[3]);
        assert_eq!(opp[3], own[2]);
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let err = FeatureConfig::from_json(
            r#"{"rolling_window": 5, "stat_columns": [],
                "feature_types": [{"name": "season_total", "enabled": true, "suffix": "_X"}]}"#,
        );
        assert!(err.is_err());
    }
}
