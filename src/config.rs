//! Analysis configuration: the versioned leakage exclusion list and loading
//! of the external feature configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::types::League;
use crate::error::Result;
use crate::pipeline::features::FeatureConfig;

/// Names barred from the correlation ranking and the predictor set.
///
/// Identifiers, the outcome fields, and statistics so strongly determined by
/// the outcome that using them as predictors would be circular. The source
/// analyses disagreed about this set between variants, so it is explicit and
/// versioned here, and replaceable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionList {
    pub version: u32,
    pub names: Vec<String>,
}

impl ExclusionList {
    pub fn new(version: u32, names: Vec<String>) -> Self {
        Self { version, names }
    }

    /// Current default set for a league.
    pub fn default_for(league: League) -> Self {
        let names: &[&str] = match league {
            // PAT and game-winning-FG counts are near-deterministic outcome
            // proxies: you only attempt the kick when the score says so.
            League::Nfl => &[
                "season",
                "week",
                "team",
                "game_id",
                "win",
                "loss",
                "tie",
                "pat_att",
                "pat_made",
                "pat_missed",
                "pat_blocked",
                "pat_pct",
                "gwfg_att",
                "gwfg_made",
                "gwfg_missed",
                "gwfg_blocked",
            ],
            // PLUS_MINUS has the outcome's sign by definition; PTS decides
            // the game outright.
            League::Nba => &[
                "SEASON_ID",
                "TEAM_ID",
                "GAME_ID",
                "win",
                "loss",
                "tie",
                "PLUS_MINUS",
                "PTS",
            ],
        };
        Self::new(2, names.iter().map(|s| s.to_string()).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Read a feature configuration from disk.
pub fn load_feature_config(path: &Path) -> Result<FeatureConfig> {
    let text = std::fs::read_to_string(path)?;
    FeatureConfig::from_json(&text)
}
