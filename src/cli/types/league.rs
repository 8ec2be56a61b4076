//! League selection type.

use crate::error::{Result, WinsightError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which league's data the pipeline runs over.
///
/// The stages are league-agnostic; the league only selects the data source,
/// the join key shape, and the default leakage exclusion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nfl,
    Nba,
}

impl League {
    /// Outcome column name in the joined table.
    pub fn outcome_column(&self) -> &'static str {
        "win"
    }

    /// NBA games never go unresolved into the log; NFL schedules do list
    /// future games with no result yet.
    pub fn caches_seasons(&self) -> bool {
        matches!(self, League::Nba)
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            League::Nfl => write!(f, "nfl"),
            League::Nba => write!(f, "nba"),
        }
    }
}

impl FromStr for League {
    type Err = WinsightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nfl" => Ok(League::Nfl),
            "nba" => Ok(League::Nba),
            other => Err(WinsightError::UnknownLeague {
                name: other.to_string(),
            }),
        }
    }
}
