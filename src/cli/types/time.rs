//! Time-related types for seasons and weeks.

use crate::error::{Result, WinsightError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for season years.
///
/// An NFL season is identified by its calendar start year (e.g. 2023);
/// an NBA season by the year its first half falls in (2023 = "2023-24").
///
/// # Examples
///
/// ```rust
/// use winsight::Season;
///
/// let season = Season::new(2023);
/// assert_eq!(season.as_u16(), 2023);
/// assert_eq!(season.to_string(), "2023");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// NBA API season string, e.g. 2023 -> "2023-24".
    pub fn nba_label(&self) -> String {
        format!("{}-{:02}", self.0, (self.0 + 1) % 100)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2024)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = WinsightError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for week numbers.
///
/// Only meaningful for the NFL variant; NBA games carry week 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(0)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = WinsightError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_and_display() {
        let season: Season = "2023".parse().unwrap();
        assert_eq!(season, Season::new(2023));
        assert_eq!(season.to_string(), "2023");
    }

    #[test]
    fn test_season_nba_label() {
        assert_eq!(Season::new(2023).nba_label(), "2023-24");
        assert_eq!(Season::new(1999).nba_label(), "1999-00");
    }

    #[test]
    fn test_week_parse_rejects_garbage() {
        assert!("abc".parse::<Week>().is_err());
    }
}
