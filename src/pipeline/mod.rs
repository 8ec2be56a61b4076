//! The forward-only analysis pipeline stages.
//!
//! Loader output flows through outcome derivation, the join, cleaning, and
//! optional pre-game feature engineering; each stage takes its input by
//! reference and returns a fresh table plus a report record.

pub mod clean;
pub mod features;
pub mod join;
pub mod outcomes;

pub use clean::{clean, CleanReport};
pub use features::{apply_pregame_features, FeatureConfig};
pub use join::{join_stats_with_outcomes, JoinKey};
pub use outcomes::{derive_outcomes, TeamGameOutcome};

use crate::cli::types::League;

/// The join key shape each league's stat rows support.
pub fn join_key_for(league: League) -> JoinKey {
    match league {
        League::Nfl => JoinKey::SeasonWeekTeam,
        League::Nba => JoinKey::SeasonGameTeam,
    }
}
