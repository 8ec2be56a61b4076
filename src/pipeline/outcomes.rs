//! Outcome derivation: signed game results into per-team win/loss/tie rows.

use serde::{Deserialize, Serialize};

use crate::cli::types::{Season, Week};
use crate::provider::GameRecord;

/// One team's outcome for one played game. Exactly one of the three
/// indicators is 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGameOutcome {
    pub season: Season,
    pub week: Week,
    pub game_id: String,
    pub team: String,
    pub win: u8,
    pub loss: u8,
    pub tie: u8,
}

/// Derive two outcome rows per played game, home and away.
///
/// A strictly positive result is a home win, strictly negative an away win,
/// exactly zero a tie on both sides. Ties are real outcomes in this domain
/// and must never be folded into losses. Games without a result are dropped.
pub fn derive_outcomes(games: &[GameRecord]) -> Vec<TeamGameOutcome> {
    let mut outcomes = Vec::with_capacity(games.len() * 2);
    for game in games {
        let Some(result) = game.result else {
            continue;
        };
        let (home_win, away_win, tie) = if result > 0.0 {
            (1u8, 0u8, 0u8)
        } else if result < 0.0 {
            (0, 1, 0)
        } else {
            (0, 0, 1)
        };

        outcomes.push(TeamGameOutcome {
            season: game.season,
            week: game.week,
            game_id: game.game_id.clone(),
            team: game.home_team.clone(),
            win: home_win,
            loss: away_win,
            tie,
        });
        outcomes.push(TeamGameOutcome {
            season: game.season,
            week: game.week,
            game_id: game.game_id.clone(),
            team: game.away_team.clone(),
            win: away_win,
            loss: home_win,
            tie,
        });
    }
    outcomes
}
