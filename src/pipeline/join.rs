//! Left join of team-game statistics with derived outcomes.

use std::collections::HashMap;

use crate::error::Result;
use crate::pipeline::outcomes::TeamGameOutcome;
use crate::provider::TeamGames;
use crate::table::{Column, ColumnRole, Frame};

/// Which key identifies a team-game on both sides of the join.
///
/// NFL stat rows are keyed by (season, week, team); NBA has no week concept,
/// so its rows are keyed by (season, game id, team).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKey {
    SeasonWeekTeam,
    SeasonGameTeam,
}

fn key_of(
    key: JoinKey,
    season: u16,
    week: u16,
    game_id: Option<&str>,
    team: &str,
) -> (u16, String, String) {
    match key {
        JoinKey::SeasonWeekTeam => (season, week.to_string(), team.to_string()),
        JoinKey::SeasonGameTeam => (
            season,
            game_id.unwrap_or_default().to_string(),
            team.to_string(),
        ),
    }
}

/// Build the joined analysis table.
///
/// Every statistic row is kept; rows with no matching outcome (a game with
/// no recorded result yet) carry missing outcome fields and are removed by
/// the cleaner. Text columns come out categorical, never raw strings.
pub fn join_stats_with_outcomes(
    stats: &TeamGames,
    outcomes: &[TeamGameOutcome],
    key: JoinKey,
) -> Result<Frame> {
    let mut index: HashMap<(u16, String, String), &TeamGameOutcome> = HashMap::new();
    for outcome in outcomes {
        index.insert(
            key_of(
                key,
                outcome.season.as_u16(),
                outcome.week.as_u16(),
                Some(&outcome.game_id),
                &outcome.team,
            ),
            outcome,
        );
    }

    let n = stats.rows.len();
    let mut season = Vec::with_capacity(n);
    let mut week = Vec::with_capacity(n);
    let mut game_id = Vec::with_capacity(n);
    let mut team = Vec::with_capacity(n);
    let mut date = Vec::with_capacity(n);
    let mut win = Vec::with_capacity(n);
    let mut loss = Vec::with_capacity(n);
    let mut tie = Vec::with_capacity(n);

    for row in &stats.rows {
        season.push(Some(f64::from(row.season.as_u16())));
        week.push(Some(f64::from(row.week.as_u16())));
        game_id.push(row.game_id.clone());
        team.push(Some(row.team.clone()));
        date.push(row.date.clone());

        let matched = index.get(&key_of(
            key,
            row.season.as_u16(),
            row.week.as_u16(),
            row.game_id.as_deref(),
            &row.team,
        ));
        win.push(matched.map(|o| f64::from(o.win)));
        loss.push(matched.map(|o| f64::from(o.loss)));
        tie.push(matched.map(|o| f64::from(o.tie)));
    }

    let mut frame = Frame::new();
    frame.push(Column::numeric("season", ColumnRole::Identifier, season))?;
    frame.push(Column::numeric("week", ColumnRole::Identifier, week))?;
    let mut game_id_col = Column::category("game_id", game_id);
    game_id_col.role = ColumnRole::Identifier;
    frame.push(game_id_col)?;
    let mut team_col = Column::category("team", team);
    team_col.role = ColumnRole::Identifier;
    frame.push(team_col)?;
    let mut date_col = Column::category("game_date", date);
    date_col.role = ColumnRole::Identifier;
    frame.push(date_col)?;

    for (i, name) in stats.text_names.iter().enumerate() {
        let values = stats.rows.iter().map(|r| r.texts[i].clone()).collect();
        frame.push(Column::category(name.clone(), values))?;
    }
    for (i, name) in stats.stat_names.iter().enumerate() {
        let values = stats.rows.iter().map(|r| r.values[i]).collect();
        frame.push(Column::numeric(name.clone(), ColumnRole::Numeric, values))?;
    }

    frame.push(Column::numeric("win", ColumnRole::Outcome, win))?;
    frame.push(Column::numeric("loss", ColumnRole::Outcome, loss))?;
    frame.push(Column::numeric("tie", ColumnRole::Outcome, tie))?;

    Ok(frame)
}
