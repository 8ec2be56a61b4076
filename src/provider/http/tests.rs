//! Unit tests for the CSV parsers. Network fetchers are exercised against
//! the live sources only, not here.

use super::*;

const TEAM_STATS_CSV: &str = "\
season,week,team,opponent_team,passing_yards,sacks,coach
2023,1,KC,DET,226,1,Andy Reid
2023,1,DET,KC,253,3,Dan Campbell
2023,2,KC,JAX,NA,2,Andy Reid
";

#[test]
fn test_team_stats_column_classification() {
    let table = parse_nfl_team_stats(Season::new(2023), TEAM_STATS_CSV).unwrap();
    // key columns never appear among stats or texts
    assert_eq!(table.stat_names, vec!["passing_yards", "sacks"]);
    // "coach" fails numeric parsing on every row, so it lands in texts
    assert_eq!(table.text_names, vec!["coach"]);
}

#[test]
fn test_team_stats_rows() {
    let table = parse_nfl_team_stats(Season::new(2023), TEAM_STATS_CSV).unwrap();
    assert_eq!(table.rows.len(), 3);

    let first = &table.rows[0];
    assert_eq!(first.season, Season::new(2023));
    assert_eq!(first.week, Week::new(1));
    assert_eq!(first.team, "KC");
    assert!(first.game_id.is_none());
    assert_eq!(first.values, vec![Some(226.0), Some(1.0)]);
    assert_eq!(first.texts, vec![Some("Andy Reid".to_string())]);

    // literal "NA" parses as missing, not as text
    assert_eq!(table.rows[2].values, vec![None, Some(2.0)]);
}

#[test]
fn test_team_stats_missing_key_column() {
    let err = parse_nfl_team_stats(Season::new(2023), "season,team\n2023,KC\n").unwrap_err();
    assert!(matches!(err, WinsightError::MissingColumn { ref name } if name == "week"));
}

const GAMES_CSV: &str = "\
game_id,season,week,home_team,away_team,result
2022_01_BUF_LA,2022,1,LA,BUF,-21
2023_01_DET_KC,2023,1,KC,DET,-1
2023_01_ARI_WAS,2023,1,WAS,ARI,4
2024_01_BAL_KC,2024,1,KC,BAL,
";

#[test]
fn test_games_filtered_by_season() {
    let games = parse_nfl_games(GAMES_CSV, &[Season::new(2023)]).unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].game_id, "2023_01_DET_KC");
    assert_eq!(games[0].home_team, "KC");
    assert_eq!(games[0].away_team, "DET");
    assert_eq!(games[0].result, Some(-1.0));
    assert_eq!(games[1].result, Some(4.0));
}

#[test]
fn test_games_unplayed_result_is_missing() {
    let games = parse_nfl_games(GAMES_CSV, &[Season::new(2024)]).unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].result, None);
}

#[test]
fn test_games_multiple_seasons() {
    let games = parse_nfl_games(GAMES_CSV, &[Season::new(2022), Season::new(2023)]).unwrap();
    assert_eq!(games.len(), 3);
}

#[test]
fn test_csv_number_sentinels() {
    assert_eq!(parse_csv_number(""), None);
    assert_eq!(parse_csv_number("NA"), None);
    assert_eq!(parse_csv_number("3.5"), Some(3.5));
    assert_eq!(parse_csv_number("-21"), Some(-21.0));
}
