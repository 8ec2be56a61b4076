//! Unit tests for the analysis table.

use super::*;

fn sample_frame() -> Frame {
    let mut frame = Frame::new();
    frame
        .push(Column::numeric(
            "pts",
            ColumnRole::Numeric,
            vec![Some(21.0), Some(14.0), None, Some(0.0)],
        ))
        .unwrap();
    frame
        .push(Column::numeric(
            "zeros",
            ColumnRole::Numeric,
            vec![Some(0.0), Some(0.0), None, Some(0.0)],
        ))
        .unwrap();
    frame
        .push(Column::category(
            "team",
            vec![
                Some("KC".to_string()),
                Some("DET".to_string()),
                Some("KC".to_string()),
                None,
            ],
        ))
        .unwrap();
    frame
}

#[test]
fn test_push_rejects_ragged_columns() {
    let mut frame = sample_frame();
    let err = frame.push(Column::numeric(
        "short",
        ColumnRole::Numeric,
        vec![Some(1.0)],
    ));
    assert!(err.is_err());
}

#[test]
fn test_categorical_encoding_is_first_occurrence_order() {
    let frame = sample_frame();
    let team = frame.column("team").unwrap();
    match &team.data {
        ColumnData::Category { levels, codes } => {
            assert_eq!(levels, &["KC".to_string(), "DET".to_string()]);
            assert_eq!(codes, &[Some(0), Some(1), Some(0), None]);
        }
        _ => panic!("expected categorical column"),
    }
    assert_eq!(team.level_at(2), Some("KC"));
    assert_eq!(team.level_at(3), None);
}

#[test]
fn test_na_and_zero_fractions() {
    let frame = sample_frame();
    let pts = frame.column("pts").unwrap();
    assert!((pts.na_fraction() - 0.25).abs() < 1e-12);
    // one zero among three present values
    assert!((pts.zero_fraction() - 1.0 / 3.0).abs() < 1e-12);

    let zeros = frame.column("zeros").unwrap();
    assert!(zeros.is_all_zero());
    assert!(!pts.is_all_zero());
}

#[test]
fn test_retain_rows_keeps_selected() {
    let frame = sample_frame();
    let filtered = frame.retain_rows(&[true, false, true, false]);
    assert_eq!(filtered.nrows(), 2);
    assert_eq!(
        filtered.numeric("pts").unwrap(),
        &[Some(21.0), None]
    );
    assert_eq!(filtered.column("team").unwrap().level_at(1), Some("KC"));
}

#[test]
fn test_drop_columns() {
    let frame = sample_frame();
    let trimmed = frame.drop_columns(&["zeros".to_string()]);
    assert_eq!(trimmed.ncols(), 2);
    assert!(trimmed.column("zeros").is_none());
    assert_eq!(trimmed.nrows(), frame.nrows());
}

#[test]
fn test_names_with_role() {
    let frame = sample_frame();
    assert_eq!(
        frame.names_with_role(ColumnRole::Numeric),
        vec!["pts".to_string(), "zeros".to_string()]
    );
    assert!(frame.names_with_role(ColumnRole::Outcome).is_empty());
}
