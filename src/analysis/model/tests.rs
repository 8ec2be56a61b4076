//! Unit tests for the regression models.

use super::*;
use crate::table::{Column, ColumnRole};

fn frame_of(columns: Vec<(&str, ColumnRole, Vec<Option<f64>>)>) -> Frame {
    let mut frame = Frame::new();
    for (name, role, values) in columns {
        frame.push(Column::numeric(name, role, values)).unwrap();
    }
    frame
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_complete_rows_filters_missing() {
    let frame = frame_of(vec![
        ("y", ColumnRole::Outcome, vec![Some(1.0), Some(0.0), Some(1.0)]),
        ("a", ColumnRole::Numeric, vec![Some(2.0), None, Some(4.0)]),
    ]);
    let rows = complete_rows(&frame, &names(&["y", "a"])).unwrap();
    assert_eq!(rows, vec![0, 2]);
}

#[test]
fn test_linear_fit_recovers_exact_relationship() {
    // y = 2 + 3a, no noise
    let a: Vec<Option<f64>> = (0..20).map(|i| Some(i as f64)).collect();
    let y: Vec<Option<f64>> = (0..20).map(|i| Some(2.0 + 3.0 * i as f64)).collect();
    let frame = frame_of(vec![
        ("y", ColumnRole::Outcome, y),
        ("a", ColumnRole::Numeric, a),
    ]);

    let fit = fit_linear(&frame, "y", &names(&["a"])).unwrap();
    assert!((fit.coefficients[0] - 2.0).abs() < 1e-6, "intercept");
    assert!((fit.coefficients[1] - 3.0).abs() < 1e-6, "slope");
    assert!((fit.r_squared - 1.0).abs() < 1e-9);
    assert!(!fit.is_rank_deficient());
    assert_eq!(fit.n_obs, 20);
}

#[test]
fn test_linear_fit_survives_collinear_predictors() {
    // b is exactly 2a; the design matrix is rank deficient
    let a: Vec<Option<f64>> = (0..30).map(|i| Some(i as f64)).collect();
    let b: Vec<Option<f64>> = (0..30).map(|i| Some(2.0 * i as f64)).collect();
    let y: Vec<Option<f64>> = (0..30).map(|i| Some(1.0 + i as f64)).collect();
    let frame = frame_of(vec![
        ("y", ColumnRole::Outcome, y),
        ("a", ColumnRole::Numeric, a),
        ("b", ColumnRole::Numeric, b),
    ]);

    let fit = fit_linear(&frame, "y", &names(&["a", "b"])).unwrap();
    assert!(fit.is_rank_deficient());
    assert_eq!(fit.n_params, 3);
    // the minimum-norm solution still reproduces y perfectly
    assert!((fit.r_squared - 1.0).abs() < 1e-9);
}

#[test]
fn test_linear_fit_needs_enough_rows() {
    let frame = frame_of(vec![
        ("y", ColumnRole::Outcome, vec![Some(1.0)]),
        ("a", ColumnRole::Numeric, vec![Some(2.0)]),
    ]);
    assert!(fit_linear(&frame, "y", &names(&["a"])).is_err());
}

#[test]
fn test_logistic_separates_clean_signal() {
    // win iff margin is positive; 200 rows alternating
    let margin: Vec<Option<f64>> = (0..200)
        .map(|i| Some(if i % 2 == 0 { 5.0 } else { -5.0 } + (i % 7) as f64 * 0.1))
        .collect();
    let win: Vec<Option<f64>> = margin
        .iter()
        .map(|m| Some(if m.unwrap() > 0.0 { 1.0 } else { 0.0 }))
        .collect();
    let frame = frame_of(vec![
        ("win", ColumnRole::Outcome, win),
        ("margin", ColumnRole::Numeric, margin),
    ]);

    let model =
        fit_held_out_logistic(&frame, "win", &names(&["margin"]), 0.7, 42).unwrap();
    assert_eq!(model.train_rows + model.test_rows, 200);
    assert_eq!(model.confusion.total(), model.test_rows);
    assert!(model.accuracy > 0.95, "accuracy was {}", model.accuracy);
    assert!(model.fit.pseudo_r_squared > 0.5);
    assert!(model.accuracy <= 1.0);
}

#[test]
fn test_logistic_importance_ranks_informative_predictor_first() {
    let signal: Vec<Option<f64>> = (0..120).map(|i| Some(if i % 2 == 0 { 1.0 } else { -1.0 })).collect();
    let noise: Vec<Option<f64>> = (0..120).map(|i| Some(((i * 37) % 11) as f64 * 0.01)).collect();
    let win: Vec<Option<f64>> = (0..120).map(|i| Some(if i % 2 == 0 { 1.0 } else { 0.0 })).collect();
    let frame = frame_of(vec![
        ("win", ColumnRole::Outcome, win),
        ("noise", ColumnRole::Numeric, noise),
        ("signal", ColumnRole::Numeric, signal),
    ]);

    let model =
        fit_held_out_logistic(&frame, "win", &names(&["noise", "signal"]), 0.7, 7).unwrap();
    assert_eq!(model.fit.importance[0].0, "signal");
}

#[test]
fn test_logistic_same_seed_reproduces_split_and_fit() {
    let x: Vec<Option<f64>> = (0..100).map(|i| Some((i % 13) as f64 - 6.0)).collect();
    let win: Vec<Option<f64>> = x
        .iter()
        .map(|v| Some(if v.unwrap() > 0.0 { 1.0 } else { 0.0 }))
        .collect();
    let frame = frame_of(vec![
        ("win", ColumnRole::Outcome, win),
        ("x", ColumnRole::Numeric, x),
    ]);

    let a = fit_held_out_logistic(&frame, "win", &names(&["x"]), 0.7, 99).unwrap();
    let b = fit_held_out_logistic(&frame, "win", &names(&["x"]), 0.7, 99).unwrap();
    assert_eq!(a.train_rows, b.train_rows);
    assert_eq!(a.confusion, b.confusion);
    assert_eq!(a.fit.coefficients, b.fit.coefficients);
}

#[test]
fn test_per_game_predictions_match_the_confusion_matrix() {
    let margin: Vec<Option<f64>> = (0..100)
        .map(|i| Some(if i % 2 == 0 { 4.0 } else { -4.0 }))
        .collect();
    let win: Vec<Option<f64>> = margin
        .iter()
        .map(|m| Some(if m.unwrap() > 0.0 { 1.0 } else { 0.0 }))
        .collect();
    let frame = frame_of(vec![
        ("win", ColumnRole::Outcome, win),
        ("margin", ColumnRole::Numeric, margin),
    ]);

    let model = fit_held_out_logistic(&frame, "win", &names(&["margin"]), 0.7, 42).unwrap();
    assert_eq!(model.predictions.len(), model.test_rows);

    let correct = model.predictions.iter().filter(|p| p.is_correct()).count();
    assert_eq!(correct, model.confusion.correct());
    for p in &model.predictions {
        assert!(p.row < 100);
        assert!((0.0..=1.0).contains(&p.win_probability));
        assert_eq!(p.predicted_win, p.win_probability >= CLASS_THRESHOLD);
    }
}

#[test]
fn test_confusion_matrix_accuracy() {
    let cm = ConfusionMatrix {
        true_positive: 40,
        true_negative: 35,
        false_positive: 15,
        false_negative: 10,
    };
    assert_eq!(cm.total(), 100);
    assert_eq!(cm.correct(), 75);
    assert!((cm.accuracy() - 0.75).abs() < 1e-12);

    let empty = ConfusionMatrix::default();
    assert_eq!(empty.accuracy(), 0.0);
}

#[test]
fn test_sigmoid_bounds() {
    assert!(sigmoid(40.0) > 0.999);
    assert!(sigmoid(-40.0) < 0.001);
    assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
}
