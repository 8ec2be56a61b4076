//! Per-game test-set prediction export.
//!
//! One CSV row per held-out game: game context, predicted vs. actual
//! outcome, both class probabilities, the predictor values the model saw,
//! and the model's overall test accuracy. The filename carries the run
//! date, so repeated runs on the same day overwrite each other.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::analysis::model::HeldOutModel;
use crate::error::Result;
use crate::table::Frame;

/// Identifier columns copied into the export when the table has them.
const CONTEXT_COLUMNS: &[&str] = &["team", "game_date", "game_id", "season"];

fn context_cell(frame: &Frame, name: &str, row: usize) -> String {
    let Some(column) = frame.column(name) else {
        return String::new();
    };
    if let Some(level) = column.level_at(row) {
        return level.to_string();
    }
    column
        .as_number()
        .and_then(|values| values[row])
        .map(|v| format!("{v}"))
        .unwrap_or_default()
}

/// Write the held-out predictions to `test_results_{YYYYMMDD}.csv` in
/// `out_dir`, returning the file path.
pub fn write_test_results(
    frame: &Frame,
    model: &HeldOutModel,
    predictors: &[String],
    out_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("test_results_{}.csv", Local::now().format("%Y%m%d")));
    let mut writer = csv::Writer::from_path(&path)?;

    let context: Vec<&str> = CONTEXT_COLUMNS
        .iter()
        .copied()
        .filter(|name| frame.column(name).is_some())
        .collect();
    let predictor_views: Vec<&[Option<f64>]> = predictors
        .iter()
        .map(|p| frame.numeric(p))
        .collect::<Result<_>>()?;

    let mut header: Vec<String> = context.iter().map(|c| c.to_uppercase()).collect();
    header.extend(
        [
            "PREDICTED_OUTCOME",
            "ACTUAL_OUTCOME",
            "CORRECT_PREDICTION",
            "WIN_PROBABILITY",
            "LOSS_PROBABILITY",
        ]
        .map(String::from),
    );
    header.extend(predictors.iter().cloned());
    header.push("MODEL_TEST_ACC".to_string());
    writer.write_record(&header)?;

    let outcome = |win: bool| if win { "W" } else { "L" };
    for prediction in &model.predictions {
        let mut record: Vec<String> = context
            .iter()
            .map(|name| context_cell(frame, name, prediction.row))
            .collect();
        record.push(outcome(prediction.predicted_win).to_string());
        record.push(outcome(prediction.actual_win).to_string());
        record.push(prediction.is_correct().to_string());
        record.push(format!("{:.6}", prediction.win_probability));
        record.push(format!("{:.6}", 1.0 - prediction.win_probability));
        for view in &predictor_views {
            record.push(
                view[prediction.row]
                    .map(|v| format!("{v}"))
                    .unwrap_or_default(),
            );
        }
        record.push(format!("{:.6}", model.accuracy));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{ConfusionMatrix, LogisticFit, TestPrediction};
    use crate::table::{Column, ColumnRole};

    fn sample_frame() -> Frame {
        let mut frame = Frame::new();
        let mut team = Column::category(
            "team",
            vec![
                Some("LAL".to_string()),
                Some("BOS".to_string()),
                Some("LAL".to_string()),
            ],
        );
        team.role = ColumnRole::Identifier;
        frame.push(team).unwrap();
        frame
            .push(Column::numeric(
                "season",
                ColumnRole::Identifier,
                vec![Some(2023.0), Some(2023.0), Some(2023.0)],
            ))
            .unwrap();
        frame
            .push(Column::numeric(
                "margin",
                ColumnRole::Numeric,
                vec![Some(4.0), Some(-4.0), Some(2.0)],
            ))
            .unwrap();
        frame
    }

    fn sample_model() -> HeldOutModel {
        HeldOutModel {
            fit: LogisticFit {
                terms: vec!["(intercept)".to_string(), "margin".to_string()],
                coefficients: vec![0.0, 1.0],
                converged: true,
                iterations: 5,
                pseudo_r_squared: 0.6,
                importance: vec![("margin".to_string(), 1.0)],
            },
            confusion: ConfusionMatrix {
                true_positive: 1,
                true_negative: 0,
                false_positive: 1,
                false_negative: 0,
            },
            accuracy: 0.5,
            train_rows: 1,
            test_rows: 2,
            predictions: vec![
                TestPrediction {
                    row: 0,
                    actual_win: true,
                    predicted_win: true,
                    win_probability: 0.88,
                },
                TestPrediction {
                    row: 1,
                    actual_win: false,
                    predicted_win: true,
                    win_probability: 0.61,
                },
            ],
        }
    }

    #[test]
    fn test_export_writes_one_row_per_test_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_results(
            &sample_frame(),
            &sample_model(),
            &["margin".to_string()],
            dir.path(),
        )
        .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("test_results_"));
        assert!(name.ends_with(".csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(
            header,
            vec![
                "TEAM",
                "SEASON",
                "PREDICTED_OUTCOME",
                "ACTUAL_OUTCOME",
                "CORRECT_PREDICTION",
                "WIN_PROBABILITY",
                "LOSS_PROBABILITY",
                "margin",
                "MODEL_TEST_ACC",
            ]
        );

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);

        // LAL's game 0: correct home win at p = 0.88
        assert_eq!(rows[0].get(0), Some("LAL"));
        assert_eq!(rows[0].get(2), Some("W"));
        assert_eq!(rows[0].get(3), Some("W"));
        assert_eq!(rows[0].get(4), Some("true"));
        assert_eq!(rows[0].get(5), Some("0.880000"));
        assert_eq!(rows[0].get(6), Some("0.120000"));
        assert_eq!(rows[0].get(7), Some("4"));

        // BOS's game 1: predicted win, actual loss
        assert_eq!(rows[1].get(2), Some("W"));
        assert_eq!(rows[1].get(3), Some("L"));
        assert_eq!(rows[1].get(4), Some("false"));
        assert_eq!(rows[1].get(8), Some("0.500000"));
    }

    #[test]
    fn test_export_to_unwritable_path_is_an_error() {
        let result = write_test_results(
            &sample_frame(),
            &sample_model(),
            &[],
            Path::new("/proc/no-such-dir"),
        );
        assert!(result.is_err());
    }
}
