//! Chart rendering: clustered correlation heatmap and the signed
//! correlation bar chart, both PNG files.
//!
//! Output-only; nothing flows back into the pipeline. A rendering failure
//! (unwritable path, for instance) is fatal for the run.

use std::path::Path;

use plotters::prelude::*;

use crate::analysis::correlation::{CorrelationMatrix, CorrelationRanking};
use crate::error::{Result, WinsightError};

fn render_err(e: impl std::fmt::Display) -> WinsightError {
    WinsightError::Render {
        message: e.to_string(),
    }
}

/// Diverging scale centered at zero: red for negative, blue for positive,
/// white at no correlation.
fn diverging_color(r: f64) -> RGBColor {
    let t = r.clamp(-1.0, 1.0);
    let blend = |from: (u8, u8, u8), to: (u8, u8, u8), f: f64| {
        let ch = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * f) as u8;
        RGBColor(ch(from.0, to.0), ch(from.1, to.1), ch(from.2, to.2))
    };
    let white = (255, 255, 255);
    let blue = (0x43, 0x93, 0xc3);
    let red = (0xd6, 0x60, 0x4d);
    if t >= 0.0 {
        blend(white, blue, t)
    } else {
        blend(white, red, -t)
    }
}

/// Leaf order from average-linkage agglomerative clustering on the distance
/// 1 − |r|, so strongly related statistics end up adjacent in the heatmap.
pub fn cluster_order(matrix: &CorrelationMatrix) -> Vec<usize> {
    let k = matrix.names.len();
    if k <= 2 {
        return (0..k).collect();
    }

    let dist = |i: usize, j: usize| 1.0 - matrix.values[i][j].abs();
    let mut clusters: Vec<Vec<usize>> = (0..k).map(|i| vec![i]).collect();

    while clusters.len() > 1 {
        let mut best = (0, 1, f64::INFINITY);
        for a in 0..clusters.len() {
            for b in a + 1..clusters.len() {
                let mut total = 0.0;
                for &i in &clusters[a] {
                    for &j in &clusters[b] {
                        total += dist(i, j);
                    }
                }
                let avg = total / (clusters[a].len() * clusters[b].len()) as f64;
                if avg < best.2 {
                    best = (a, b, avg);
                }
            }
        }
        let merged = clusters.remove(best.1);
        clusters[best.0].extend(merged);
    }

    clusters.pop().unwrap_or_default()
}

/// Render the top-K-by-top-K correlation submatrix as a clustered heatmap.
pub fn render_heatmap(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    let order = cluster_order(matrix);
    let k = order.len();
    if k == 0 {
        return Err(WinsightError::Render {
            message: "no columns to draw".to_string(),
        });
    }

    let size = (1000u32, 900u32);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation heatmap (clustered)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(140)
        .y_label_area_size(140)
        .build_cartesian_2d(0.0..k as f64, 0.0..k as f64)
        .map_err(render_err)?;

    let names = &matrix.names;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(k)
        .y_labels(k)
        .x_label_formatter(&|x| {
            let i = *x as usize;
            if *x >= 0.0 && i < k && (x - i as f64) < 1e-9 {
                // label the cell center's column
                names[order[i.min(k - 1)]].clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|y| {
            let i = *y as usize;
            if *y >= 0.0 && i < k && (y - i as f64) < 1e-9 {
                names[order[i.min(k - 1)]].clone()
            } else {
                String::new()
            }
        })
        .x_label_style(("sans-serif", 10).into_font().transform(FontTransform::Rotate90))
        .y_label_style(("sans-serif", 10))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series((0..k).flat_map(|row| {
            let order = &order;
            (0..k).map(move |col| {
                let r = matrix.values[order[row]][order[col]];
                Rectangle::new(
                    [(col as f64, row as f64), (col as f64 + 1.0, row as f64 + 1.0)],
                    diverging_color(r).filled(),
                )
            })
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Render the signed correlation-with-outcome bar chart, strongest first
/// from the top, positive bars blue and negative red.
pub fn render_correlation_bars(
    ranking: &CorrelationRanking,
    top_k: usize,
    outcome_col: &str,
    path: &Path,
) -> Result<()> {
    let entries: Vec<&(String, f64)> = ranking.entries.iter().take(top_k).collect();
    let k = entries.len();
    if k == 0 {
        return Err(WinsightError::Render {
            message: "no correlations to draw".to_string(),
        });
    }

    let span = entries
        .iter()
        .map(|(_, r)| r.abs())
        .fold(0.0f64, f64::max)
        .max(0.05);
    let height = (60 + 28 * k as u32).max(300);
    let root = BitMapBackend::new(path, (1000, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let caption = format!("Correlation with {outcome_col}");
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(220)
        .build_cartesian_2d(-span * 1.15..span * 1.15, 0.0..k as f64)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(k)
        .y_label_formatter(&|y| {
            let i = *y as usize;
            if *y >= 0.0 && i < k && (y - i as f64) < 1e-9 {
                // strongest at the top
                entries[k - 1 - i].0.clone()
            } else {
                String::new()
            }
        })
        .y_label_style(("sans-serif", 11))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(entries.iter().enumerate().map(|(i, (_, r))| {
            let y = (k - 1 - i) as f64;
            let color = if *r >= 0.0 {
                RGBColor(0x43, 0x93, 0xc3)
            } else {
                RGBColor(0xd6, 0x60, 0x4d)
            };
            Rectangle::new([(0.0, y + 0.15), (*r, y + 0.85)], color.filled())
        }))
        .map_err(render_err)?;

    chart
        .draw_series(entries.iter().enumerate().map(|(i, (_, r))| {
            let y = (k - 1 - i) as f64 + 0.5;
            Text::new(format!("{r:.3}"), (*r, y), ("sans-serif", 11).into_font())
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(names: &[&str], values: Vec<Vec<f64>>) -> CorrelationMatrix {
        CorrelationMatrix {
            names: names.iter().map(|s| s.to_string()).collect(),
            values,
        }
    }

    #[test]
    fn test_diverging_color_endpoints() {
        assert_eq!(diverging_color(0.0), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(1.0), RGBColor(0x43, 0x93, 0xc3));
        assert_eq!(diverging_color(-1.0), RGBColor(0xd6, 0x60, 0x4d));
    }

    #[test]
    fn test_cluster_order_groups_correlated_pairs() {
        // a and c are near-duplicates; b is unrelated
        let m = matrix(
            &["a", "b", "c"],
            vec![
                vec![1.0, 0.05, 0.98],
                vec![0.05, 1.0, 0.02],
                vec![0.98, 0.02, 1.0],
            ],
        );
        let order = cluster_order(&m);
        assert_eq!(order.len(), 3);
        let pos = |i: usize| order.iter().position(|&o| o == i).unwrap();
        assert_eq!(pos(0).abs_diff(pos(2)), 1, "a and c should be adjacent");
    }

    #[test]
    fn test_cluster_order_is_permutation() {
        let m = matrix(
            &["a", "b", "c", "d"],
            vec![
                vec![1.0, 0.6, 0.1, 0.2],
                vec![0.6, 1.0, 0.3, 0.1],
                vec![0.1, 0.3, 1.0, 0.9],
                vec![0.2, 0.1, 0.9, 1.0],
            ],
        );
        let mut order = cluster_order(&m);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_render_to_unwritable_path_is_fatal() {
        let m = matrix(&["a", "b"], vec![vec![1.0, 0.4], vec![0.4, 1.0]]);
        let result = render_heatmap(&m, Path::new("/nonexistent-dir/heatmap.png"));
        assert!(matches!(result, Err(WinsightError::Render { .. })));
    }

    #[test]
    fn test_render_charts_to_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let m = matrix(
            &["a", "b", "c"],
            vec![
                vec![1.0, -0.4, 0.7],
                vec![-0.4, 1.0, 0.0],
                vec![0.7, 0.0, 1.0],
            ],
        );
        let heatmap = dir.path().join("heatmap.png");
        render_heatmap(&m, &heatmap).unwrap();
        assert!(heatmap.exists());

        let ranking = CorrelationRanking {
            entries: vec![
                ("a".to_string(), 0.7),
                ("b".to_string(), -0.4),
                ("c".to_string(), 0.1),
            ],
        };
        let bars = dir.path().join("bars.png");
        render_correlation_bars(&ranking, 30, "win", &bars).unwrap();
        assert!(bars.exists());
    }
}
