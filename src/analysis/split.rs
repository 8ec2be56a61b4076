//! Reproducible train/test assignment.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Row indices assigned to the two splits. Together they cover every row
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    pub fn total(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

/// Assign each row to train with probability `train_fraction`, walking rows
/// in order with a seeded generator, so a fixed seed reproduces the split
/// exactly across runs.
pub fn train_test_split(n_rows: usize, train_fraction: f64, seed: u64) -> Split {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity((n_rows as f64 * train_fraction) as usize);
    let mut test = Vec::new();
    for row in 0..n_rows {
        if rng.gen::<f64>() < train_fraction {
            train.push(row);
        } else {
            test.push(row);
        }
    }
    Split { train, test }
}
