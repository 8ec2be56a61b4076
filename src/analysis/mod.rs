//! Statistical analysis: correlations, the train/test split, and the
//! regression models.

pub mod correlation;
pub mod model;
pub mod split;

pub use correlation::{
    correlation_matrix, pearson, rank_against_outcome, CorrelationMatrix, CorrelationRanking,
};
pub use model::{
    complete_rows, fit_held_out_logistic, fit_linear, ConfusionMatrix, HeldOutModel, LinearFit,
    LogisticFit, TestPrediction,
};
pub use split::{train_test_split, Split};
