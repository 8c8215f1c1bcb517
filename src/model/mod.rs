pub mod boosting;
pub mod matrix;
pub mod metrics;
pub mod split;
pub mod store;

use crate::error::Result;
use matrix::DenseMatrix;

/// Trainable binary classifier over a dense feature matrix.
///
/// The feature pipeline only depends on this boundary. An implementation
/// documents whether it accepts NaN inputs; if it does not, assemble features
/// with an imputing `MissingSimilarity` policy.
pub trait Classifier {
    type Model;

    fn fit(&self, features: &DenseMatrix, labels: &[bool]) -> Result<Self::Model>;

    /// Probability of the positive class per row, each in [0, 1].
    fn predict(&self, model: &Self::Model, features: &DenseMatrix) -> Result<Vec<f64>>;
}

pub use boosting::{BoostedStumps, BoostingParams, GradientBoosting};
pub use store::ModelBundle;
