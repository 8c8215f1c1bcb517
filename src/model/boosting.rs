use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::model::{matrix::DenseMatrix, metrics::sigmoid, Classifier};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingParams {
    /// upper bound on boosting rounds; training stops early when no split helps
    pub rounds: usize,
    pub learning_rate: f64,
    /// L2 penalty on leaf weights
    pub l2: f64,
    /// minimum hessian sum on each side of a split
    pub min_child_weight: f64,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            rounds: 300,
            learning_rate: 0.1,
            l2: 1.0,
            min_child_weight: 1.0,
        }
    }
}

/// Depth-1 tree. Values `<= threshold` go left, NaN goes to the learned side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stump {
    pub feature: usize,
    pub threshold: f64,
    pub missing_left: bool,
    pub left: f64,
    pub right: f64,
}

impl Stump {
    #[inline]
    pub fn eval(&self, row: &[f64]) -> f64 {
        let value = row[self.feature];
        let go_left = if value.is_nan() {
            self.missing_left
        } else {
            value <= self.threshold
        };
        if go_left {
            self.left
        } else {
            self.right
        }
    }
}

/// Fitted additive model: `p = sigmoid(base_margin + Σ stump(x))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedStumps {
    pub base_margin: f64,
    pub n_features: usize,
    pub stumps: Vec<Stump>,
}

impl BoostedStumps {
    #[inline]
    pub fn margin(&self, row: &[f64]) -> f64 {
        self.base_margin + self.stumps.iter().map(|s| s.eval(row)).sum::<f64>()
    }

    pub fn predict_proba(&self, features: &DenseMatrix) -> Result<Vec<f64>> {
        if features.n_cols() != self.n_features {
            return Err(PipelineError::schema(format!(
                "model expects {} features, got {}",
                self.n_features,
                features.n_cols()
            )));
        }
        Ok((0..features.n_rows())
            .into_par_iter()
            .map(|idx| sigmoid(self.margin(features.row(idx))))
            .collect())
    }
}

/// Logistic-loss gradient boosting over stumps with second-order leaf
/// weights `-G / (H + l2)`, shrunk by the learning rate.
///
/// Missing values (NaN) are accepted: each split tries sending them left and
/// right and keeps the better side.
#[derive(Debug, Clone, Default)]
pub struct GradientBoosting {
    pub params: BoostingParams,
}

impl GradientBoosting {
    pub fn new(params: BoostingParams) -> Self {
        Self { params }
    }
}

/// Non-missing row indices sorted by value, plus the missing ones.
struct SortedColumn {
    order: Vec<u32>,
    missing: Vec<u32>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    missing_left: bool,
    grad_left: f64,
    hess_left: f64,
    grad_right: f64,
    hess_right: f64,
    gain: f64,
}

impl SplitCandidate {
    fn into_stump(self, params: &BoostingParams) -> Stump {
        Stump {
            feature: self.feature,
            threshold: self.threshold,
            missing_left: self.missing_left,
            left: leaf_weight(self.grad_left, self.hess_left, params),
            right: leaf_weight(self.grad_right, self.hess_right, params),
        }
    }
}

#[inline]
fn leaf_weight(grad: f64, hess: f64, params: &BoostingParams) -> f64 {
    -grad / (hess + params.l2) * params.learning_rate
}

#[inline]
fn leaf_score(grad: f64, hess: f64, l2: f64) -> f64 {
    grad * grad / (hess + l2)
}

fn presort(features: &DenseMatrix) -> Vec<SortedColumn> {
    (0..features.n_cols())
        .into_par_iter()
        .map(|col| {
            let (mut order, missing): (Vec<u32>, Vec<u32>) =
                (0..features.n_rows() as u32).partition(|&row| !features.get(row as usize, col).is_nan());
            order.sort_by(|&a, &b| {
                features
                    .get(a as usize, col)
                    .total_cmp(&features.get(b as usize, col))
            });
            SortedColumn { order, missing }
        })
        .collect()
}

fn best_split(
    feature: usize,
    column: &SortedColumn,
    features: &DenseMatrix,
    grad: &[f64],
    hess: &[f64],
    totals: (f64, f64),
    params: &BoostingParams,
) -> Option<SplitCandidate> {
    let (grad_total, hess_total) = totals;
    let (grad_missing, hess_missing) = column
        .missing
        .iter()
        .fold((0.0, 0.0), |(g, h), &row| (g + grad[row as usize], h + hess[row as usize]));
    let parent = leaf_score(grad_total, hess_total, params.l2);

    let mut best: Option<SplitCandidate> = None;
    let mut grad_prefix = 0.0;
    let mut hess_prefix = 0.0;
    for pos in 0..column.order.len().saturating_sub(1) {
        let row = column.order[pos] as usize;
        grad_prefix += grad[row];
        hess_prefix += hess[row];

        let value = features.get(row, feature);
        let next = features.get(column.order[pos + 1] as usize, feature);
        if next <= value {
            continue;
        }
        let mid = value + (next - value) / 2.0;
        let threshold = if mid < next { mid } else { value };

        for missing_left in [true, false] {
            let (grad_left, hess_left) = if missing_left {
                (grad_prefix + grad_missing, hess_prefix + hess_missing)
            } else {
                (grad_prefix, hess_prefix)
            };
            let (grad_right, hess_right) = (grad_total - grad_left, hess_total - hess_left);
            if hess_left < params.min_child_weight || hess_right < params.min_child_weight {
                continue;
            }
            let gain = leaf_score(grad_left, hess_left, params.l2)
                + leaf_score(grad_right, hess_right, params.l2)
                - parent;
            if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    missing_left,
                    grad_left,
                    hess_left,
                    grad_right,
                    hess_right,
                    gain,
                });
            }
        }
    }
    best
}

fn mean_log_loss(margins: &[f64], targets: &[f64]) -> f64 {
    let total: f64 = margins
        .par_iter()
        .zip(targets.par_iter())
        .map(|(&m, &t)| {
            let p = sigmoid(m).clamp(1e-15, 1.0 - 1e-15);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
        .sum();
    total / margins.len().max(1) as f64
}

impl Classifier for GradientBoosting {
    type Model = BoostedStumps;

    fn fit(&self, features: &DenseMatrix, labels: &[bool]) -> Result<BoostedStumps> {
        let n = features.n_rows();
        if labels.len() != n {
            return Err(PipelineError::schema(format!(
                "{} feature rows but {} labels",
                n,
                labels.len()
            )));
        }
        if n == 0 {
            return Err(PipelineError::EmptyTrainingSet);
        }
        let params = self.params;
        let targets: Vec<f64> = labels.iter().map(|&l| if l { 1.0 } else { 0.0 }).collect();
        let positive_rate = (targets.iter().sum::<f64>() / n as f64).clamp(1e-6, 1.0 - 1e-6);
        let base_margin = (positive_rate / (1.0 - positive_rate)).ln();

        let columns = presort(features);
        let mut margins = vec![base_margin; n];
        let mut grad = vec![0.0; n];
        let mut hess = vec![0.0; n];
        let mut stumps = Vec::with_capacity(params.rounds);

        for round in 0..params.rounds {
            grad.par_iter_mut()
                .zip(hess.par_iter_mut())
                .zip(margins.par_iter().zip(targets.par_iter()))
                .for_each(|((g, h), (&m, &t))| {
                    let p = sigmoid(m);
                    *g = p - t;
                    *h = (p * (1.0 - p)).max(1e-16);
                });
            let totals = (grad.iter().sum::<f64>(), hess.iter().sum::<f64>());

            let best = columns
                .par_iter()
                .enumerate()
                .filter_map(|(feature, column)| {
                    best_split(feature, column, features, &grad, &hess, totals, &params)
                })
                .reduce_with(|a, b| if b.gain > a.gain { b } else { a });
            let Some(split) = best else {
                tracing::debug!("no split improves the loss, stopping after {} rounds", round);
                break;
            };

            let stump = split.into_stump(&params);
            margins
                .par_iter_mut()
                .enumerate()
                .for_each(|(idx, m)| *m += stump.eval(features.row(idx)));
            stumps.push(stump);

            if (round + 1) % 50 == 0 {
                tracing::debug!("round {}: train log loss {:.5}", round + 1, mean_log_loss(&margins, &targets));
            }
        }

        tracing::info!(
            "fitted {} stumps on {} rows x {} features (train log loss {:.5})",
            stumps.len(),
            n,
            features.n_cols(),
            mean_log_loss(&margins, &targets)
        );
        Ok(BoostedStumps {
            base_margin,
            n_features: features.n_cols(),
            stumps,
        })
    }

    fn predict(&self, model: &BoostedStumps, features: &DenseMatrix) -> Result<Vec<f64>> {
        model.predict_proba(features)
    }
}
