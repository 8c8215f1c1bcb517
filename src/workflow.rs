use std::collections::HashMap;

use crate::config::PipelineConfig;
use crate::dataset::record::{Dataset, IdColumn, RowId};
use crate::error::{PipelineError, Result};
use crate::features::{FeatureMatrix, FeaturePipeline};
use crate::model::{
    matrix::DenseMatrix,
    metrics::{accuracy, log_loss},
    split::holdout_indices,
    Classifier, GradientBoosting, ModelBundle,
};

#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutMetrics {
    pub rows: usize,
    pub log_loss: f64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub rows: usize,
    pub stumps: usize,
    pub holdout: Option<HoldoutMetrics>,
}

/// Build the assembled feature matrix for a dataset.
pub fn build_features(config: &PipelineConfig, dataset: &Dataset) -> Result<FeatureMatrix> {
    FeaturePipeline::from_settings(&config.features)?.build(dataset)
}

/// Labels in matrix row order, looked up by join key.
pub fn labels_for(matrix: &FeatureMatrix, dataset: &Dataset) -> Result<Vec<bool>> {
    let by_id: HashMap<RowId, Option<bool>> = dataset.pairs.iter().map(|p| (p.id, p.label)).collect();
    matrix
        .ids()
        .map(|id| match by_id.get(&id) {
            Some(Some(label)) => Ok(*label),
            Some(None) => Err(PipelineError::schema(format!("row {id} has no is_duplicate label"))),
            None => Err(PipelineError::schema(format!("row {id} is not in the labeled dataset"))),
        })
        .collect()
}

/// Fit the classifier on a labeled dataset. With a holdout fraction set, a
/// seeded share of rows is scored first by a model fitted on the rest; the
/// returned model is always fitted on every row.
pub fn train(config: &PipelineConfig, dataset: &Dataset) -> Result<(ModelBundle, TrainReport)> {
    config.validate()?;
    if dataset.is_empty() {
        return Err(PipelineError::EmptyTrainingSet);
    }
    if dataset.id_column != IdColumn::Id {
        tracing::warn!("training data is keyed by `{}`, expected `id`", dataset.id_column.name());
    }
    let pipeline = FeaturePipeline::from_settings(&config.features)?;
    let matrix = pipeline.build(dataset)?;
    let labels = labels_for(&matrix, dataset)?;
    let dense = DenseMatrix::from_features(&matrix);
    let classifier = GradientBoosting::new(config.boosting);

    let holdout = if config.holdout_fraction > 0.0 {
        evaluate_holdout(&classifier, &dense, &labels, config)?
    } else {
        None
    };

    let model = classifier.fit(&dense, &labels)?;
    let report = TrainReport {
        rows: dense.n_rows(),
        stumps: model.stumps.len(),
        holdout,
    };
    Ok((ModelBundle::new(config.features.clone(), matrix.schema, model), report))
}

fn evaluate_holdout(
    classifier: &GradientBoosting,
    dense: &DenseMatrix,
    labels: &[bool],
    config: &PipelineConfig,
) -> Result<Option<HoldoutMetrics>> {
    let (train_idx, holdout_idx) = holdout_indices(dense.n_rows(), config.holdout_fraction, config.seed);
    if train_idx.is_empty() || holdout_idx.is_empty() {
        tracing::warn!("holdout split left one side empty, skipping evaluation");
        return Ok(None);
    }
    let pick = |idx: &[usize]| idx.iter().map(|&i| labels[i]).collect::<Vec<bool>>();
    let model = classifier.fit(&dense.select_rows(&train_idx), &pick(&train_idx))?;
    let holdout_labels = pick(&holdout_idx);
    let probabilities = classifier.predict(&model, &dense.select_rows(&holdout_idx))?;
    let metrics = HoldoutMetrics {
        rows: holdout_idx.len(),
        log_loss: log_loss(&holdout_labels, &probabilities),
        accuracy: accuracy(&holdout_labels, &probabilities),
    };
    tracing::info!(
        "holdout ({} rows): log loss {:.5}, accuracy {:.4}",
        metrics.rows,
        metrics.log_loss,
        metrics.accuracy
    );
    Ok(Some(metrics))
}

/// Score an inference dataset. Features are rebuilt with the settings the
/// model was trained with, and the column set must match the stored schema.
pub fn predict(bundle: &ModelBundle, dataset: &Dataset) -> Result<Vec<(RowId, f64)>> {
    if dataset.id_column != IdColumn::TestId {
        tracing::warn!("inference data is keyed by `{}`, expected `test_id`", dataset.id_column.name());
    }
    let pipeline = bundle.pipeline()?;
    let matrix = pipeline.build(dataset)?;
    bundle.schema.ensure_matches(&matrix.schema)?;
    let dense = DenseMatrix::from_features(&matrix);
    let probabilities = GradientBoosting::default().predict(&bundle.model, &dense)?;
    Ok(matrix.ids().zip(probabilities).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::QuestionPair;
    use crate::model::BoostingParams;

    fn training_set() -> Dataset {
        let mut pairs = Vec::new();
        for i in 0..60u64 {
            let pair = if i % 2 == 0 {
                QuestionPair::labeled(i, format!("How do I learn python topic{i}"), format!("Best way to learn python topic{i}"), true)
            } else {
                QuestionPair::labeled(i, format!("Why is the sky blue {i}"), format!("Which laptop should I buy for gaming {i}"), false)
            };
            pairs.push(pair);
        }
        Dataset::new(IdColumn::Id, pairs)
    }

    fn config() -> PipelineConfig {
        PipelineConfig {
            boosting: BoostingParams { rounds: 30, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn train_then_predict() {
        let (bundle, report) = train(&config(), &training_set()).unwrap();
        assert_eq!(report.rows, 60);
        assert!(report.holdout.is_none());

        let test = Dataset::new(
            IdColumn::TestId,
            vec![
                QuestionPair::new(100, "How do I learn python topic8", "Best way to learn python topic8"),
                QuestionPair::new(101, "Why is the sky blue 9", "Which laptop should I buy for gaming 9"),
            ],
        );
        let predictions = predict(&bundle, &test).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].0, 100);
        assert!(predictions.iter().all(|(_, p)| (0.0..=1.0).contains(p)));
        assert!(predictions[0].1 > 0.5);
        assert!(predictions[1].1 < 0.5);
    }

    #[test]
    fn holdout_is_reported() {
        let config = PipelineConfig { holdout_fraction: 0.25, ..config() };
        let (_, report) = train(&config, &training_set()).unwrap();
        let holdout = report.holdout.unwrap();
        assert_eq!(holdout.rows, 15);
        assert!(holdout.accuracy > 0.9);
    }

    #[test]
    fn unlabeled_rows_cannot_train() {
        let mut ds = training_set();
        ds.pairs[3].label = None;
        assert!(matches!(train(&config(), &ds), Err(PipelineError::SchemaMismatch { .. })));
        assert!(matches!(
            train(&config(), &Dataset::new(IdColumn::Id, vec![])),
            Err(PipelineError::EmptyTrainingSet)
        ));
    }
}
