use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::features::pipeline::FeatureSettings;
use crate::model::boosting::BoostingParams;

/// Run configuration. Every field has a default, so a TOML file only needs
/// the keys it changes:
///
/// ```toml
/// holdout_fraction = 0.1
///
/// [features]
/// keywords = ["life", "money", "trump", "google"]
///
/// [features.missing_similarity]
/// strategy = "impute"
/// value = 0.0
///
/// [boosting]
/// rounds = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub features: FeatureSettings,
    pub boosting: BoostingParams,
    /// share of training rows held out for evaluation before the final fit;
    /// 0 skips evaluation
    pub holdout_fraction: f64,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            features: FeatureSettings::default(),
            boosting: BoostingParams::default(),
            holdout_fraction: 0.0,
            seed: 42,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.holdout_fraction) {
            return Err(PipelineError::Config(format!(
                "holdout_fraction must be in [0, 1), got {}",
                self.holdout_fraction
            )));
        }
        let b = &self.boosting;
        if !(b.learning_rate > 0.0) || b.l2 < 0.0 || b.min_child_weight < 0.0 {
            return Err(PipelineError::Config(format!("invalid boosting parameters {b:?}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::assembler::MissingSimilarity;
    use crate::text::stopwords::StopWordConfig;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn partial_overrides() {
        let config = PipelineConfig::from_toml_str(
            r#"
            holdout_fraction = 0.25

            [features]
            keywords = ["google"]

            [features.stopwords]
            kind = "custom"
            words = ["the", "a"]

            [features.missing_similarity]
            strategy = "keep"

            [boosting]
            rounds = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.holdout_fraction, 0.25);
        assert_eq!(config.features.keywords, vec!["google"]);
        assert_eq!(
            config.features.stopwords,
            StopWordConfig::Custom(vec!["the".into(), "a".into()])
        );
        assert_eq!(config.features.missing_similarity, MissingSimilarity::Keep);
        assert_eq!(config.boosting.rounds, 10);
        assert_eq!(config.boosting.learning_rate, BoostingParams::default().learning_rate);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn impute_value_is_configurable() {
        let config = PipelineConfig::from_toml_str(
            "[features.missing_similarity]\nstrategy = \"impute\"\nvalue = 0.0\n",
        )
        .unwrap();
        assert_eq!(
            config.features.missing_similarity,
            MissingSimilarity::Impute { value: 0.0 }
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(PipelineConfig::from_toml_str("holdout_fraction = 1.5").is_err());
        assert!(PipelineConfig::from_toml_str("[boosting]\nlearning_rate = 0.0").is_err());
        assert!(PipelineConfig::from_toml_str("seed = \"x\"").is_err());
    }
}
