use serde::{Deserialize, Serialize};

use crate::dataset::record::Dataset;
use crate::error::Result;
use crate::features::{
    assembler::{assemble, MissingSimilarity},
    keywords::KeywordDictionary,
    lexical::LexicalExtractor,
    row::{FeatureMatrix, FeatureSchema},
};
use crate::text::{
    normalizer::Normalizer,
    stopwords::{StopWordConfig, StopWords},
    tokenize_all,
};
use crate::vectorizer::batch::batch_cosine_similarity;

/// Everything that decides how features are computed. Persisted next to a
/// fitted model so inference rebuilds the exact training columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    pub stopwords: StopWordConfig,
    pub keywords: Vec<String>,
    pub missing_similarity: MissingSimilarity,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            stopwords: StopWordConfig::English,
            keywords: crate::features::keywords::DEFAULT_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            missing_similarity: MissingSimilarity::default(),
        }
    }
}

/// Tokenize -> similarity + lexical -> assemble, for a whole dataset.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    normalizer: Normalizer,
    lexical: LexicalExtractor,
    schema: FeatureSchema,
    policy: MissingSimilarity,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        let keywords = KeywordDictionary::default();
        Self {
            normalizer: Normalizer::english(),
            schema: FeatureSchema::new(&keywords),
            lexical: LexicalExtractor::new(Normalizer::english(), keywords),
            policy: MissingSimilarity::default(),
        }
    }
}

impl FeaturePipeline {
    pub fn from_settings(settings: &FeatureSettings) -> Result<Self> {
        let normalizer = Normalizer::new(StopWords::from_config(&settings.stopwords));
        let keywords = KeywordDictionary::new(&settings.keywords)?;
        Ok(Self {
            schema: FeatureSchema::new(&keywords),
            lexical: LexicalExtractor::new(normalizer.clone(), keywords),
            normalizer,
            policy: settings.missing_similarity,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn policy(&self) -> MissingSimilarity {
        self.policy
    }

    pub fn build(&self, dataset: &Dataset) -> Result<FeatureMatrix> {
        let tokens = tokenize_all(&dataset.pairs, &self.normalizer);
        let similarity = batch_cosine_similarity(&tokens);
        let lexical = self.lexical.extract_all(&dataset.pairs, &tokens);
        assemble(
            dataset.id_column,
            &self.schema,
            &dataset.pairs,
            similarity,
            lexical,
            self.policy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::{IdColumn, QuestionPair};

    fn dataset(id_column: IdColumn, pairs: Vec<QuestionPair>) -> Dataset {
        Dataset::new(id_column, pairs)
    }

    #[test]
    fn builds_one_row_per_pair() {
        let ds = dataset(
            IdColumn::Id,
            vec![
                QuestionPair::labeled(0, "What is the best way to learn Python", "How can I learn Python quickly", true),
                QuestionPair::labeled(1, "the", "dogs are great", false),
                QuestionPair::labeled(2, "", "", false),
            ],
        );
        let m = FeaturePipeline::default().build(&ds).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(0).unwrap().cos_sim, Some(0.5));
        // undefined, imputed by the default policy
        assert_eq!(m.get(1).unwrap().cos_sim, Some(1.0));
        assert_eq!(m.get(2).unwrap().q1_wordcount, 0);
    }

    #[test]
    fn keep_policy_exposes_undefined() {
        let settings = FeatureSettings {
            missing_similarity: MissingSimilarity::Keep,
            ..FeatureSettings::default()
        };
        let pipeline = FeaturePipeline::from_settings(&settings).unwrap();
        let ds = dataset(IdColumn::TestId, vec![QuestionPair::new(5, "the", "dogs are great")]);
        let m = pipeline.build(&ds).unwrap();
        assert_eq!(m.rows[0].cos_sim, None);
    }

    #[test]
    fn train_and_test_share_schema() {
        let pipeline = FeaturePipeline::default();
        let train = pipeline
            .build(&dataset(IdColumn::Id, vec![QuestionPair::labeled(1, "a b", "b c", true)]))
            .unwrap();
        let test = pipeline
            .build(&dataset(IdColumn::TestId, vec![QuestionPair::new(1, "x", "y")]))
            .unwrap();
        assert!(train.schema.ensure_matches(&test.schema).is_ok());
        assert_eq!(train.schema.columns(), test.schema.columns());
    }
}
