use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::record::{IdColumn, QuestionPair, RowId};
use crate::error::{PipelineError, Result};
use crate::features::lexical::LexicalFeatures;
use crate::features::row::{FeatureMatrix, FeatureRow, FeatureSchema};
use crate::vectorizer::compare::SimilarityScore;

/// What the assembler does with an undefined similarity.
///
/// `Impute` writes a constant, 1.0 by default ("no vocabulary on one side"
/// reads as trivially similar). `Keep` leaves the value missing for a
/// classifier that handles missing inputs itself, as the bundled boosting
/// classifier does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "strategy")]
pub enum MissingSimilarity {
    Impute { value: f64 },
    Keep,
}

impl Default for MissingSimilarity {
    fn default() -> Self {
        MissingSimilarity::Impute {
            value: Self::DEFAULT_IMPUTED,
        }
    }
}

impl MissingSimilarity {
    pub const DEFAULT_IMPUTED: f64 = 1.0;

    #[inline]
    pub fn apply(self, score: SimilarityScore) -> SimilarityScore {
        match (score, self) {
            (None, MissingSimilarity::Impute { value }) => Some(value),
            (score, _) => score,
        }
    }
}

/// Join pairs, similarity scores and lexical features on the pair id.
///
/// Every input pair yields exactly one row, in input order. A stream entry
/// with an id no pair has, a pair missing from a stream, or a repeated id is
/// a `SchemaMismatch`; nothing is dropped silently.
pub fn assemble(
    id_column: IdColumn,
    schema: &FeatureSchema,
    pairs: &[QuestionPair],
    similarity_scores: Vec<(RowId, SimilarityScore)>,
    lexical_features: Vec<LexicalFeatures>,
    policy: MissingSimilarity,
) -> Result<FeatureMatrix> {
    let key = id_column.name();
    let mut scores = index_unique(similarity_scores, |(id, _)| *id, key, "similarity")?;
    let mut lexical = index_unique(lexical_features, |f| f.id, key, "lexical")?;

    let flag_width = schema.keywords().len();
    let mut imputed = 0usize;
    let mut rows = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (_, score) = scores.remove(&pair.id).ok_or_else(|| {
            PipelineError::schema(format!("{key} {} has no similarity score", pair.id))
        })?;
        let lex = lexical.remove(&pair.id).ok_or_else(|| {
            // a repeated pair id lands here too, its entry already consumed
            PipelineError::schema(format!("{key} {} has no lexical features (or is repeated)", pair.id))
        })?;
        if lex.keyword_flags.len() != flag_width {
            return Err(PipelineError::schema(format!(
                "{key} {}: {} keyword flags, schema expects {}",
                pair.id,
                lex.keyword_flags.len(),
                flag_width
            )));
        }
        if score.is_none() && matches!(policy, MissingSimilarity::Impute { .. }) {
            imputed += 1;
        }
        rows.push(FeatureRow {
            id: pair.id,
            char_diff: lex.char_diff,
            cos_sim: policy.apply(score),
            q1_wordcount: lex.q1_wordcount,
            q2_wordcount: lex.q2_wordcount,
            wordcount_diff: lex.wordcount_diff,
            keyword_flags: lex.keyword_flags,
        });
    }

    if let Some(orphan) = scores.keys().chain(lexical.keys()).min() {
        return Err(PipelineError::schema(format!(
            "{key} {orphan} appears in a feature stream but not in the input pairs"
        )));
    }

    tracing::info!(
        "assembled {} feature rows ({} undefined similarities imputed, policy {:?})",
        rows.len(),
        imputed,
        policy
    );
    Ok(FeatureMatrix {
        id_column,
        schema: schema.clone(),
        rows,
    })
}

fn index_unique<T>(
    items: Vec<T>,
    id_of: impl Fn(&T) -> RowId,
    key: &str,
    stream: &str,
) -> Result<HashMap<RowId, T>> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let id = id_of(&item);
        if map.insert(id, item).is_some() {
            return Err(PipelineError::schema(format!(
                "{key} {id} appears twice in the {stream} stream"
            )));
        }
    }
    Ok(map)
}
