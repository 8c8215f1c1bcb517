use serde::{Deserialize, Serialize};

use crate::dataset::record::{IdColumn, RowId};
use crate::error::{PipelineError, Result};
use crate::features::keywords::KeywordDictionary;

/// Columns that precede the keyword flags, in matrix order.
pub const BASE_COLUMNS: [&str; 5] = [
    "char_diff",
    "cos_sim",
    "q1_wordcount",
    "q2_wordcount",
    "wordcount_diff",
];

/// Column layout of a feature matrix (the join key and label excluded).
///
/// The base columns are fixed by [`FeatureRow`]; only the keyword flag
/// columns vary, so two schemas are equal iff their keyword lists are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    keywords: Vec<String>,
}

impl FeatureSchema {
    pub fn new(keywords: &KeywordDictionary) -> Self {
        Self {
            keywords: keywords.iter().map(str::to_string).collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn width(&self) -> usize {
        BASE_COLUMNS.len() + self.keywords.len()
    }

    pub fn columns(&self) -> Vec<String> {
        BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.keywords.iter().map(|k| format!("kw_{k}")))
            .collect()
    }

    /// Fails with `SchemaMismatch` unless both schemas have the same columns
    /// in the same order.
    pub fn ensure_matches(&self, other: &FeatureSchema) -> Result<()> {
        if self == other {
            return Ok(());
        }
        Err(PipelineError::schema(format!(
            "feature columns differ: [{}] vs [{}]",
            self.columns().join(","),
            other.columns().join(",")
        )))
    }
}

/// All derived signals for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub id: RowId,
    pub char_diff: i64,
    /// `None` only when the assembler ran with `MissingSimilarity::Keep`.
    pub cos_sim: Option<f64>,
    pub q1_wordcount: u32,
    pub q2_wordcount: u32,
    pub wordcount_diff: i64,
    pub keyword_flags: Box<[bool]>,
}

impl FeatureRow {
    /// Numeric values in schema column order. A missing similarity is NaN.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        [
            self.char_diff as f64,
            self.cos_sim.unwrap_or(f64::NAN),
            self.q1_wordcount as f64,
            self.q2_wordcount as f64,
            self.wordcount_diff as f64,
        ]
        .into_iter()
        .chain(self.keyword_flags.iter().map(|f| if *f { 1.0 } else { 0.0 }))
    }
}

/// Assembled features of one dataset, one row per input pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub id_column: IdColumn,
    pub schema: FeatureSchema,
    pub rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().map(|r| r.id)
    }

    pub fn get(&self, id: RowId) -> Option<&FeatureRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Order rows by join key; comparisons between runs go through this.
    pub fn sort_by_id(&mut self) {
        self.rows.sort_by_key(|r| r.id);
    }

    pub fn missing_similarity_count(&self) -> usize {
        self.rows.iter().filter(|r| r.cos_sim.is_none()).count()
    }
}
