use serde::{Deserialize, Serialize};

pub type RowId = u64;

/// Name of the join key column. Training files carry `id`, inference files
/// carry `test_id`; join semantics are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdColumn {
    Id,
    TestId,
}

impl IdColumn {
    pub fn name(self) -> &'static str {
        match self {
            IdColumn::Id => "id",
            IdColumn::TestId => "test_id",
        }
    }
}

/// One question pair as loaded. `label` is only present on training rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPair {
    pub id: RowId,
    pub question1: String,
    pub question2: String,
    pub label: Option<bool>,
}

impl QuestionPair {
    pub fn new(id: RowId, question1: impl Into<String>, question2: impl Into<String>) -> Self {
        Self {
            id,
            question1: question1.into(),
            question2: question2.into(),
            label: None,
        }
    }

    pub fn labeled(
        id: RowId,
        question1: impl Into<String>,
        question2: impl Into<String>,
        is_duplicate: bool,
    ) -> Self {
        Self {
            label: Some(is_duplicate),
            ..Self::new(id, question1, question2)
        }
    }
}

/// A loaded table of pairs together with the key column it was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub id_column: IdColumn,
    pub pairs: Vec<QuestionPair>,
}

impl Dataset {
    pub fn new(id_column: IdColumn, pairs: Vec<QuestionPair>) -> Self {
        Self { id_column, pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of rows that carry a label.
    pub fn labeled_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.label.is_some()).count()
    }
}
