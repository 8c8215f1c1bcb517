use std::collections::HashSet;

use crate::vectorizer::vocabulary::SharedVocabulary;

/// Boolean encoding of one question over its pair's vocabulary.
/// Position `i` is true iff vocabulary word `i` occurs in the question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipVector {
    bits: Vec<bool>,
}

impl MembershipVector {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Number of positions set in both vectors.
    /// Panics if the lengths differ; both sides must come from one vocabulary.
    pub fn dot(&self, other: &MembershipVector) -> usize {
        assert_eq!(
            self.len(),
            other.len(),
            "membership vectors from different vocabularies"
        );
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| **a && **b)
            .count()
    }
}

impl From<Vec<bool>> for MembershipVector {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

/// Encode `tokens` over `vocabulary` by exact string membership.
/// The result always has `vocabulary.len()` entries.
pub fn encode<T: AsRef<str>>(tokens: &[T], vocabulary: &SharedVocabulary<'_>) -> MembershipVector {
    let present: HashSet<&str> = tokens.iter().map(AsRef::as_ref).collect();
    vocabulary
        .iter()
        .map(|word| present.contains(word))
        .collect::<Vec<_>>()
        .into()
}
