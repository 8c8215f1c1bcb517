pub mod normalizer;
pub mod stopwords;

use rayon::prelude::*;

use crate::dataset::record::{QuestionPair, RowId};
use normalizer::{Normalizer, TokenSet};

/// Both questions of a pair after normalization, keyed by the pair id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedPair {
    pub id: RowId,
    pub q1: TokenSet,
    pub q2: TokenSet,
}

impl TokenizedPair {
    pub fn from_pair(pair: &QuestionPair, normalizer: &Normalizer) -> Self {
        Self {
            id: pair.id,
            q1: normalizer.normalize(&pair.question1),
            q2: normalizer.normalize(&pair.question2),
        }
    }
}

/// Tokenize every pair. Rows are independent; output keeps input order.
pub fn tokenize_all(pairs: &[QuestionPair], normalizer: &Normalizer) -> Vec<TokenizedPair> {
    pairs
        .par_iter()
        .map(|pair| TokenizedPair::from_pair(pair, normalizer))
        .collect()
}
