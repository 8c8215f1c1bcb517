use rayon::prelude::*;

use crate::dataset::record::{QuestionPair, RowId};
use crate::features::keywords::KeywordDictionary;
use crate::text::{normalizer::Normalizer, TokenizedPair};

/// Length, word-count and keyword signals for one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalFeatures {
    pub id: RowId,
    /// chars(question1) - chars(question2), on the raw strings
    pub char_diff: i64,
    pub q1_wordcount: u32,
    pub q2_wordcount: u32,
    pub wordcount_diff: i64,
    /// aligned with the extractor's `KeywordDictionary`
    pub keyword_flags: Box<[bool]>,
}

#[derive(Debug, Clone, Default)]
pub struct LexicalExtractor {
    normalizer: Normalizer,
    keywords: KeywordDictionary,
}

impl LexicalExtractor {
    pub fn new(normalizer: Normalizer, keywords: KeywordDictionary) -> Self {
        Self {
            normalizer,
            keywords,
        }
    }

    pub fn keywords(&self) -> &KeywordDictionary {
        &self.keywords
    }

    pub fn extract(&self, pair: &QuestionPair) -> LexicalFeatures {
        let tokens = TokenizedPair::from_pair(pair, &self.normalizer);
        self.extract_tokenized(pair, &tokens)
    }

    /// Same as [`extract`](Self::extract) but reuses tokens already produced
    /// for the similarity stage.
    pub fn extract_tokenized(&self, pair: &QuestionPair, tokens: &TokenizedPair) -> LexicalFeatures {
        debug_assert_eq!(pair.id, tokens.id);
        let q1_wordcount = tokens.q1.len() as u32;
        let q2_wordcount = tokens.q2.len() as u32;
        LexicalFeatures {
            id: pair.id,
            char_diff: char_len(&pair.question1) - char_len(&pair.question2),
            q1_wordcount,
            q2_wordcount,
            wordcount_diff: q1_wordcount as i64 - q2_wordcount as i64,
            keyword_flags: self.keywords.flags(&pair.question1, &pair.question2),
        }
    }

    /// Extract over a dataset whose pairs and tokens are index-aligned.
    pub fn extract_all(&self, pairs: &[QuestionPair], tokens: &[TokenizedPair]) -> Vec<LexicalFeatures> {
        assert_eq!(pairs.len(), tokens.len(), "pairs and tokens must be aligned");
        pairs
            .par_iter()
            .zip(tokens.par_iter())
            .map(|(pair, toks)| self.extract_tokenized(pair, toks))
            .collect()
    }
}

#[inline]
fn char_len(s: &str) -> i64 {
    s.chars().count() as i64
}
