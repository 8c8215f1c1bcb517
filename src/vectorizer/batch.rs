use indexmap::IndexSet;
use rayon::prelude::*;

use crate::dataset::record::RowId;
use crate::text::TokenizedPair;
use crate::utils::datastruct::BitSet;
use crate::vectorizer::compare::{cosine_similarity, SimilarityScore};

/// Packed membership vectors of one pair.
///
/// Tokens are interned to ids local to the pair (first occurrence across
/// q1 then q2), which is the same index mapping `SharedVocabulary` gives, so
/// the bits equal the `encode` output for that vocabulary.
pub fn encode_pair<A, B>(a: &[A], b: &[B]) -> (BitSet, BitSet)
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut ids: IndexSet<&str> = IndexSet::with_capacity(a.len() + b.len());
    let a_ids: Vec<usize> = a.iter().map(|t| ids.insert_full(t.as_ref()).0).collect();
    let b_ids: Vec<usize> = b.iter().map(|t| ids.insert_full(t.as_ref()).0).collect();

    let mut bits_a = BitSet::with_len(ids.len());
    let mut bits_b = BitSet::with_len(ids.len());
    a_ids.into_iter().for_each(|id| bits_a.set(id));
    b_ids.into_iter().for_each(|id| bits_b.set(id));
    (bits_a, bits_b)
}

/// Cosine similarity of one tokenized pair via packed bits.
#[inline]
pub fn pair_cosine_similarity<A, B>(a: &[A], b: &[B]) -> SimilarityScore
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    // an empty side is undefined whatever the other holds
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let (bits_a, bits_b) = encode_pair(a, b);
    cosine_similarity(&bits_a, &bits_b)
}

/// Row-wise cosine similarity over a whole dataset, keyed by pair id.
///
/// Every pair is scored on its own vocabulary, so partitioning across
/// threads cannot change any value. Output order follows input order.
pub fn batch_cosine_similarity(pairs: &[TokenizedPair]) -> Vec<(RowId, SimilarityScore)> {
    let scores: Vec<(RowId, SimilarityScore)> = pairs
        .par_iter()
        .map(|pair| (pair.id, pair_cosine_similarity(&pair.q1, &pair.q2)))
        .collect();
    let undefined = scores.iter().filter(|(_, s)| s.is_none()).count();
    tracing::debug!(
        "scored {} pairs, {} with undefined similarity",
        scores.len(),
        undefined
    );
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalizer::TokenSet;
    use crate::vectorizer::{membership::encode, vocabulary::build_vocabulary};

    fn tokenized(id: RowId, q1: &[&str], q2: &[&str]) -> TokenizedPair {
        TokenizedPair {
            id,
            q1: q1.iter().copied().collect::<TokenSet>(),
            q2: q2.iter().copied().collect::<TokenSet>(),
        }
    }

    #[test]
    fn packed_bits_match_reference_encoding() {
        let a = ["what", "dog", "dog", "cat"];
        let b = ["cat", "bird", "what"];
        let vocab = build_vocabulary(&a, &b);
        let (pa, pb) = encode_pair(&a, &b);
        assert_eq!(pa.iter().collect::<Vec<_>>(), encode(&a, &vocab).as_slice());
        assert_eq!(pb.iter().collect::<Vec<_>>(), encode(&b, &vocab).as_slice());
    }

    #[test]
    fn batch_keeps_ids_and_order() {
        let pairs = vec![
            tokenized(10, &["best", "way", "learn", "python"], &["can", "learn", "python", "quickly"]),
            tokenized(3, &[], &["dogs", "great"]),
            tokenized(7, &["dog", "cat"], &["dog", "cat"]),
        ];
        let scores = batch_cosine_similarity(&pairs);
        assert_eq!(scores, vec![(10, Some(0.5)), (3, None), (7, Some(1.0))]);
    }

    #[test]
    fn batch_over_empty_input() {
        assert!(batch_cosine_similarity(&[]).is_empty());
    }
}
