use crate::utils::datastruct::BitSet;
use crate::vectorizer::membership::MembershipVector;

/// Cosine similarity of a pair; `None` when it is not computable.
pub type SimilarityScore = Option<f64>;

/// 0/1 vectors that can be compared position by position.
pub trait BinaryVector {
    fn dimension(&self) -> usize;
    /// Number of set positions, i.e. the squared L2 norm.
    fn ones(&self) -> usize;
    /// Number of positions set in both.
    fn overlap(&self, other: &Self) -> usize;
}

impl BinaryVector for MembershipVector {
    #[inline]
    fn dimension(&self) -> usize {
        self.len()
    }

    #[inline]
    fn ones(&self) -> usize {
        self.count_ones()
    }

    #[inline]
    fn overlap(&self, other: &Self) -> usize {
        self.dot(other)
    }
}

impl BinaryVector for BitSet {
    #[inline]
    fn dimension(&self) -> usize {
        self.len()
    }

    #[inline]
    fn ones(&self) -> usize {
        self.count_ones()
    }

    #[inline]
    fn overlap(&self, other: &Self) -> usize {
        self.and_count(other)
    }
}

/// cos(θ) = a·b / (‖a‖‖b‖) over 0/1 vectors.
///
/// dot is the overlap count and ‖v‖ = sqrt(ones). Computed as
/// `dot / sqrt(ones_a * ones_b)` so that identical non-empty vectors give
/// exactly 1.0 and argument order never changes the result.
///
/// Returns `None` when either side has no set position. This is "not
/// computable", distinct from a computed 0.0.
///
/// Panics if the dimensions differ.
#[inline]
pub fn cosine_similarity<V: BinaryVector>(a: &V, b: &V) -> SimilarityScore {
    assert_eq!(
        a.dimension(),
        b.dimension(),
        "vectors must share one vocabulary"
    );
    let ones_a = a.ones();
    let ones_b = b.ones();
    if ones_a == 0 || ones_b == 0 {
        return None;
    }
    let dot = a.overlap(b) as f64;
    Some(dot / (ones_a as f64 * ones_b as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{membership::encode, vocabulary::build_vocabulary};

    fn pair_score(a: &[&str], b: &[&str]) -> SimilarityScore {
        let vocab = build_vocabulary(a, b);
        cosine_similarity(&encode(a, &vocab), &encode(b, &vocab))
    }

    #[test]
    fn worked_example_is_one_half() {
        let score = pair_score(&["best", "way", "learn", "python"], &["can", "learn", "python", "quickly"]);
        assert_eq!(score, Some(0.5));
    }

    #[test]
    fn self_similarity_is_exactly_one() {
        assert_eq!(pair_score(&["dog", "cat"], &["dog", "cat"]), Some(1.0));
        assert_eq!(pair_score(&["a", "b", "c"], &["c", "b", "a", "a"]), Some(1.0));
    }

    #[test]
    fn disjoint_is_zero_not_none() {
        assert_eq!(pair_score(&["dog"], &["cat"]), Some(0.0));
    }

    #[test]
    fn empty_side_is_none() {
        assert_eq!(pair_score(&[], &["dogs", "great"]), None);
        assert_eq!(pair_score(&["dogs"], &[]), None);
        assert_eq!(pair_score(&[], &[]), None);
    }

    #[test]
    fn symmetric() {
        let a = ["x", "y", "z"];
        let b = ["y", "w"];
        assert_eq!(pair_score(&a, &b), pair_score(&b, &a));
    }

    #[test]
    fn bitset_and_bool_vectors_agree() {
        let a = MembershipVector::from(vec![true, true, false, true]);
        let b = MembershipVector::from(vec![false, true, true, true]);
        let pa: BitSet = a.as_slice().iter().copied().collect();
        let pb: BitSet = b.as_slice().iter().copied().collect();
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&pa, &pb));
    }
}
