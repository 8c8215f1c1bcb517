use std::collections::HashSet;

use proptest::prelude::*;
use quora_dup_features::{
    text::stopwords::ENGLISH,
    vectorizer::{batch::pair_cosine_similarity, build_vocabulary, cosine_similarity, encode},
    Normalizer,
};

fn tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]{1,3}", 0..10)
}

fn non_empty_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]{1,3}", 1..10)
}

proptest! {
    #[test]
    fn vocabulary_is_the_deduplicated_union(a in tokens(), b in tokens()) {
        let vocab = build_vocabulary(&a, &b);
        let union: HashSet<&String> = a.iter().chain(b.iter()).collect();
        prop_assert_eq!(vocab.len(), union.len());
        for word in a.iter().chain(b.iter()) {
            prop_assert!(vocab.contains(word));
        }
    }

    #[test]
    fn encodings_share_vocabulary_length(a in tokens(), b in tokens()) {
        let vocab = build_vocabulary(&a, &b);
        let va = encode(&a, &vocab);
        let vb = encode(&b, &vocab);
        prop_assert_eq!(va.len(), vocab.len());
        prop_assert_eq!(vb.len(), vocab.len());
    }

    #[test]
    fn cosine_is_symmetric(a in tokens(), b in tokens()) {
        let vocab = build_vocabulary(&a, &b);
        let va = encode(&a, &vocab);
        let vb = encode(&b, &vocab);
        prop_assert_eq!(cosine_similarity(&va, &vb), cosine_similarity(&vb, &va));
    }

    #[test]
    fn self_similarity_is_exactly_one(a in non_empty_tokens()) {
        let vocab = build_vocabulary(&a, &a);
        let v = encode(&a, &vocab);
        prop_assert_eq!(cosine_similarity(&v, &v), Some(1.0));
    }

    #[test]
    fn undefined_iff_a_side_is_empty(a in tokens(), b in tokens()) {
        let vocab = build_vocabulary(&a, &b);
        let score = cosine_similarity(&encode(&a, &vocab), &encode(&b, &vocab));
        prop_assert_eq!(score.is_none(), a.is_empty() || b.is_empty());
        if let Some(s) = score {
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn packed_path_matches_membership_vectors(a in tokens(), b in tokens()) {
        let vocab = build_vocabulary(&a, &b);
        let reference = cosine_similarity(&encode(&a, &vocab), &encode(&b, &vocab));
        prop_assert_eq!(pair_cosine_similarity(&a, &b), reference);
    }

    #[test]
    fn normalized_tokens_are_clean(text in "[A-Za-z ,.?!']{0,60}") {
        let tokens = Normalizer::english().normalize(&text);
        for token in tokens.iter() {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains(' '));
            prop_assert!(!token.chars().any(|c| c.is_ascii_uppercase() || c.is_ascii_punctuation()));
        }
    }

    #[test]
    fn stopword_only_text_is_empty(picks in prop::collection::vec(0..ENGLISH.len(), 0..8)) {
        let text = picks.iter().map(|&i| ENGLISH[i]).collect::<Vec<_>>().join(" ");
        prop_assert!(Normalizer::english().normalize(&text).is_empty());
    }
}
