use indexmap::IndexSet;

/// Deduplicated union of the two token sequences of one pair.
///
/// Insertion order is first occurrence across `a` then `b`, so the index of a
/// word is reproducible from the pair alone and never depends on any other
/// row of the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedVocabulary<'a> {
    words: IndexSet<&'a str>,
}

impl<'a> SharedVocabulary<'a> {
    pub fn build<A, B>(a: &'a [A], b: &'a [B]) -> Self
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut words = IndexSet::with_capacity(a.len() + b.len());
        words.extend(a.iter().map(AsRef::as_ref));
        words.extend(b.iter().map(AsRef::as_ref));
        Self { words }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words.get_index_of(word)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.words.get_index(idx).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Words in index order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.words.iter().copied()
    }
}

/// Free-function form of [`SharedVocabulary::build`].
pub fn build_vocabulary<'a, A, B>(a: &'a [A], b: &'a [B]) -> SharedVocabulary<'a>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    SharedVocabulary::build(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_keeps_first_occurrence_order() {
        let a = ["best", "way", "learn", "python"];
        let b = ["can", "learn", "python", "quickly"];
        let vocab = build_vocabulary(&a, &b);
        assert_eq!(
            vocab.iter().collect::<Vec<_>>(),
            vec!["best", "way", "learn", "python", "can", "quickly"]
        );
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.index_of("can"), Some(4));
        assert_eq!(vocab.get(1), Some("way"));
    }

    #[test]
    fn duplicates_inside_one_side_collapse() {
        let a = ["dog", "dog", "cat"];
        let b: [&str; 0] = [];
        let vocab = build_vocabulary(&a, &b);
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("cat"));
    }

    #[test]
    fn both_empty() {
        let a: Vec<String> = Vec::new();
        let vocab = build_vocabulary(&a, &a);
        assert!(vocab.is_empty());
        assert_eq!(vocab.index_of("x"), None);
    }
}
