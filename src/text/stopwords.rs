use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// English stopword list (the common "en" list used by text-mining toolkits).
/// Entries are lowercase and may carry apostrophes; matching happens before
/// punctuation is stripped.
pub const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her",
    "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
    "themselves", "what", "which", "who", "whom", "this", "that", "these", "those",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "would", "should", "could", "ought",
    "i'm", "you're", "he's", "she's", "it's", "we're", "they're", "i've", "you've",
    "we've", "they've", "i'd", "you'd", "he'd", "she'd", "we'd", "they'd", "i'll",
    "you'll", "he'll", "she'll", "we'll", "they'll", "isn't", "aren't", "wasn't",
    "weren't", "hasn't", "haven't", "hadn't", "doesn't", "don't", "didn't", "won't",
    "wouldn't", "shan't", "shouldn't", "can't", "cannot", "couldn't", "mustn't",
    "let's", "that's", "who's", "what's", "here's", "there's", "when's", "where's",
    "why's", "how's", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very",
];

/// Which stopword list the normalizer filters with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "words")]
pub enum StopWordConfig {
    #[default]
    English,
    None,
    Custom(Vec<String>),
}

/// Set of stopwords, stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase().into_boxed_str())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn english() -> Self {
        Self::new(ENGLISH.iter().copied())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_config(config: &StopWordConfig) -> Self {
        match config {
            StopWordConfig::English => Self::english(),
            StopWordConfig::None => Self::empty(),
            StopWordConfig::Custom(words) => Self::new(words),
        }
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_keeps_content_words_out() {
        let sw = StopWords::english();
        for w in ["the", "what", "is", "how", "i", "are", "what's"] {
            assert!(sw.contains(w), "{w} should be a stopword");
        }
        for w in ["can", "best", "way", "learn", "python", "quickly", "dogs"] {
            assert!(!sw.contains(w), "{w} should not be a stopword");
        }
    }

    #[test]
    fn custom_words_are_lowercased() {
        let sw = StopWords::from_config(&StopWordConfig::Custom(vec!["Foo".into(), " ".into()]));
        assert!(sw.contains("foo"));
        assert_eq!(sw.len(), 1);
    }
}
