use indexmap::IndexSet;

use crate::error::{PipelineError, Result};

/// Salient words whose joint presence in both questions is a feature.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "life",
    "money",
    "trump",
    "google",
    "india",
    "quora",
    "learn",
    "best",
    "difference",
    "love",
    "job",
    "movie",
];

/// Ordered, deduplicated keyword list. The order fixes the flag columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDictionary {
    keywords: IndexSet<String>,
}

impl Default for KeywordDictionary {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl KeywordDictionary {
    /// Keywords are lowercased; duplicates after lowercasing are dropped.
    /// An empty keyword would match every question and is rejected.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = IndexSet::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(PipelineError::Config("empty keyword in keyword list".into()));
            }
            if !set.insert(keyword.clone()) {
                tracing::warn!("duplicate keyword `{}` ignored", keyword);
            }
        }
        Ok(Self { keywords: set })
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.iter().map(String::as_str)
    }

    /// One flag per keyword: true iff it is a substring of both lowercased
    /// questions. Presence on one side only gives false.
    pub fn flags(&self, question1: &str, question2: &str) -> Box<[bool]> {
        let q1 = question1.to_lowercase();
        let q2 = question2.to_lowercase();
        self.keywords
            .iter()
            .map(|k| q1.contains(k.as_str()) && q2.contains(k.as_str()))
            .collect()
    }
}
