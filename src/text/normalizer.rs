use std::{borrow::Cow, ops::Deref};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::text::stopwords::StopWords;

/// Normalized tokens of one question, in text order.
/// Duplicates are kept; it is a sequence, not a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for TokenSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[String]> for TokenSet {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for TokenSet {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<'a> FromIterator<&'a str> for TokenSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

/// Text -> token pipeline.
///
/// Steps, in order:
/// 1. lowercase the whole string
/// 2. drop stopwords that sit between whitespace (or the string edges);
///    the surrounding whitespace is left in place
/// 3. split on single spaces
/// 4. strip punctuation from every piece, dropping pieces left empty
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: StopWords,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Normalizer {
    pub fn new(stopwords: StopWords) -> Self {
        Self { stopwords }
    }

    pub fn english() -> Self {
        Self::new(StopWords::english())
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    pub fn normalize(&self, text: &str) -> TokenSet {
        let lowered = text.to_lowercase();
        let kept = self.remove_stopwords(&lowered);
        kept.split(' ')
            .filter_map(|piece| {
                let stripped: String = piece.chars().filter(|c| !is_punctuation(*c)).collect();
                let token = stripped.trim();
                (!token.is_empty()).then(|| token.to_string())
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Normalize an untyped cell. `null` counts as missing text and yields an
    /// empty token set; any non-string value is rejected.
    pub fn normalize_value(&self, field: &str, value: &Value) -> Result<TokenSet> {
        let text = text_of(field, value)?;
        Ok(self.normalize(&text))
    }

    fn remove_stopwords(&self, lowered: &str) -> String {
        if self.stopwords.is_empty() {
            return lowered.to_string();
        }
        let mut kept = String::with_capacity(lowered.len());
        let mut word_start: Option<usize> = None;
        for (idx, c) in lowered.char_indices() {
            if c.is_whitespace() {
                if let Some(start) = word_start.take() {
                    self.push_word(&mut kept, &lowered[start..idx]);
                }
                kept.push(c);
            } else if word_start.is_none() {
                word_start = Some(idx);
            }
        }
        if let Some(start) = word_start {
            self.push_word(&mut kept, &lowered[start..]);
        }
        kept
    }

    #[inline]
    fn push_word(&self, out: &mut String, word: &str) {
        if !self.stopwords.contains(word) {
            out.push_str(word);
        }
    }
}

/// Borrow the text of an untyped cell.
/// `null` becomes the empty string; numbers, booleans, arrays and objects fail.
pub fn text_of<'a>(field: &str, value: &'a Value) -> Result<Cow<'a, str>> {
    match value {
        Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Null => Ok(Cow::Borrowed("")),
        other => Err(PipelineError::InvalidInput {
            field: field.to_string(),
            found: value_kind(other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// ASCII punctuation plus the common typographic marks (curly quotes, dashes,
/// ellipsis, inverted marks, guillemets).
#[inline]
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{00A1}' | '\u{00AB}' | '\u{00B7}' | '\u{00BB}' | '\u{00BF}'
                | '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{3001}'..='\u{3003}'
        )
}
