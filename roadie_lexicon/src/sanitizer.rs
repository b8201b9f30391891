//! Input sanitizing - strips disallowed characters and vetoes banned terms.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Word characters are letters, numbers and `_` only; combining marks and
// connector punctuation other than `_` are stripped.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\s?.,!]").expect("disallowed character class")
});

/// Set of lowercase terms that veto input and learned subjects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannedWords(HashSet<String>);

impl BannedWords {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term (stored lowercase).
    pub fn insert(&mut self, word: impl AsRef<str>) {
        self.0.insert(word.as_ref().to_lowercase());
    }

    /// Check whether a single token is banned (case-insensitive).
    pub fn is_banned(&self, token: &str) -> bool {
        self.0.contains(&token.to_lowercase())
    }

    /// Check whether any banned term appears anywhere inside `text`.
    pub fn appears_in(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.0.iter().any(|word| lower.contains(word.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for BannedWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut words = Self::new();
        for word in iter {
            words.insert(word);
        }
        words
    }
}

/// Result of sanitizing raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanitized {
    /// Input with disallowed characters removed, case and spacing untouched.
    Clean(String),
    /// A whitespace-delimited token matched a banned term.
    Rejected,
}

impl Sanitized {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Sanitized::Rejected)
    }
}

/// Remove everything except word characters, whitespace and `? . , !`, then
/// reject the input if any remaining token is banned.
pub fn sanitize(raw: &str, banned: &BannedWords) -> Sanitized {
    let cleaned = DISALLOWED.replace_all(raw, "").into_owned();

    if cleaned.split_whitespace().any(|token| banned.is_banned(token)) {
        return Sanitized::Rejected;
    }

    Sanitized::Clean(cleaned)
}
