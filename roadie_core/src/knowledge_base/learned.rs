//! Per-user learned facts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FactTable;

/// User name -> subject (lowercase) -> learned sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnedInfo {
    users: IndexMap<String, FactTable>,
}

impl LearnedInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a sentence for `(user, subject)`. Last write wins.
    pub fn insert(
        &mut self,
        user: impl Into<String>,
        subject: impl Into<String>,
        sentence: impl Into<String>,
    ) {
        self.users
            .entry(user.into())
            .or_default()
            .insert(subject.into(), sentence.into());
    }

    /// First stored subject of `user` that occurs as a substring of `text`.
    ///
    /// This is first-encountered, not most-specific: with subjects `cat` and
    /// `cats` stored in that order, "cats" resolves to `cat`.
    pub fn lookup(&self, user: &str, text: &str) -> Option<(&str, &str)> {
        self.users.get(user).and_then(|facts| {
            facts
                .iter()
                .find(|(subject, _)| text.contains(subject.as_str()))
                .map(|(subject, sentence)| (subject.as_str(), sentence.as_str()))
        })
    }

    /// Everything `user` has taught.
    pub fn facts_for(&self, user: &str) -> Option<&FactTable> {
        self.users.get(user)
    }

    pub fn fact_count(&self) -> usize {
        self.users.values().map(IndexMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_are_private_per_user() {
        let mut learned = LearnedInfo::new();
        learned.insert("Alice", "pythons", "Pythons are cool");

        assert_eq!(
            learned.lookup("Alice", "what about pythons"),
            Some(("pythons", "Pythons are cool"))
        );
        assert!(learned.lookup("Bob", "what about pythons").is_none());
    }

    #[test]
    fn test_first_encountered_subject_wins() {
        let mut learned = LearnedInfo::new();
        learned.insert("Alice", "cat", "Cat is one");
        learned.insert("Alice", "cats", "Cats are many");

        assert_eq!(learned.lookup("Alice", "cats").unwrap().0, "cat");
    }

    #[test]
    fn test_overwrite_keeps_one_entry() {
        let mut learned = LearnedInfo::new();
        learned.insert("Alice", "tea", "Tea is hot");
        learned.insert("Alice", "tea", "Tea is life");

        assert_eq!(learned.fact_count(), 1);
        assert_eq!(learned.facts_for("Alice").unwrap()["tea"], "Tea is life");
    }

    #[test]
    fn test_json_shape() {
        let learned: LearnedInfo =
            serde_json::from_str(r#"{"Alice": {"tea": "Tea is life"}}"#).unwrap();
        assert_eq!(learned.lookup("Alice", "more tea"), Some(("tea", "Tea is life")));
    }
}
