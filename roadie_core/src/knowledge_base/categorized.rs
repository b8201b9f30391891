//! The shared, categorized knowledge base.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Subject (lowercase) -> fact, in insertion order.
pub type FactTable = IndexMap<String, String>;

/// A knowledge-base hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeHit<'a> {
    pub category: &'a str,
    pub subject: &'a str,
    pub fact: &'a str,
}

/// Category name -> subject -> fact.
///
/// Categories and subjects keep insertion order (which is also file order
/// after a reload), so lookups that hit several subjects always resolve to
/// the same one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    categories: IndexMap<String, FactTable>,
}

impl KnowledgeBase {
    /// Create a new empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fact, creating the category on first use. Last write wins.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        subject: impl Into<String>,
        fact: impl Into<String>,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(subject.into(), fact.into());
    }

    /// First subject (categories in order, then subjects in order) that
    /// occurs as a substring of `text`.
    pub fn lookup(&self, text: &str) -> Option<KnowledgeHit<'_>> {
        self.categories.iter().find_map(|(category, facts)| {
            facts
                .iter()
                .find(|(subject, _)| text.contains(subject.as_str()))
                .map(|(subject, fact)| KnowledgeHit {
                    category,
                    subject,
                    fact,
                })
        })
    }

    /// Check whether `subject` is filed under `category`.
    pub fn contains(&self, category: &str, subject: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|facts| facts.contains_key(subject))
    }

    /// Get all facts in a category.
    pub fn category(&self, name: &str) -> Option<&FactTable> {
        self.categories.get(name)
    }

    /// Iterate over category names in order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Get the total number of facts across categories.
    pub fn fact_count(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fact_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut kb = KnowledgeBase::new();
        kb.insert("tech", "rust", "Rust is fast");

        let hit = kb.lookup("tell me about rust please").unwrap();
        assert_eq!(hit.category, "tech");
        assert_eq!(hit.subject, "rust");
        assert_eq!(hit.fact, "Rust is fast");
        assert!(kb.lookup("tell me about go").is_none());
    }

    #[test]
    fn test_lookup_is_substring_match() {
        let mut kb = KnowledgeBase::new();
        kb.insert("general", "art", "Art is expression");

        // "cart" contains "art".
        assert_eq!(kb.lookup("push the cart").unwrap().subject, "art");
    }

    #[test]
    fn test_lookup_follows_insertion_order() {
        let mut kb = KnowledgeBase::new();
        kb.insert("science", "physics", "Physics is hard");
        kb.insert("general", "physics books", "Physics books are heavy");
        kb.insert("science", "math", "Math is everywhere");

        let hit = kb.lookup("physics books and math").unwrap();
        assert_eq!(hit.fact, "Physics is hard");

        let names: Vec<_> = kb.category_names().collect();
        assert_eq!(names, vec!["science", "general"]);
    }

    #[test]
    fn test_last_write_wins() {
        let mut kb = KnowledgeBase::new();
        kb.insert("general", "cats", "Cats are aloof");
        kb.insert("general", "cats", "Cats are royalty");

        assert_eq!(kb.fact_count(), 1);
        assert_eq!(kb.category("general").unwrap()["cats"], "Cats are royalty");
    }

    #[test]
    fn test_contains() {
        let mut kb = KnowledgeBase::new();
        kb.insert("general", "pythons", "Pythons are peak");

        assert!(kb.contains("general", "pythons"));
        assert!(!kb.contains("tech", "pythons"));
        assert!(!kb.contains("missing", "anything"));
    }

    #[test]
    fn test_json_shape() {
        let kb: KnowledgeBase =
            serde_json::from_str(r#"{"tech": {"code": "Code is life"}, "general": {}}"#).unwrap();

        assert_eq!(kb.fact_count(), 1);
        assert!(kb.contains("tech", "code"));
        assert_eq!(
            serde_json::to_string(&kb).unwrap(),
            r#"{"tech":{"code":"Code is life"},"general":{}}"#
        );
    }
}
