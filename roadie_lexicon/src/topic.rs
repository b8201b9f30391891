//! Topic categorization for mirrored knowledge-base facts.

/// Keywords that file a subject under [`Topic::Tech`].
pub const TECH_KEYWORDS: &[&str] = &[
    "computer",
    "internet",
    "software",
    "hardware",
    "programming",
    "code",
];

/// Keywords that file a subject under [`Topic::Science`].
pub const SCIENCE_KEYWORDS: &[&str] = &["physics", "chemistry", "biology", "astronomy", "math"];

/// Knowledge-base category a learned subject lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Tech,
    Science,
    General,
}

impl Topic {
    /// Category key used in the knowledge file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Tech => "tech",
            Topic::Science => "science",
            Topic::General => "general",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorize a subject by keyword containment. Tech wins over science.
pub fn categorize(subject: &str) -> Topic {
    let lower = subject.to_lowercase();
    if TECH_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Topic::Tech
    } else if SCIENCE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Topic::Science
    } else {
        Topic::General
    }
}
