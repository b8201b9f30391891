//! Learner - turns declarative input into stored facts.
//!
//! Three sentence templates are tried in order against the whole input:
//!
//! 1. `<subject> is|are <predicate>`
//! 2. `<subject> has|have <predicate>`
//! 3. `<subject> can|could|will|would <predicate>`
//!
//! The subject capture is greedy, so it runs up to the *last* verb occurrence.
//! A learned fact is stored privately for the user and mirrored, stylized,
//! into the shared knowledge base under a keyword-derived category.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::error::LearnError;
use crate::knowledge_base::{KnowledgeStore, LearnedStore};
use roadie_lexicon::{categorize, stylize, BannedWords, RandomSource, Topic};

static STATEMENT_TEMPLATES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(.+) (is|are) (.+)",
        r"^(.+) (has|have) (.+)",
        r"^(.+) (can|could|will|would) (.+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("statement template"))
    .collect()
});

static QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^what (is|are) (.+)\?").expect("question pattern"));

/// A parsed declarative sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: String,
    pub verb: String,
    pub predicate: String,
}

impl Statement {
    /// Canonical sentence: capitalized subject, verb, predicate.
    pub fn sentence(&self) -> String {
        format!("{} {} {}", capitalize(&self.subject), self.verb, self.predicate)
    }
}

/// What the input looks like to the learner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Statement(Statement),
    /// `what is|are <subject>?`
    Question(String),
    Nothing,
}

/// Match the statement templates in order, then the question pattern.
///
/// Any `what is X?` also fits the first template (subject `what`), so the
/// question form only surfaces through [`match_question`] directly.
pub fn parse(text: &str) -> Parsed {
    for template in STATEMENT_TEMPLATES.iter() {
        if let Some(caps) = template.captures(text) {
            return Parsed::Statement(Statement {
                subject: caps[1].to_string(),
                verb: caps[2].to_string(),
                predicate: caps[3].to_string(),
            });
        }
    }

    match match_question(text) {
        Some(subject) => Parsed::Question(subject),
        None => Parsed::Nothing,
    }
}

/// Subject of a `what is|are <subject>?` question.
pub fn match_question(text: &str) -> Option<String> {
    QUESTION.captures(text).map(|caps| caps[2].to_string())
}

/// Outcome of a learning attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearnResult {
    /// Stored for the user and mirrored into the knowledge base.
    Learned {
        subject: String,
        sentence: String,
        category: Topic,
    },
    /// The subject contains a banned term; nothing was stored.
    Rejected,
    /// A question about something Roadie doesn't know; nothing was stored.
    Unknown { subject: String },
    NoPattern,
}

/// Borrowed view over the stores a learning attempt may touch.
pub struct Learner<'a> {
    banned: &'a BannedWords,
    learned: &'a mut LearnedStore,
    knowledge: &'a mut KnowledgeStore,
    rng: &'a mut dyn RandomSource,
}

impl<'a> Learner<'a> {
    pub fn new(
        banned: &'a BannedWords,
        learned: &'a mut LearnedStore,
        knowledge: &'a mut KnowledgeStore,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            banned,
            learned,
            knowledge,
            rng,
        }
    }

    /// Try to learn from sanitized, lowercased input.
    pub fn try_learn(&mut self, text: &str, user: &str) -> Result<LearnResult, LearnError> {
        match parse(text) {
            Parsed::Statement(statement) => self.learn(statement, user),
            Parsed::Question(subject) => Ok(self.ask(subject)),
            Parsed::Nothing => Ok(LearnResult::NoPattern),
        }
    }

    fn learn(&mut self, statement: Statement, user: &str) -> Result<LearnResult, LearnError> {
        if self.banned.appears_in(&statement.subject) {
            warn!(user, "refused to learn a banned subject");
            return Ok(LearnResult::Rejected);
        }

        let sentence = statement.sentence();
        let key = statement.subject.to_lowercase();
        let category = categorize(&statement.subject);
        let styled = stylize(&sentence, &mut *self.rng);

        let learned = self
            .learned
            .update(|info| info.insert(user, key.clone(), sentence.clone()));
        let mirrored = self
            .knowledge
            .update(|kb| kb.insert(category.as_str(), key.clone(), styled));

        if let Err(source) = learned.and(mirrored) {
            warn!(user, subject = %key, error = %source, "learned fact not persisted");
            return Err(LearnError::NotPersisted {
                subject: statement.subject,
                source,
            });
        }

        info!(user, subject = %key, %category, "learned new fact");
        Ok(LearnResult::Learned {
            subject: statement.subject,
            sentence,
            category,
        })
    }

    fn ask(&self, subject: String) -> LearnResult {
        if self.knowledge.get().contains(Topic::General.as_str(), &subject) {
            LearnResult::NoPattern
        } else {
            LearnResult::Unknown { subject }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
