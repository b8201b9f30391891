//! Session - owns all conversational state and exposes the turn protocol.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RoadieConfig;
use crate::error::{SessionError, StoreError};
use crate::history::ConversationHistory;
use crate::knowledge_base::{
    KnowledgeBase, KnowledgeStore, LearnedInfo, LearnedStore, PersistentStore,
};
use crate::resolver::{Outcome, Resolver};
use roadie_lexicon::{
    pick, render, sanitize, BannedWords, Fill, RandomSource, Sanitized, ThreadRandom,
    FAREWELL_LINES, PROFANITY_REPLY, SESSION_GREETINGS, SESSION_GREETING_TAIL,
};

/// Unique identifier for a session, attached to its log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A running conversation engine.
///
/// Both durable stores are loaded on construction and rewritten after every
/// mutation; history lives only as long as the session.
pub struct Session {
    id: SessionId,
    bot_name: String,
    banned: BannedWords,
    knowledge: KnowledgeStore,
    learned: LearnedStore,
    history: ConversationHistory,
    rng: Box<dyn RandomSource>,
}

impl Session {
    /// Load the stores named in `config`. Missing files start empty.
    pub fn open(config: &RoadieConfig) -> Result<Self, StoreError> {
        let knowledge: KnowledgeStore = PersistentStore::open(&config.knowledge_path)?;
        let learned: LearnedStore = PersistentStore::open(&config.learned_path)?;
        let id = SessionId::new();

        info!(
            session = %id,
            knowledge_facts = knowledge.get().fact_count(),
            learned_facts = learned.get().fact_count(),
            "session opened"
        );

        Ok(Self {
            id,
            bot_name: config.bot_name.clone(),
            banned: config.banned(),
            knowledge,
            learned,
            history: ConversationHistory::new(config.history_capacity),
            rng: Box::new(ThreadRandom),
        })
    }

    /// Replace the random source used for every reply choice.
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Opening line for a user.
    pub fn greet(&mut self, name: &str) -> String {
        let fill = Fill {
            name,
            bot: &self.bot_name,
            subject: "",
        };
        let mut greeting = render(pick(self.rng.as_mut(), SESSION_GREETINGS), fill);
        greeting.push_str(&render(SESSION_GREETING_TAIL, fill));
        greeting
    }

    /// Resolve one turn of input from `name`.
    ///
    /// Returns [`Outcome::Farewell`] when the user is leaving. A learned fact
    /// that could not be written comes back as [`SessionError::NotPersisted`],
    /// which still carries the reply.
    pub fn respond(&mut self, input: &str, name: &str) -> Result<Outcome, SessionError> {
        let text = match sanitize(input, &self.banned) {
            Sanitized::Clean(text) => text.to_lowercase(),
            Sanitized::Rejected => {
                warn!(session = %self.id, user = name, "input rejected");
                return Ok(Outcome::Rejected(PROFANITY_REPLY.to_string()));
            }
        };

        self.history.record(name, text.as_str());

        let mut resolver = Resolver {
            bot_name: &self.bot_name,
            banned: &self.banned,
            learned: &mut self.learned,
            knowledge: &mut self.knowledge,
            rng: self.rng.as_mut(),
        };
        let outcome = resolver.resolve(&text, name);

        debug!(session = %self.id, user = name, ok = outcome.is_ok(), "turn complete");
        outcome
    }

    /// Closing line once a turn resolved to [`Outcome::Farewell`].
    pub fn farewell(&mut self) -> String {
        let fill = Fill {
            bot: &self.bot_name,
            ..Default::default()
        };
        render(pick(self.rng.as_mut(), FAREWELL_LINES), fill)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.knowledge.get()
    }

    pub fn learned(&self) -> &LearnedInfo {
        self.learned.get()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }
}
