//! Response Resolver - the ordered, first-match-wins decision chain.
//!
//! Once input is sanitized and recorded, the chain runs top to bottom:
//! 1. **Greeting**: any greeting trigger as a substring
//! 2. **OwnName**: "what is my name" phrasings
//! 3. **BotName**: "your name" phrasings
//! 4. **Farewell**: any farewell trigger, ends the session
//! 5. **LearnedFact**: a subject the user taught appears in the input
//! 6. **KnowledgeFact**: a shared knowledge-base subject appears in the input
//! 7. **Context**: vague-input heuristics
//! 8. **Learn**: declarative input becomes a new fact
//!
//! If nothing matches, a random fallback is returned. All matching is plain
//! substring containment, so `your` counts as the greeting `yo` and a learned
//! subject `art` fires inside `cart`.

use tracing::debug;

use crate::error::{LearnError, SessionError};
use crate::knowledge_base::{KnowledgeStore, LearnedStore};
use crate::learner::{LearnResult, Learner};
use roadie_lexicon::{
    contains_any, context_reply, pick, render, stylize, BannedWords, Fill, RandomSource,
    BOT_NAME_QUESTIONS, BOT_NAME_REPLY, CLUELESS_REPLY, FALLBACK_REPLIES, FAREWELL_TRIGGERS,
    GREETING_REPLIES, GREETING_TRIGGERS, LEARNED_REPLY, LEARN_REFUSAL_REPLY, NAME_ECHO_REPLY,
    OWN_NAME_QUESTIONS,
};

/// What a turn resolved to. Every variant but [`Outcome::Farewell`] carries
/// the reply text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Input contained a banned term.
    Rejected(String),
    Greeting(String),
    /// The user asked for their own name.
    NameQuery(String),
    /// The user asked for Roadie's name.
    BotName(String),
    /// Session over; the caller picks a farewell line.
    Farewell,
    LearnedHit(String),
    KnowledgeHit(String),
    ContextHit(String),
    LearnedNew(String),
    /// Declarative input whose subject is banned.
    LearnRefused(String),
    /// A question about something unknown, inviting the user to teach it.
    Ask(String),
    Fallback(String),
}

impl Outcome {
    /// Reply text, or `None` for the farewell signal.
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Farewell => None,
            Outcome::Rejected(text)
            | Outcome::Greeting(text)
            | Outcome::NameQuery(text)
            | Outcome::BotName(text)
            | Outcome::LearnedHit(text)
            | Outcome::KnowledgeHit(text)
            | Outcome::ContextHit(text)
            | Outcome::LearnedNew(text)
            | Outcome::LearnRefused(text)
            | Outcome::Ask(text)
            | Outcome::Fallback(text) => Some(text),
        }
    }

    pub fn is_farewell(&self) -> bool {
        matches!(self, Outcome::Farewell)
    }
}

/// One matcher in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Greeting,
    OwnName,
    BotName,
    Farewell,
    LearnedFact,
    KnowledgeFact,
    Context,
    Learn,
}

impl Stage {
    /// Evaluation order. The fallback follows the last stage.
    pub const CHAIN: [Stage; 8] = [
        Stage::Greeting,
        Stage::OwnName,
        Stage::BotName,
        Stage::Farewell,
        Stage::LearnedFact,
        Stage::KnowledgeFact,
        Stage::Context,
        Stage::Learn,
    ];
}

/// Borrowed view of session state for resolving one turn.
pub struct Resolver<'a> {
    pub bot_name: &'a str,
    pub banned: &'a BannedWords,
    pub learned: &'a mut LearnedStore,
    pub knowledge: &'a mut KnowledgeStore,
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> Resolver<'a> {
    /// Run the chain over sanitized, lowercased `text`.
    pub fn resolve(&mut self, text: &str, user: &str) -> Result<Outcome, SessionError> {
        for stage in Stage::CHAIN {
            if let Some(outcome) = self.evaluate(stage, text, user)? {
                debug!(?stage, user, "turn resolved");
                return Ok(outcome);
            }
        }

        debug!(user, "no stage matched, falling back");
        let fallback = pick(&mut *self.rng, FALLBACK_REPLIES);
        Ok(Outcome::Fallback(render(fallback, self.fill(user))))
    }

    /// Evaluate a single stage. `None` means the chain moves on.
    pub fn evaluate(
        &mut self,
        stage: Stage,
        text: &str,
        user: &str,
    ) -> Result<Option<Outcome>, SessionError> {
        let fill = self.fill(user);

        let outcome = match stage {
            Stage::Greeting => contains_any(text, GREETING_TRIGGERS).then(|| {
                let reply = pick(&mut *self.rng, GREETING_REPLIES);
                Outcome::Greeting(render(reply, fill))
            }),
            Stage::OwnName => contains_any(text, OWN_NAME_QUESTIONS)
                .then(|| Outcome::NameQuery(render(NAME_ECHO_REPLY, fill))),
            Stage::BotName => contains_any(text, BOT_NAME_QUESTIONS)
                .then(|| Outcome::BotName(render(BOT_NAME_REPLY, fill))),
            Stage::Farewell => contains_any(text, FAREWELL_TRIGGERS).then_some(Outcome::Farewell),
            Stage::LearnedFact => self
                .learned
                .get()
                .lookup(user, text)
                .map(|(_, sentence)| Outcome::LearnedHit(stylize(sentence, &mut *self.rng))),
            Stage::KnowledgeFact => self
                .knowledge
                .get()
                .lookup(text)
                .map(|hit| Outcome::KnowledgeHit(stylize(hit.fact, &mut *self.rng))),
            Stage::Context => {
                context_reply(text).map(|reply| Outcome::ContextHit(reply.to_string()))
            }
            Stage::Learn => return self.learn(text, user),
        };

        Ok(outcome)
    }

    fn learn(&mut self, text: &str, user: &str) -> Result<Option<Outcome>, SessionError> {
        let fill = self.fill(user);
        let mut learner = Learner::new(
            self.banned,
            &mut *self.learned,
            &mut *self.knowledge,
            &mut *self.rng,
        );

        let outcome = match learner.try_learn(text, user) {
            Ok(LearnResult::Learned { subject, .. }) => {
                let fill = Fill { subject: &subject, ..fill };
                Outcome::LearnedNew(render(LEARNED_REPLY, fill))
            }
            Ok(LearnResult::Rejected) => Outcome::LearnRefused(LEARN_REFUSAL_REPLY.to_string()),
            Ok(LearnResult::Unknown { subject }) => {
                let fill = Fill { subject: &subject, ..fill };
                Outcome::Ask(render(CLUELESS_REPLY, fill))
            }
            Ok(LearnResult::NoPattern) => return Ok(None),
            Err(LearnError::NotPersisted { subject, source }) => {
                let fill = Fill { subject: &subject, ..fill };
                return Err(SessionError::NotPersisted {
                    outcome: Outcome::LearnedNew(render(LEARNED_REPLY, fill)),
                    source,
                });
            }
        };

        Ok(Some(outcome))
    }

    fn fill<'u>(&self, user: &'u str) -> Fill<'u>
    where
        'a: 'u,
    {
        Fill {
            name: user,
            bot: self.bot_name,
            subject: "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::PersistentStore;
    use roadie_lexicon::{FixedChoice, CONTEXT_RULES};
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        banned: BannedWords,
        learned: LearnedStore,
        knowledge: KnowledgeStore,
        rng: FixedChoice,
    }

    impl Fixture {
        fn new(choice: usize) -> Self {
            let dir = tempfile::tempdir().unwrap();
            Self {
                learned: PersistentStore::open(dir.path().join("learned_info.json")).unwrap(),
                knowledge: PersistentStore::open(dir.path().join("knowledge_base.json")).unwrap(),
                _dir: dir,
                banned: BannedWords::new(),
                rng: FixedChoice(choice),
            }
        }

        fn resolver(&mut self) -> Resolver<'_> {
            Resolver {
                bot_name: "Roadie",
                banned: &self.banned,
                learned: &mut self.learned,
                knowledge: &mut self.knowledge,
                rng: &mut self.rng,
            }
        }
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(Outcome::Greeting("yo".to_string()).text(), Some("yo"));
        assert_eq!(Outcome::Farewell.text(), None);
        assert!(Outcome::Farewell.is_farewell());
        assert!(!Outcome::Fallback("eh".to_string()).is_farewell());
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(Stage::CHAIN.first(), Some(&Stage::Greeting));
        assert_eq!(Stage::CHAIN.last(), Some(&Stage::Learn));
        let learned = Stage::CHAIN.iter().position(|s| *s == Stage::LearnedFact);
        let knowledge = Stage::CHAIN.iter().position(|s| *s == Stage::KnowledgeFact);
        assert!(learned < knowledge);
    }

    #[test]
    fn test_bot_name_stage() {
        let mut fixture = Fixture::new(0);
        let outcome = fixture
            .resolver()
            .evaluate(Stage::BotName, "tell me your name", "Alice")
            .unwrap();

        assert_eq!(
            outcome,
            Some(Outcome::BotName("Fam, they call me Roadie, you get me?".to_string()))
        );
    }

    #[test]
    fn test_your_counts_as_greeting() {
        let mut fixture = Fixture::new(0);
        let outcome = fixture.resolver().resolve("what is your name", "Alice").unwrap();
        assert_eq!(outcome, Outcome::Greeting("Yo Alice! What's good?".to_string()));
    }

    #[test]
    fn test_own_name() {
        let mut fixture = Fixture::new(0);
        let outcome = fixture.resolver().resolve("what is my name", "Alice").unwrap();
        assert_eq!(
            outcome,
            Outcome::NameQuery(
                "Your name is Alice, innit? Man's got a good memory, you get me?".to_string()
            )
        );
    }

    #[test]
    fn test_learned_fact_beats_knowledge_base() {
        let mut fixture = Fixture::new(3);
        fixture
            .learned
            .update(|info| info.insert("Alice", "tea", "Tea is life"))
            .unwrap();
        fixture
            .knowledge
            .update(|kb| kb.insert("general", "tea", "Tea is overrated"))
            .unwrap();

        let alice = fixture.resolver().resolve("tea time", "Alice").unwrap();
        let bob = fixture.resolver().resolve("tea time", "Bob").unwrap();

        assert_eq!(alice, Outcome::LearnedHit("Tea is life".to_string()));
        assert_eq!(bob, Outcome::KnowledgeHit("Tea is overrated".to_string()));
    }

    #[test]
    fn test_context_before_learning() {
        let mut fixture = Fixture::new(0);
        let outcome = fixture.resolver().resolve("the food is good", "Alice").unwrap();

        assert_eq!(outcome, Outcome::ContextHit(CONTEXT_RULES[2].reply.to_string()));
        assert_eq!(fixture.learned.get().fact_count(), 0);
    }

    #[test]
    fn test_learn_new_fact() {
        let mut fixture = Fixture::new(0);
        let outcome = fixture.resolver().resolve("pythons are cool", "Alice").unwrap();

        assert_eq!(
            outcome,
            Outcome::LearnedNew(
                "Safe for the knowledge about pythons, fam. \
                 Man's added that to the brain, you get me?"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_learn_refused() {
        let mut fixture = Fixture::new(0);
        fixture.banned.insert("darn");

        let outcome = fixture.resolver().resolve("darned cats are rude", "Alice").unwrap();
        assert_eq!(outcome, Outcome::LearnRefused(LEARN_REFUSAL_REPLY.to_string()));
    }

    #[test]
    fn test_fallback() {
        let mut fixture = Fixture::new(4);
        let outcome = fixture.resolver().resolve("random noise", "Alice").unwrap();
        assert_eq!(
            outcome,
            Outcome::Fallback("Oi, Roadie's a bit confused. What you on about, fam?".to_string())
        );
    }
}
