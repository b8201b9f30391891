//! Phrase tables - every trigger Roadie listens for and every line it can say.
//!
//! Templates use `{name}` (the user), `{bot}` (Roadie's own name) and
//! `{subject}` (a learned or asked-about subject) placeholders, filled by
//! [`render`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(name|bot|subject)\}").expect("placeholder pattern"));

/// Opening lines for a new session. Followed by [`SESSION_GREETING_TAIL`].
pub const SESSION_GREETINGS: &[&str] = &[
    "Yo, what's good? I'm {bot}, you get me?",
    "Wagwan fam?",
    "Sup blud?",
    "Oi oi, you got me?",
];

pub const SESSION_GREETING_TAIL: &str = " Nice to meet you, {name}!";

/// Substrings that make an input a greeting.
pub const GREETING_TRIGGERS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "yo",
    "sup",
    "what's up",
    "how are you",
    "how's it going",
];

pub const GREETING_REPLIES: &[&str] = &[
    "Yo {name}! What's good?",
    "Sup {name}! How you living?",
    "Hey {name}! Everything blessed?",
    "Wagwan {name}! How's it going?",
    "Oi oi {name}! What's the latest?",
    "Alright {name}? How you keeping?",
    "Safe {name}! What's the vibe today?",
    "Yo yo {name}! How's life treating you?",
];

/// Questions about the user's own name.
pub const OWN_NAME_QUESTIONS: &[&str] = &["what's my name", "what is my name"];

/// Questions about Roadie's name. The bare `your name` catches the rest.
pub const BOT_NAME_QUESTIONS: &[&str] = &["what's your name", "what is your name", "your name"];

pub const NAME_ECHO_REPLY: &str =
    "Your name is {name}, innit? Man's got a good memory, you get me?";
pub const BOT_NAME_REPLY: &str = "Fam, they call me {bot}, you get me?";

/// Substrings that end the session.
pub const FAREWELL_TRIGGERS: &[&str] = &[
    "bye",
    "goodbye",
    "see you",
    "see you later",
    "close chat",
    "exit",
    "quit",
];

pub const FAREWELL_LINES: &[&str] = &[
    "I'm gonna bounce, yeah? Catch you later from {bot}.",
    "Laters, fam.",
    "Stay safe, bruv.",
    "I'm out, you get me? - {bot}",
];

/// Ordered heuristics for vague input: first rule with a matching trigger wins.
pub const CONTEXT_RULES: &[ContextRule] = &[
    ContextRule {
        triggers: &["not much", "not doing much", "just chilling", "same old", "not really"],
        reply: "Sounds chill, fam! Anything specific you wanna chat about?",
    },
    ContextRule {
        triggers: &["hmm"],
        reply: "You seem deep in thought, bruv. What's on your mind?",
    },
    ContextRule {
        triggers: &["good", "great", "excellent", "amazing", "wonderful", "fantastic"],
        reply: "That's peng, fam! What else you wanna chat about?",
    },
    ContextRule {
        triggers: &["bad", "terrible", "awful", "horrible", "disappointing"],
        reply: "That's bare peak, bruv. Wanna chat it out?",
    },
];

pub const FALLBACK_REPLIES: &[&str] = &[
    "Yo, that's a bit confusing, fam. Can you break it down for me?",
    "Man's not sure what you mean, bruv. Can you say it differently?",
    "That's peak, I don't get it. What you trying to say, fam?",
    "You've lost me there, blud. Can you explain it another way?",
    "Oi, {bot}'s a bit confused. What you on about, fam?",
];

pub const PROFANITY_REPLY: &str = "Oi, watch your language, fam. Keep it clean, yeah?";
pub const LEARN_REFUSAL_REPLY: &str = "Nah fam, can't learn that. Keep it clean, yeah?";
pub const LEARNED_REPLY: &str =
    "Safe for the knowledge about {subject}, fam. Man's added that to the brain, you get me?";
pub const CLUELESS_REPLY: &str =
    "Yo, man's clueless about {subject}, you feel me? What's the answer, fam?";

/// A vague-input heuristic.
#[derive(Debug, Clone, Copy)]
pub struct ContextRule {
    pub triggers: &'static [&'static str],
    pub reply: &'static str,
}

impl ContextRule {
    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, self.triggers)
    }
}

/// First context rule that matches `text`.
pub fn context_reply(text: &str) -> Option<&'static str> {
    CONTEXT_RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.reply)
}

/// Substring containment of any phrase.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase))
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fill<'a> {
    pub name: &'a str,
    pub bot: &'a str,
    pub subject: &'a str,
}

/// Fill `{name}`, `{bot}` and `{subject}` placeholders in one pass.
///
/// Filled values are never rescanned, so a user called `{bot}` stays `{bot}`.
pub fn render(template: &str, fill: Fill<'_>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "name" => fill.name,
            "bot" => fill.bot,
            _ => fill.subject,
        })
        .into_owned()
}
