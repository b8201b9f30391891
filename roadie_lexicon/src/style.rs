//! Style transform ("roadmanify") - rewrites a reply into Roadie's slang register.
//!
//! The transform runs in three passes:
//! 1. **Agreement**: plural animal subjects turn every `is` into `are`
//! 2. **Substitution**: whole-word, case-insensitive swaps in table order
//! 3. **Suffix**: one closing tag drawn at random

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::random::{pick, RandomSource};

/// Plural nouns that switch `is` to `are`.
pub const PLURAL_ANIMALS: &[&str] = &[
    "dogs",
    "cats",
    "birds",
    "fish",
    "reptiles",
    "amphibians",
    "mammals",
    "insects",
    "spiders",
    "crustaceans",
    "mollusks",
    "worms",
];

/// Whole-word substitutions, applied in this order.
pub const SLANG_TABLE: &[(&str, &str)] = &[
    ("I", "Man"),
    ("My", "Man's"),
    ("Me", "Man"),
    ("Am", "Is"),
    ("Hello", "Yo"),
    ("Hi", "Sup"),
    ("Yes", "Yeah fam"),
    ("No", "Nah bruv"),
    ("Thank you", "Safe one"),
    ("Thanks", "Bless"),
    ("Please", "Yo"),
    ("Okay", "Aight"),
    ("Cool", "Peak"),
];

/// Closing tags; the empty string means no tag.
pub const SUFFIXES: &[&str] = &[" You get me?", " Innit.", " Safe.", ""];

static SLANG_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SLANG_TABLE
        .iter()
        .map(|(standard, slang)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(standard));
            (Regex::new(&pattern).expect("slang pattern"), *slang)
        })
        .collect()
});

/// Apply verb agreement and the substitution table, without a suffix.
///
/// Agreement is a plain substring replace, so `is` inside other words
/// (`fish` -> `fareh`) is rewritten too.
pub fn stylize_body(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut styled = if text.contains("is") && PLURAL_ANIMALS.iter().any(|a| lower.contains(a)) {
        text.replace("is", "are")
    } else {
        text.to_string()
    };

    for (rule, slang) in SLANG_RULES.iter() {
        styled = rule.replace_all(&styled, NoExpand(*slang)).into_owned();
    }

    styled
}

/// Full transform: [`stylize_body`] plus a random closing tag.
pub fn stylize(text: &str, rng: &mut dyn RandomSource) -> String {
    let mut styled = stylize_body(text);
    styled.push_str(pick(rng, SUFFIXES));
    styled
}
