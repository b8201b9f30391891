//! # Roadie Lexicon
//!
//! The "street rulebook" crate - every fixed phrase table, the input sanitizer,
//! and the slang style transform. Nothing in here holds state or touches disk;
//! the only impurity is the injectable [`RandomSource`] used to pick replies.

pub mod phrases;
pub mod random;
pub mod sanitizer;
pub mod style;
pub mod topic;

pub use phrases::*;
pub use random::*;
pub use sanitizer::*;
pub use style::*;
pub use topic::*;
