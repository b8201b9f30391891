//! # Roadie Core
//!
//! The "brain" of the Roadie responder. This crate owns the per-process state
//! (knowledge base, learned facts, conversation history), resolves each turn
//! through a fixed priority chain, and keeps the durable stores on disk.
//!
//! ## Core Components
//!
//! - **knowledge_base**: Shared categorized facts and per-user learned facts, JSON-backed
//! - **history**: Bounded per-user buffer of recent inputs
//! - **learner**: Extracts subject/verb/predicate statements and stores them
//! - **resolver**: The ordered matcher chain and its tagged [`Outcome`]
//! - **session**: Owns everything above and exposes `greet`/`respond`/`farewell`
//!
//! ## Turn Flow
//!
//! input -> sanitize -> history -> resolver chain -> style transform -> reply

pub mod config;
pub mod error;
pub mod history;
pub mod knowledge_base;
pub mod learner;
pub mod resolver;
pub mod session;

pub use config::*;
pub use error::*;
pub use history::*;
pub use knowledge_base::*;
pub use learner::*;
pub use resolver::*;
pub use session::*;
