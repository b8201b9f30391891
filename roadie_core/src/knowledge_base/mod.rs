//! Knowledge Base module - the two durable fact stores.
//!
//! - **KnowledgeBase**: Shared facts, grouped by category, visible to every user
//! - **LearnedInfo**: Facts each user taught, private to that user
//! - **PersistentStore**: In-memory value mirrored to a JSON file on every change

mod categorized;
mod learned;
mod persist;

pub use categorized::*;
pub use learned::*;
pub use persist::*;

/// Shared knowledge base bound to its file.
pub type KnowledgeStore = PersistentStore<KnowledgeBase>;

/// Per-user learned facts bound to their file.
pub type LearnedStore = PersistentStore<LearnedInfo>;
