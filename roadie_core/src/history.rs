//! Conversation history - a bounded buffer of recent inputs per user.
//!
//! Kept in memory only and never read back by the resolver yet.

use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone)]
pub struct ConversationHistory {
    capacity: usize,
    turns: HashMap<String, VecDeque<String>>,
}

impl ConversationHistory {
    /// Create a history keeping at most `capacity` inputs per user.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            turns: HashMap::new(),
        }
    }

    /// Append an input, evicting the oldest once the buffer is full.
    pub fn record(&mut self, user: &str, text: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }

        let capacity = self.capacity;
        let buffer = self
            .turns
            .entry(user.to_string())
            .or_insert_with(|| VecDeque::with_capacity(capacity));
        if buffer.len() == capacity {
            buffer.pop_front();
        }
        buffer.push_back(text.into());
    }

    /// Recent inputs for `user`, oldest first.
    pub fn recent(&self, user: &str) -> impl Iterator<Item = &str> {
        self.turns
            .get(user)
            .into_iter()
            .flat_map(|buffer| buffer.iter().map(String::as_str))
    }

    pub fn len(&self, user: &str) -> usize {
        self.turns.get(user).map_or(0, VecDeque::len)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(5)
    }
}
