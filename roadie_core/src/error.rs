//! Error types for stores, configuration, and turns.

use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::Outcome;

/// Failures reading or writing a durable JSON store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures loading a TOML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures surfaced by a single conversation turn.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The turn resolved, but a learned fact could not be flushed to disk.
    /// The resolved outcome is still carried so the reply can be shown.
    #[error("learned fact was not persisted: {source}")]
    NotPersisted {
        outcome: Outcome,
        #[source]
        source: StoreError,
    },
}

impl SessionError {
    /// The outcome the turn resolved to before the failure.
    pub fn outcome(&self) -> &Outcome {
        match self {
            SessionError::NotPersisted { outcome, .. } => outcome,
        }
    }
}

/// Failures while learning a new fact.
#[derive(Debug, Error)]
pub enum LearnError {
    /// The fact is in memory but at least one store failed to flush.
    #[error("learned '{subject}' but could not persist it: {source}")]
    NotPersisted {
        subject: String,
        #[source]
        source: StoreError,
    },
}
