//! Session configuration, read from an optional TOML file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use roadie_lexicon::BannedWords;

/// Everything a [`Session`](crate::Session) needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadieConfig {
    /// The name Roadie answers to.
    pub bot_name: String,

    /// Categorized knowledge-base file.
    pub knowledge_path: PathBuf,

    /// Per-user learned-facts file.
    pub learned_path: PathBuf,

    /// Inputs remembered per user.
    pub history_capacity: usize,

    /// Terms that veto input and learned subjects.
    pub banned_words: Vec<String>,
}

impl Default for RoadieConfig {
    fn default() -> Self {
        Self {
            bot_name: "Roadie".to_string(),
            knowledge_path: PathBuf::from("knowledge_base.json"),
            learned_path: PathBuf::from("learned_info.json"),
            history_capacity: 5,
            banned_words: Vec::new(),
        }
    }
}

impl RoadieConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Point both stores into `dir`, keeping their file names.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.knowledge_path = dir.join("knowledge_base.json");
        self.learned_path = dir.join("learned_info.json");
        self
    }

    pub fn banned(&self) -> BannedWords {
        self.banned_words.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RoadieConfig::default();
        assert_eq!(config.bot_name, "Roadie");
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.knowledge_path, PathBuf::from("knowledge_base.json"));
        assert!(config.banned().is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RoadieConfig::from_toml_str(
            r#"
            bot_name = "Blaze"
            banned_words = ["Darn", "heck"]
            "#,
        )
        .unwrap();

        assert_eq!(config.bot_name, "Blaze");
        assert_eq!(config.history_capacity, 5);
        assert!(config.banned().is_banned("darn"));
        assert_eq!(config.banned().len(), 2);
    }

    #[test]
    fn test_invalid_toml() {
        let result = RoadieConfig::from_toml_str("history_capacity = \"lots\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RoadieConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_with_data_dir() {
        let config = RoadieConfig::default().with_data_dir("/tmp/roadie");
        assert_eq!(config.learned_path, PathBuf::from("/tmp/roadie/learned_info.json"));
    }
}
