//! Agent configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pieces::Color;

/// Default Polyglot book, looked up relative to the working directory
pub const DEFAULT_BOOK: &str = "openings.bin";

/// AI configuration for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Color the agent plays
    pub color: Color,
    /// Search depth in plies, at least 1
    pub depth: u32,
    /// Polyglot opening book (None = search from move one)
    pub book: Option<PathBuf>,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            color: Color::Black,
            depth: 3,
            book: Some(PathBuf::from(DEFAULT_BOOK)),
            seed: None,
        }
    }
}

impl AiConfig {
    /// Agent playing `color` at `depth`
    pub fn new(color: Color, depth: u32) -> Self {
        Self {
            color,
            depth,
            ..Default::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_book(mut self, book: Option<PathBuf>) -> Self {
        self.book = book;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AiConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AiConfig::default();
        assert_eq!(config.color, Color::Black);
        assert_eq!(config.depth, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = AiConfig::new(Color::White, 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDepth));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AiConfig = serde_json::from_str(r#"{ "color": "white", "seed": 7 }"#).unwrap();
        assert_eq!(config.color, Color::White);
        assert_eq!(config.depth, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.book, Some(PathBuf::from(DEFAULT_BOOK)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("abchess-config-{}.json", std::process::id()));
        let config = AiConfig::new(Color::White, 4).with_book(None).with_seed(11);
        config.save(&path).unwrap();
        let loaded = AiConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
