//! Configuration structures for the frequency pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main configuration for the pagefreq pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PagefreqConfig {
    /// Page extraction configuration.
    pub extraction: ExtractionConfig,

    /// Counting and normalization configuration.
    pub counting: CountingConfig,
}

/// Page extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Leave pages with no countable tokens out of the per-page record.
    pub skip_empty_pages: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            skip_empty_pages: false,
        }
    }
}

/// Counting and normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountingConfig {
    /// First page index written to the per-page record.
    pub page_origin: u32,

    /// Newline-separated stopword file; the embedded English list is used
    /// when unset.
    pub stopword_file: Option<PathBuf>,

    /// Tokens shorter than this are dropped during normalization.
    pub min_token_len: usize,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            page_origin: 1,
            stopword_file: None,
            min_token_len: 1,
        }
    }
}

impl PagefreqConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PagefreqConfig::default();
        assert_eq!(config.counting.page_origin, 1);
        assert_eq!(config.counting.min_token_len, 1);
        assert_eq!(config.extraction.max_pages, 0);
        assert!(!config.extraction.skip_empty_pages);
        assert!(config.counting.stopword_file.is_none());
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: PagefreqConfig =
            serde_json::from_str(r#"{"counting": {"min_token_len": 3}}"#).unwrap();
        assert_eq!(config.counting.min_token_len, 3);
        assert_eq!(config.counting.page_origin, 1);
        assert_eq!(config.extraction.max_pages, 0);
    }
}
