use serde::{Deserialize, Serialize};

/// Configuration for comment boundary detection and chunking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Which comments count as documentation
    pub comment_filter: CommentFilter,

    /// Languages to support (empty = all supported languages)
    pub supported_languages: Vec<String>,
}

impl ChunkerConfig {
    /// Only documentation comments (`///`, `/** */`, ...) are split out
    pub fn doc_only() -> Self {
        Self {
            comment_filter: CommentFilter::DocOnly,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(blank) = self
            .supported_languages
            .iter()
            .find(|lang| lang.trim().is_empty())
        {
            return Err(format!("supported_languages contains a blank entry: {blank:?}"));
        }

        Ok(())
    }

    /// Check a language name against `supported_languages`
    pub fn allows_language(&self, name: &str) -> bool {
        self.supported_languages.is_empty()
            || self
                .supported_languages
                .iter()
                .any(|lang| lang.eq_ignore_ascii_case(name))
    }
}

/// Which standalone comments are treated as documentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentFilter {
    /// Every comment that starts its own line
    #[default]
    All,

    /// Only documentation comments (`///`, `//!`, `/** */`, `/*! */`; all `#` comments in Python)
    DocOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ChunkerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.comment_filter, CommentFilter::All);
    }

    #[test]
    fn test_preset_configs_valid() {
        assert!(ChunkerConfig::doc_only().validate().is_ok());
        assert_eq!(
            ChunkerConfig::doc_only().comment_filter,
            CommentFilter::DocOnly
        );
    }

    #[test]
    fn test_config_validation() {
        let config = ChunkerConfig {
            supported_languages: vec!["rust".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_allows_language() {
        let mut config = ChunkerConfig::default();
        assert!(config.allows_language("python"));

        config.supported_languages = vec!["Rust".to_string()];
        assert!(config.allows_language("rust"));
        assert!(!config.allows_language("python"));
    }
}
