use serde::{Deserialize, Serialize};

/// Configuration for padding and mirror rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Append one line terminator after each comment's text in the mirror
    pub comment_ends_with_terminator: bool,

    /// How a comment longer than its code is paid for
    pub deficit: DeficitStrategy,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            comment_ends_with_terminator: true,
            deficit: DeficitStrategy::HideInPlace,
        }
    }
}

impl AlignConfig {
    /// Comments are not followed by an extra terminator in the mirror
    pub fn compact() -> Self {
        Self {
            comment_ends_with_terminator: false,
            ..Default::default()
        }
    }

    /// Overflowing comments borrow blank lines from what follows them
    pub fn borrow_forward() -> Self {
        Self {
            deficit: DeficitStrategy::BorrowForward,
            ..Default::default()
        }
    }
}

/// Strategy for a comment whose text is taller than the code it documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeficitStrategy {
    /// The hidden comment in the code pane leaves blank lines for the overflow
    #[default]
    HideInPlace,

    /// The overflow is carried forward and absorbed by the blank lines before
    /// the next comment; whatever is left is paid when that comment is hidden
    BorrowForward,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AlignConfig::default();
        assert!(config.comment_ends_with_terminator);
        assert_eq!(config.deficit, DeficitStrategy::HideInPlace);
    }

    #[test]
    fn test_presets() {
        assert!(!AlignConfig::compact().comment_ends_with_terminator);
        assert_eq!(AlignConfig::compact().deficit, DeficitStrategy::HideInPlace);
        assert_eq!(
            AlignConfig::borrow_forward().deficit,
            DeficitStrategy::BorrowForward
        );
        assert!(AlignConfig::borrow_forward().comment_ends_with_terminator);
    }
}
