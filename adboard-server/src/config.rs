//! Moderation configuration - banned-words denylist
//!
//! Configuration is loaded from environment variables:
//! - `ADBOARD_BANNED_WORDS`: comma-separated denylist (default: "дурак,скам")

/// Words that may not appear in ad titles.
///
/// Entries are normalized to lowercase at load so the validator only has to
/// lowercase the value under test.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    pub banned_words: Vec<String>,
}

impl ModerationConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        match std::env::var("ADBOARD_BANNED_WORDS") {
            Ok(raw) => Self::new(parse_denylist(&raw)),
            Err(_) => Self::default(),
        }
    }

    /// Create config with an explicit denylist (for testing).
    pub fn new(banned_words: Vec<String>) -> Self {
        Self {
            banned_words: banned_words
                .into_iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            banned_words: vec!["дурак".to_string(), "скам".to_string()],
        }
    }
}

fn parse_denylist(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_denylist() {
        let config = ModerationConfig::default();
        assert_eq!(config.banned_words, vec!["дурак", "скам"]);
    }

    #[test]
    fn parses_comma_separated() {
        let config = ModerationConfig::new(parse_denylist("spam, Junk ,"));
        assert_eq!(config.banned_words, vec!["spam", "junk"]);
    }

    #[test]
    fn normalizes_to_lowercase() {
        let config = ModerationConfig::new(vec!["SCAM".to_string()]);
        assert_eq!(config.banned_words, vec!["scam"]);
    }

    #[test]
    fn empty_denylist_allowed() {
        let config = ModerationConfig::new(vec![]);
        assert!(config.banned_words.is_empty());
    }
}
